use chrono::Utc;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::client::GeneratorClient;
use crate::credentials::{is_valid_key_format, CredentialStore, KEY_PREFIX};
use crate::error::ClientError;
use crate::form::build_request;
use crate::models::*;

/// Fixed cancellation deadline for one generation request
pub const GENERATE_DEADLINE: Duration = Duration::from_secs(60);

const GENERIC_FAILURE: &str = "An error occurred while generating the configuration.";

/// UI state shared between the session and the submission controller
pub type SharedUi = Arc<Mutex<UiState>>;

/// Lock the UI state. A panic elsewhere never leaves it unusable.
pub fn lock_ui(ui: &SharedUi) -> MutexGuard<'_, UiState> {
    ui.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Submitter runs one generation round trip at a time.
///
/// A second submission while one is in flight is rejected with
/// [`ClientError::Busy`]; the first keeps running untouched.
pub struct Submitter {
    client: GeneratorClient,
    deadline: Duration,
    in_flight: AtomicBool,
    ui: SharedUi,
}

/// Releases every in-flight lock when the submission ends, however it ends
struct InFlightGuard<'a> {
    submitter: &'a Submitter,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        {
            let mut ui = lock_ui(&self.submitter.ui);
            ui.submit_enabled = true;
            ui.loading = false;
            ui.loading_message = DEFAULT_LOADING_MESSAGE.to_string();
            ui.phase = SubmitPhase::Idle;
        }
        self.submitter.in_flight.store(false, Ordering::Release);
    }
}

impl Submitter {
    pub fn new(client: GeneratorClient, deadline: Duration, ui: SharedUi) -> Self {
        Self {
            client,
            deadline,
            in_flight: AtomicBool::new(false),
            ui,
        }
    }

    pub fn client(&self) -> &GeneratorClient {
        &self.client
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate the form, send it, and interpret the response.
    ///
    /// Failures are also written to the shared error area with focus on the
    /// offending field where there is one.
    pub async fn submit(
        &self,
        form: &FormState,
        store: &dyn CredentialStore,
    ) -> Result<GenerationResult, ClientError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Rejected submission: a generation request is already in flight");
            return Err(ClientError::Busy);
        }
        let _guard = InFlightGuard { submitter: self };

        {
            let mut ui = lock_ui(&self.ui);
            ui.phase = SubmitPhase::Validating;
            ui.focus = None;
        }

        let outcome = self.run(form, store).await;

        let mut ui = lock_ui(&self.ui);
        match &outcome {
            Ok(result) => {
                tracing::info!(
                    "Configuration generated for {} ({} bytes)",
                    result.vendor,
                    result.config.len()
                );
                ui.phase = SubmitPhase::Success;
                ui.last_outcome = Some(SubmitPhase::Success);
            }
            Err(e) => {
                if e.is_local() {
                    tracing::debug!("Submission rejected locally: {}", e);
                } else {
                    tracing::warn!("Generation failed: {}", e);
                }
                ui.phase = SubmitPhase::Failed;
                ui.last_outcome = Some(SubmitPhase::Failed);
                ui.show_error(e);
                ui.focus = e.focus();
            }
        }
        outcome
    }

    async fn run(
        &self,
        form: &FormState,
        store: &dyn CredentialStore,
    ) -> Result<GenerationResult, ClientError> {
        validate(form)?;

        if let Err(e) = store.save(form.api_key.trim()) {
            tracing::warn!("Could not persist API key: {}", e);
        }

        let request = build_request(form)?;

        {
            let mut ui = lock_ui(&self.ui);
            ui.phase = SubmitPhase::InFlight;
            ui.submit_enabled = false;
            ui.loading = true;
            ui.loading_message = if request.has_requirements() {
                REQUIREMENTS_LOADING_MESSAGE
            } else {
                DEFAULT_LOADING_MESSAGE
            }
            .to_string();
        }

        tracing::info!(
            "Requesting configuration: vendor={} hostname={} requirements={}",
            request.vendor,
            request.hostname,
            request.has_requirements()
        );

        match tokio::time::timeout(self.deadline, self.exchange(&request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ClientError::Timeout(self.deadline)),
        }
    }

    async fn exchange(&self, request: &GenerateRequest) -> Result<GenerationResult, ClientError> {
        let resp = self.client.post_generate(request).await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: error_message_from_body(status, &body),
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))?;

        if !parsed.success {
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: parsed
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            });
        }

        let config = parsed
            .config
            .ok_or_else(|| ClientError::Parse("success response carries no config".into()))?;

        Ok(GenerationResult {
            config,
            hostname: parsed.hostname,
            vendor: request.vendor.clone(),
            generated_at: Utc::now(),
        })
    }
}

/// Checks that must pass before the request is even assembled
fn validate(form: &FormState) -> Result<(), ClientError> {
    if form.vendor.trim().is_empty() {
        return Err(ClientError::validation(FormField::Vendor, "Please select a vendor."));
    }
    let api_key = form.api_key.trim();
    if api_key.is_empty() {
        return Err(ClientError::validation(
            FormField::ApiKey,
            "Please enter your ChatGPT API key.",
        ));
    }
    if !is_valid_key_format(api_key) {
        return Err(ClientError::AuthFormat { prefix: KEY_PREFIX });
    }
    Ok(())
}

/// Structured `error` field, else the raw body, else a status message
fn error_message_from_body(status: StatusCode, body: &str) -> String {
    let fallback = format!("Server error ({})", status.as_u16());
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.filter(|e| !e.trim().is_empty()).unwrap_or(fallback),
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => fallback,
    }
}

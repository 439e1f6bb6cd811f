use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::actions::{self, Clipboard};
use crate::credentials::{is_valid_key_format, status_for, CredentialStore};
use crate::error::ClientError;
use crate::form::{apply_vendor, field_warnings, required_markers};
use crate::models::*;
use crate::submission::{lock_ui, SharedUi, Submitter};

/// FormSession is one open generation form.
///
/// Construction is the only initialization step: it restores the stored key
/// and its indicator. All later changes go through the methods below.
pub struct FormSession {
    form: FormState,
    visibility: FieldVisibility,
    result: Option<GenerationResult>,
    ui: SharedUi,
    submitter: Arc<Submitter>,
    store: Arc<dyn CredentialStore>,
    clipboard: Arc<dyn Clipboard>,
    download_dir: PathBuf,
    copy_ack_delay: Duration,
}

impl FormSession {
    pub fn open(
        submitter: Arc<Submitter>,
        ui: SharedUi,
        store: Arc<dyn CredentialStore>,
        clipboard: Arc<dyn Clipboard>,
        download_dir: impl Into<PathBuf>,
        copy_ack_delay: Duration,
    ) -> Self {
        let mut session = Self {
            form: FormState::default(),
            visibility: FieldVisibility::hidden(),
            result: None,
            ui,
            submitter,
            store,
            clipboard,
            download_dir: download_dir.into(),
            copy_ack_delay,
        };
        session.restore_key();
        session
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Direct access for inputs without side effects (hostname, IP, VLAN, ...)
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn visibility(&self) -> FieldVisibility {
        self.visibility
    }

    pub fn required_markers(&self) -> RequiredMarkers {
        required_markers(&self.form)
    }

    /// Every advisory warning for the current inputs
    pub fn warnings(&self) -> Vec<String> {
        field_warnings(&self.form)
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn ui(&self) -> UiState {
        lock_ui(&self.ui).clone()
    }

    pub fn select_vendor(&mut self, vendor: &str) -> FieldVisibility {
        self.visibility = apply_vendor(&mut self.form, vendor);
        self.visibility
    }

    pub fn set_requirements(&mut self, text: &str) -> RequiredMarkers {
        self.form.requirements = text.to_string();
        self.required_markers()
    }

    /// Key typed into the input: a well-formed key is saved immediately
    pub fn set_api_key(&mut self, key: &str) -> KeyStatus {
        self.form.api_key = key.to_string();
        let key = key.trim();
        if !key.is_empty() && is_valid_key_format(key) {
            self.persist_key(key);
            lock_ui(&self.ui).key_status = KeyStatus::Saved;
        }
        lock_ui(&self.ui).key_status
    }

    /// Key input lost focus: save a well-formed key, flag a malformed one
    pub fn blur_api_key(&mut self) -> KeyStatus {
        let key = self.form.api_key.trim().to_string();
        if !key.is_empty() {
            let status = if is_valid_key_format(&key) {
                self.persist_key(&key);
                KeyStatus::Saved
            } else {
                KeyStatus::Absent
            };
            lock_ui(&self.ui).key_status = status;
        }
        lock_ui(&self.ui).key_status
    }

    /// Run one generation round trip.
    ///
    /// The previous result is dropped up front; on success the new one is
    /// held and returned.
    pub async fn submit(&mut self) -> Result<&GenerationResult, ClientError> {
        if self.submitter.is_in_flight() {
            return Err(ClientError::Busy);
        }
        {
            let mut ui = lock_ui(&self.ui);
            ui.error_message = None;
            ui.result_visible = false;
        }
        let result = self.submitter.submit(&self.form, self.store.as_ref()).await;
        match result {
            Ok(result) => {
                lock_ui(&self.ui).result_visible = true;
                Ok(&*self.result.insert(result))
            }
            Err(ClientError::Busy) => Err(ClientError::Busy),
            Err(e) => {
                self.result = None;
                Err(e)
            }
        }
    }

    pub async fn copy(&self) -> Result<bool, ClientError> {
        actions::copy(
            self.clipboard.as_ref(),
            self.result.as_ref(),
            &self.ui,
            self.copy_ack_delay,
        )
        .await
    }

    pub async fn download(&self) -> Result<Option<PathBuf>, ClientError> {
        actions::download(
            self.submitter.client(),
            self.result.as_ref(),
            &self.download_dir,
            &self.ui,
        )
        .await
    }

    /// Back to a blank form; only the stored key survives
    pub fn reset(&mut self) {
        self.form = FormState::default();
        self.visibility = FieldVisibility::hidden();
        self.result = None;
        {
            let mut ui = lock_ui(&self.ui);
            ui.result_visible = false;
            ui.error_message = None;
            ui.focus = None;
            ui.alert = None;
        }
        self.restore_key();
    }

    fn restore_key(&mut self) {
        let saved = self.store.load();
        let status = status_for(&saved);
        if status == KeyStatus::Saved {
            self.form.api_key = saved;
        }
        lock_ui(&self.ui).key_status = status;
    }

    fn persist_key(&self, key: &str) {
        if let Err(e) = self.store.save(key) {
            tracing::warn!("Could not persist API key: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::MemoryClipboard;
    use crate::client::GeneratorClient;
    use crate::credentials::MemoryCredentialStore;
    use crate::submission::GENERATE_DEADLINE;
    use crate::test_support::{spawn_stub, Recorder};
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::path::Path;
    use tokio_test::{assert_err, assert_ok};

    async fn generator_stub(recorder: Recorder) -> String {
        let generate = recorder.clone();
        let download = recorder;
        let app = Router::new()
            .route(
                "/api/generate",
                post(move |Json(body): Json<Value>| async move {
                    let hostname = body["hostname"].clone();
                    generate.record(body);
                    Json(json!({
                        "success": true,
                        "config": format!("hostname {}\n!", hostname.as_str().unwrap_or_default()),
                        "hostname": hostname,
                        "vendor": "Cisco",
                    }))
                }),
            )
            .route(
                "/api/download",
                post(move |Json(body): Json<Value>| async move {
                    let config = body["config"].as_str().unwrap_or_default().to_string();
                    download.record(body);
                    config
                }),
            );
        spawn_stub(app).await
    }

    fn open_session(url: &str, store: Arc<MemoryCredentialStore>, dir: &Path) -> FormSession {
        let ui = SharedUi::default();
        let submitter = Arc::new(Submitter::new(
            GeneratorClient::new(url).unwrap(),
            GENERATE_DEADLINE,
            ui.clone(),
        ));
        FormSession::open(
            submitter,
            ui,
            store,
            Arc::new(MemoryClipboard::default()),
            dir,
            Duration::from_millis(10),
        )
    }

    #[test]
    fn test_open_restores_saved_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryCredentialStore::with_key("sk-saved"));
        let session = open_session("http://127.0.0.1:1", store, dir.path());
        assert_eq!(session.form().api_key, "sk-saved");
        assert_eq!(session.ui().key_status, KeyStatus::Saved);

        let session = open_session(
            "http://127.0.0.1:1",
            Arc::new(MemoryCredentialStore::default()),
            dir.path(),
        );
        assert_eq!(session.form().api_key, "");
        assert_eq!(session.ui().key_status, KeyStatus::Absent);
    }

    #[test]
    fn test_key_input_and_blur() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryCredentialStore::default());
        let mut session = open_session("http://127.0.0.1:1", store.clone(), dir.path());

        assert_eq!(session.set_api_key("pk-wrong"), KeyStatus::Absent);
        assert_eq!(store.load(), "");
        assert_eq!(session.blur_api_key(), KeyStatus::Absent);

        assert_eq!(session.set_api_key(" sk-typed "), KeyStatus::Saved);
        assert_eq!(store.load(), "sk-typed");

        session.set_api_key("oops");
        assert_eq!(session.blur_api_key(), KeyStatus::Absent);
        // An invalid key in the input does not evict the stored one
        assert_eq!(store.load(), "sk-typed");
    }

    #[tokio::test]
    async fn test_full_flow_generate_copy_download_reset() {
        let recorder = Recorder::default();
        let url = generator_stub(recorder.clone()).await;
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryCredentialStore::default());
        let mut session = open_session(&url, store.clone(), dir.path());

        let vis = session.select_vendor("cisco");
        assert!(vis.vlan && vis.interface && vis.gateway && !vis.port);
        session.set_api_key("sk-flow");
        session.form_mut().hostname = "SW-HQ-01".into();
        session.form_mut().mgmt_ip = "192.168.10.1".into();
        session.form_mut().mgmt_mask = "255.255.255.0".into();

        let result = assert_ok!(session.submit().await).clone();
        assert_eq!(result.config, "hostname SW-HQ-01\n!");
        assert_eq!(result.vendor, "cisco");
        assert!(session.ui().result_visible);
        assert_eq!(recorder.last()["mgmt_interface"], "Gi1/0/1");

        assert!(assert_ok!(session.copy().await));

        let path = assert_ok!(session.download().await).unwrap();
        assert_eq!(path.file_name().unwrap(), "SW-HQ-01_cisco_config.txt");
        assert_eq!(
            recorder.last(),
            json!({"config": "hostname SW-HQ-01\n!", "hostname": "SW-HQ-01", "vendor": "cisco"})
        );

        session.reset();
        assert!(session.result().is_none());
        assert_eq!(session.visibility(), FieldVisibility::hidden());
        assert_eq!(session.form().hostname, "");
        assert_eq!(session.form().api_key, "sk-flow");
        assert_eq!(session.ui().key_status, KeyStatus::Saved);
        assert!(!session.ui().result_visible);

        // Nothing held any more: both actions are no-ops
        let hits = recorder.hits();
        assert!(!assert_ok!(session.copy().await));
        assert!(assert_ok!(session.download().await).is_none());
        assert_eq!(recorder.hits(), hits);
    }

    #[tokio::test]
    async fn test_failed_submit_discards_previous_result() {
        let recorder = Recorder::default();
        let url = generator_stub(recorder.clone()).await;
        let dir = tempfile::tempdir().unwrap();
        let mut session = open_session(&url, Arc::new(MemoryCredentialStore::default()), dir.path());

        session.select_vendor("fortinet");
        session.set_api_key("sk-flow");
        session.set_requirements("branch firewall with SD-WAN");
        assert_ok!(session.submit().await);
        assert_eq!(recorder.last()["mgmt_port"], "port1");
        assert!(session.result().is_some());

        session.set_requirements("");
        let err = assert_err!(session.submit().await);
        assert!(err.is_local());
        assert!(session.result().is_none());
        let ui = session.ui();
        assert!(!ui.result_visible);
        assert!(ui.error_message.unwrap().contains("subnet mask"));
        assert_eq!(recorder.hits(), 1);
    }

    #[test]
    fn test_requirements_toggle_markers() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open_session(
            "http://127.0.0.1:1",
            Arc::new(MemoryCredentialStore::default()),
            dir.path(),
        );
        assert!(session.required_markers().mgmt_ip);
        assert!(!session.set_requirements("uplink on port 48").mgmt_ip);
        assert!(session.set_requirements("").mgmt_mask);

        session.form_mut().mgmt_ip = "10.0.0".into();
        assert_eq!(session.warnings(), vec!["Enter a valid IP address (e.g. 192.168.1.1)".to_string()]);
    }
}

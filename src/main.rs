use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use script_forge::actions::SystemClipboard;
use script_forge::cli::{Cli, Command, GenerateArgs, KeyAction};
use script_forge::client::GeneratorClient;
use script_forge::config::Config;
use script_forge::credentials::{
    is_valid_key_format, CredentialStore, FileCredentialStore, KEY_PREFIX,
};
use script_forge::session::FormSession;
use script_forge::submission::{SharedUi, Submitter};
use script_forge::{models, router, utils, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout is reserved for generated scripts
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "script_forge=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut cfg = Config::load();
    cli.apply_overrides(&mut cfg);

    match cli.command {
        Command::Generate(args) => run_generate(&cfg, args).await,
        Command::Key { action } => run_key(&cfg, action),
        Command::Vendors => {
            print_vendors();
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve { .. } => {
            serve(cfg).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_generate(cfg: &Config, args: GenerateArgs) -> anyhow::Result<ExitCode> {
    let ui = SharedUi::default();
    let client = GeneratorClient::new(&cfg.generator_url)?;
    tracing::info!("Generator: {}", client.base_url());
    let submitter = Arc::new(Submitter::new(client, cfg.request_timeout, ui.clone()));
    let store: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(&cfg.credentials_path));
    let mut session = FormSession::open(
        submitter,
        ui,
        store,
        Arc::new(SystemClipboard),
        &cfg.download_dir,
        cfg.copy_ack_delay,
    );

    if !session.select_vendor(&args.vendor).any_shown() {
        tracing::warn!("Unknown vendor '{}': no vendor defaults applied", args.vendor);
    }
    args.apply_to(session.form_mut());
    if let Some(key) = &args.api_key {
        session.set_api_key(key);
        session.blur_api_key();
    }
    for warning in session.warnings() {
        tracing::warn!("{}", warning);
    }

    let outcome = session.submit().await.map(|result| result.config.clone());
    match outcome {
        Ok(config) => println!("{}", config),
        Err(e) => {
            let message = session
                .ui()
                .error_message
                .unwrap_or_else(|| format!("Error: {}", e));
            eprintln!("{}", message);
            return Ok(ExitCode::FAILURE);
        }
    }

    let mut code = ExitCode::SUCCESS;

    if args.copy {
        match session.copy().await {
            Ok(true) => eprintln!("Copied to clipboard"),
            Ok(false) => {}
            Err(e) => {
                eprintln!("{}", e);
                code = ExitCode::FAILURE;
            }
        }
    }

    if args.download {
        match session.download().await {
            Ok(Some(path)) => eprintln!("Saved {}", path.display()),
            Ok(None) => eprintln!("Nothing to download: the server returned no hostname"),
            Err(e) => {
                eprintln!("Error: {}", e);
                code = ExitCode::FAILURE;
            }
        }
    }

    Ok(code)
}

fn run_key(cfg: &Config, action: KeyAction) -> anyhow::Result<ExitCode> {
    let store = FileCredentialStore::new(&cfg.credentials_path);
    match action {
        KeyAction::Save { key } => {
            let key = key.trim();
            if !is_valid_key_format(key) {
                eprintln!("Error: Invalid OpenAI API key format (must start with {})", KEY_PREFIX);
                return Ok(ExitCode::FAILURE);
            }
            store.save(key)?;
            eprintln!("API key saved to {}", store.path().display());
        }
        KeyAction::Show => {
            let key = store.load();
            if key.is_empty() {
                println!("No API key stored");
            } else {
                println!("{}", utils::mask_secret(&key));
            }
        }
        KeyAction::Clear => {
            store.clear()?;
            eprintln!("API key removed");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_vendors() {
    println!("{:<10} {:<16} {:<6} {:<12} {:<8} GATEWAY", "ID", "NAME", "VLAN", "INTERFACE", "PORT");
    for profile in models::vendor_profiles() {
        println!(
            "{:<10} {:<16} {:<6} {:<12} {:<8} {}",
            profile.id,
            profile.display_name,
            profile.default_vlan.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
            profile.default_interface.unwrap_or("-"),
            profile.default_port.unwrap_or("-"),
            profile.default_gateway,
        );
    }
}

async fn serve(cfg: Config) -> anyhow::Result<()> {
    tracing::info!("Starting ScriptForge server");
    tracing::info!("Frontend: {}", cfg.frontend_dir);
    match cfg.upstream() {
        Some(upstream) => tracing::info!("Upstream generator: {}", upstream),
        None => tracing::warn!("UPSTREAM_URL not set - /api/generate and /api/download will return 503"),
    }

    let listen_addr = cfg.listen_addr.clone();
    let frontend_dir = cfg.frontend_dir.clone();
    let state = Arc::new(AppState::new(cfg)?);
    let app = router::build(state, &frontend_dir);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    tracing::info!("ScriptForge listening on {}", listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("ScriptForge shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

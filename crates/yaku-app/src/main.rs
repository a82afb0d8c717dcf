use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use yaku_config::{Config, Provider};
use yaku_core::{SessionOptions, TranslationSession, user_message};
use yaku_io::SystemClipboard;
use yaku_translator::{TranslationService, Translator};
use yaku_types::{Language, TranslationRequest};

pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod state;
pub mod ui;


use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(author, version, about = "Translate text through an LLM chat-completion API", long_about = None)]
struct Cli {
    /// Text to translate once; omit for interactive mode
    text: Option<String>,

    /// Source language code (en, zh, ja, ko, fr, de, es, ru, ar, pt)
    #[arg(short, long)]
    from: Option<Language>,

    /// Target language code
    #[arg(short, long)]
    to: Option<Language>,

    /// JSON profile to load
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Provider preset (deepseek, openai)
    #[arg(long)]
    provider: Option<Provider>,

    /// Override the chat-completion endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Override the model name
    #[arg(long)]
    model: Option<String>,

    /// Disable debounced auto-translation in interactive mode
    #[arg(long)]
    no_auto: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Write a default profile to FILE and exit
    #[arg(long, value_name = "FILE")]
    init_config: Option<PathBuf>,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn apply_cli(config: &mut Config, cli: &Cli) {
    if let Some(provider) = cli.provider
        && provider != config.translator.provider
    {
        config.translator.provider = provider;
        config.translator.reset_to_defaults();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.translator.endpoint_url = endpoint.clone();
    }
    if let Some(model) = &cli.model {
        config.translator.model_name = model.clone();
    }
    if let Some(from) = cli.from {
        config.session.source_language = from;
    }
    if let Some(to) = cli.to {
        config.session.target_language = to;
    }
    if cli.no_auto {
        config.session.auto_translate = false;
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    if let Some(path) = &cli.init_config {
        profile::write_default_profile(path)?;
        println!("Wrote {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = profile::load_profile(cli.config.as_deref())?;
    apply_cli(&mut config, &cli);

    let state = AppState::new(config);
    let service = TranslationService::from_config(&state.config.translator)?;

    match &cli.text {
        Some(text) => translate_once(&state, &service, text).await,
        None => {
            run_interactive(state, Arc::new(service)).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn translate_once(
    state: &AppState,
    service: &impl Translator,
    text: &str,
) -> anyhow::Result<ExitCode> {
    if text.trim().is_empty() {
        anyhow::bail!("nothing to translate");
    }

    let request = TranslationRequest::new(
        text,
        state.config.session.source_language,
        state.config.session.target_language,
    );
    let settings = state.settings.read().await.clone();

    match service.translate(&request, settings.as_ref()).await {
        Ok(response) => {
            println!("{}", response.translated_text);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", user_message(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_interactive(
    state: AppState,
    translator: Arc<dyn Translator>,
) -> anyhow::Result<()> {
    let session = TranslationSession::new(
        translator,
        state.settings.clone(),
        Arc::new(SystemClipboard::new()),
        state.config.session.source_language,
        state.config.session.target_language,
        SessionOptions::from(&state.config.session),
    );

    if atty::is(atty::Stream::Stdin) {
        println!(
            "{} → {} ({}). {}",
            state.config.session.source_language,
            state.config.session.target_language,
            state.config.translator.provider,
            events::parse::HELP
        );
    }

    let controller = AppController::new(session);
    io::spawn_stdin_reader(controller.input_sender())?;
    let mut tasks = controller.spawn_tasks();

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                controller.shutdown();
            }
            joined = tasks.join_next() => match joined {
                None => break,
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(e))) => tracing::error!("task exited: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
            },
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;
mod render;
mod repl;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pdfchat_client::config::ConfigError;
use pdfchat_client::state::settings::{ChatMode, Settings};
use pdfchat_client::{ApiClient, ApiError, ChatApp, ClientConfig, Outcome, PdfUpload};
use serde_json::{Value, json};
use tracing::Level;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing API key; pass --api-key or set PDFCHAT_API_KEY")]
    MissingApiKey,
    #[error("{0} is not a .pdf file")]
    NotPdf(PathBuf),
    #[error("failed to read {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    Failed(String),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "pdfchat", about = "Chat with a PDF through the pdfchat API")]
struct Cli {
    /// API root; overrides PDFCHAT_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, env = "PDFCHAT_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model for streamed chat; overrides PDFCHAT_MODEL.
    #[arg(long)]
    model: Option<String>,

    /// Print one-shot results as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log more to stderr (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Health,
    Upload {
        file: PathBuf,
    },
    Ask {
        #[arg(long)]
        session_id: String,
        #[arg(long, default_value = "standard")]
        mode: ChatMode,
        question: String,
    },
    Chat {
        #[arg(long)]
        developer_message: Option<String>,
        message: String,
    },
    Repl,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(log_level(cli.verbose))
        .init();
    if let Err(err) = dotenv
        && !err.not_found()
    {
        tracing::warn!(error = %err, "failed to load .env");
    }

    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    tracing::debug!(base_url = %config.base_url, model = %config.model, "client configured");

    let backend = ApiClient::new(&config)?;
    let mut app = ChatApp::new(backend, Settings::default().with_model(config.model));
    if let Some(key) = cli.api_key {
        app.set_api_key(key);
    }

    match cli.command.unwrap_or(Command::Repl) {
        Command::Health => run_health(&app, cli.json).await,
        Command::Upload { file } => run_upload(&mut app, &file, cli.json).await,
        Command::Ask { session_id, mode, question } => {
            app.session.resume(session_id);
            app.settings.mode = mode;
            run_ask(&mut app, &question, cli.json).await
        }
        Command::Chat { developer_message, message } => {
            if let Some(developer_message) = developer_message {
                app.settings.developer_message = developer_message;
            }
            run_chat(&mut app, &message, cli.json).await
        }
        Command::Repl => {
            tracing::info!(base_url = %app.backend().base_url(), "starting interactive session");
            Ok(repl::run(&mut app).await?)
        }
    }
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

async fn run_health(app: &ChatApp<ApiClient>, as_json: bool) -> Result<(), CliError> {
    let status = app.health().await?;
    if as_json {
        print_json(&json!({ "status": status }))
    } else {
        println!("{status}");
        Ok(())
    }
}

async fn run_upload(app: &mut ChatApp<ApiClient>, file: &Path, as_json: bool) -> Result<(), CliError> {
    if !PdfUpload::accepts(file) {
        return Err(CliError::NotPdf(file.to_path_buf()));
    }
    let document = PdfUpload::from_path(file).map_err(|source| CliError::ReadFile { path: file.to_path_buf(), source })?;
    match app.upload(&document).await {
        Outcome::Succeeded => {}
        Outcome::Skipped => return Err(CliError::MissingApiKey),
        Outcome::Failed => return Err(CliError::Failed(app.session.error.clone().unwrap_or_default())),
    }
    let session_id = app.session.session_id.clone().unwrap_or_default();
    if as_json {
        print_json(&json!({ "session_id": session_id, "file_name": document.file_name }))
    } else {
        println!("{session_id}");
        Ok(())
    }
}

async fn run_ask(app: &mut ChatApp<ApiClient>, question: &str, as_json: bool) -> Result<(), CliError> {
    if !app.has_api_key() {
        return Err(CliError::MissingApiKey);
    }
    match app.ask(question).await {
        Outcome::Succeeded => {}
        Outcome::Skipped => return Err(CliError::Failed("question is empty".to_owned())),
        Outcome::Failed => return Err(CliError::Failed(app.chat.error.clone().unwrap_or_default())),
    }
    let answer = app.chat.answer.clone().unwrap_or_default();
    if as_json {
        print_json(&json!({ "answer": answer }))
    } else {
        println!("{answer}");
        Ok(())
    }
}

async fn run_chat(app: &mut ChatApp<ApiClient>, message: &str, as_json: bool) -> Result<(), CliError> {
    if !app.has_api_key() {
        return Err(CliError::MissingApiKey);
    }
    let mut stdout = io::stdout();
    let mut write_error = None;
    let outcome = app
        .send_streaming(message, |chunk| {
            if as_json || write_error.is_some() {
                return;
            }
            if let Err(error) = stdout.write_all(chunk.as_bytes()).and_then(|()| stdout.flush()) {
                write_error = Some(error);
            }
        })
        .await;
    if let Some(error) = write_error {
        return Err(error.into());
    }
    match outcome {
        Outcome::Succeeded => {}
        Outcome::Skipped => return Err(CliError::Failed("message is empty".to_owned())),
        Outcome::Failed => return Err(CliError::Failed(app.chat.error.clone().unwrap_or_default())),
    }
    if as_json {
        let answer = app.chat.messages.last().map(|m| m.content.clone()).unwrap_or_default();
        print_json(&json!({ "answer": answer }))
    } else {
        writeln!(stdout)?;
        Ok(())
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

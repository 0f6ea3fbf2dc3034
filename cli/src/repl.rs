//! Interactive chat session over stdin/stdout.
//!
//! DESIGN
//! ======
//! Each input line parses into a [`ReplCommand`]; [`execute`] applies it to
//! the shared [`ChatApp`] and writes the visible result. Parsing and
//! execution are separate so both can be tested without a terminal.

#[cfg(test)]
#[path = "repl_test.rs"]
mod repl_test;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use pdfchat_client::state::settings::{ChatMode, UnknownMode};
use pdfchat_client::{ChatApp, ChatBackend, Outcome, PdfUpload};

use crate::render::{self, Action};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Key(String),
    /// `/key` with no argument.
    ForgetKey,
    Upload(PathBuf),
    Ask(String),
    Send(String),
    /// A bare line; routed by the streaming setting.
    Question(String),
    Mode(ChatMode),
    Model(String),
    Developer(String),
    Streaming(bool),
    Settings,
    History,
    Clear,
    Health,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command: /{0} (try /help)")]
    Unknown(String),
    #[error("/{0} needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Mode(#[from] UnknownMode),
    #[error("expected on or off, got '{0}'")]
    OnOff(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parse one input line.
///
/// # Errors
///
/// Returns [`ParseError`] for unknown commands or missing/invalid arguments.
pub fn parse_line(line: &str) -> Result<ReplCommand, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ReplCommand::Empty);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(ReplCommand::Question(line.to_owned()));
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "key" if arg.is_empty() => ReplCommand::ForgetKey,
        "key" => ReplCommand::Key(arg.to_owned()),
        "upload" => ReplCommand::Upload(PathBuf::from(required("upload", arg)?)),
        "ask" => ReplCommand::Ask(required("ask", arg)?.to_owned()),
        "send" => ReplCommand::Send(required("send", arg)?.to_owned()),
        "mode" => ReplCommand::Mode(required("mode", arg)?.parse()?),
        "model" => ReplCommand::Model(required("model", arg)?.to_owned()),
        "dev" => ReplCommand::Developer(required("dev", arg)?.to_owned()),
        "stream" => ReplCommand::Streaming(parse_on_off(required("stream", arg)?)?),
        "settings" => ReplCommand::Settings,
        "history" => ReplCommand::History,
        "clear" => ReplCommand::Clear,
        "health" => ReplCommand::Health,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => return Err(ParseError::Unknown(other.to_owned())),
    };
    Ok(command)
}

fn required<'a>(command: &'static str, arg: &'a str) -> Result<&'a str, ParseError> {
    if arg.is_empty() { Err(ParseError::MissingArgument(command)) } else { Ok(arg) }
}

fn parse_on_off(raw: &str) -> Result<bool, ParseError> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(ParseError::OnOff(raw.to_owned())),
    }
}

/// Apply `command` to `app`, writing user-visible output to `out`.
///
/// # Errors
///
/// Returns an error only when writing to `out` fails.
pub async fn execute<B, W>(app: &mut ChatApp<B>, command: ReplCommand, out: &mut W) -> io::Result<Flow>
where
    B: ChatBackend,
    W: Write + Send,
{
    match command {
        ReplCommand::Empty => {}
        ReplCommand::Key(secret) => {
            app.set_api_key(secret);
            writeln!(out, "API key set.")?;
        }
        ReplCommand::ForgetKey => {
            app.clear_api_key();
            writeln!(out, "API key cleared.")?;
        }
        ReplCommand::Upload(path) => upload(app, &path, out).await?,
        ReplCommand::Ask(question) => ask(app, &question, out).await?,
        ReplCommand::Send(message) => send(app, &message, out).await?,
        ReplCommand::Question(text) => {
            if app.settings.streaming {
                send(app, &text, out).await?;
            } else {
                ask(app, &text, out).await?;
            }
        }
        ReplCommand::Mode(mode) => {
            app.settings.mode = mode;
            writeln!(out, "{}", render::mode_changed(mode))?;
        }
        ReplCommand::Model(model) => {
            writeln!(out, "model: {model}")?;
            app.settings.model = model;
        }
        ReplCommand::Developer(message) => {
            writeln!(out, "developer message: {message}")?;
            app.settings.developer_message = message;
        }
        ReplCommand::Streaming(on) => {
            app.settings.streaming = on;
            writeln!(out, "streaming: {}", if on { "on" } else { "off" })?;
        }
        ReplCommand::Settings => writeln!(out, "{}", render::settings(&app.settings))?,
        ReplCommand::History => writeln!(out, "{}", render::history(&app.chat))?,
        ReplCommand::Clear => {
            app.clear_chat();
            writeln!(out, "Chat cleared.")?;
        }
        ReplCommand::Health => match app.health().await {
            Ok(status) => writeln!(out, "server: {status}")?,
            Err(error) => writeln!(out, "health check failed: {error}")?,
        },
        ReplCommand::Help => writeln!(out, "{}", render::HELP)?,
        ReplCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn refuse<B: ChatBackend, W: Write>(app: &ChatApp<B>, action: Action, out: &mut W) -> io::Result<bool> {
    match render::disabled_reason(action, app.controls(), app.has_api_key(), &app.session) {
        Some(reason) => {
            writeln!(out, "{reason}")?;
            Ok(true)
        }
        None => Ok(false),
    }
}

async fn upload<B: ChatBackend, W: Write + Send>(
    app: &mut ChatApp<B>,
    path: &std::path::Path,
    out: &mut W,
) -> io::Result<()> {
    if refuse(app, Action::Upload, out)? {
        return Ok(());
    }
    let document = match PdfUpload::from_path(path) {
        Ok(document) => document,
        Err(error) => {
            writeln!(out, "Upload failed: {error}")?;
            return Ok(());
        }
    };
    writeln!(out, "Uploading {}...", document.file_name)?;
    app.upload(&document).await;
    writeln!(out, "{}", render::session(&app.session))
}

async fn ask<B: ChatBackend, W: Write + Send>(app: &mut ChatApp<B>, question: &str, out: &mut W) -> io::Result<()> {
    if refuse(app, Action::Ask, out)? {
        return Ok(());
    }
    match app.ask(question).await {
        Outcome::Succeeded => {
            if let Some(answer) = app.chat.messages.last() {
                writeln!(out, "{}", render::message(answer))?;
            }
        }
        Outcome::Failed => writeln!(out, "{}", app.chat.error.as_deref().unwrap_or("Chat failed"))?,
        Outcome::Skipped => {}
    }
    Ok(())
}

async fn send<B: ChatBackend, W: Write + Send>(app: &mut ChatApp<B>, message: &str, out: &mut W) -> io::Result<()> {
    if refuse(app, Action::Send, out)? {
        return Ok(());
    }
    write!(out, "{}> ", render::speaker(pdfchat_client::state::chat::Role::Assistant))?;
    out.flush()?;

    let mut write_error = None;
    let outcome = app
        .send_streaming(message, |chunk| {
            if write_error.is_some() {
                return;
            }
            if let Err(error) = out.write_all(chunk.as_bytes()).and_then(|()| out.flush()) {
                write_error = Some(error);
            }
        })
        .await;
    if let Some(error) = write_error {
        return Err(error);
    }
    writeln!(out)?;
    if outcome == Outcome::Failed {
        writeln!(out, "{}", app.chat.error.as_deref().unwrap_or("Chat failed"))?;
    }
    Ok(())
}

/// Run the interactive loop until `/quit` or end of input.
///
/// # Errors
///
/// Returns an error when reading stdin or writing stdout fails.
pub async fn run<B: ChatBackend>(app: &mut ChatApp<B>) -> io::Result<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "pdfchat: type /help for commands.")?;
    if !app.has_api_key() {
        writeln!(stdout, "No API key set; use /key <secret>.")?;
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        let Some(line) = lines.next() else {
            writeln!(stdout)?;
            return Ok(());
        };
        let command = match parse_line(&line?) {
            Ok(command) => command,
            Err(error) => {
                writeln!(stdout, "{error}")?;
                continue;
            }
        };
        if execute(app, command, &mut stdout).await? == Flow::Quit {
            return Ok(());
        }
    }
}

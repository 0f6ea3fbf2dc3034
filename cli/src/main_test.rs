use super::*;

#[test]
fn verbosity_maps_to_level() {
    assert_eq!(log_level(0), Level::WARN);
    assert_eq!(log_level(1), Level::INFO);
    assert_eq!(log_level(2), Level::DEBUG);
    assert_eq!(log_level(9), Level::DEBUG);
}

#[test]
fn no_subcommand_means_repl() {
    let cli = Cli::try_parse_from(["pdfchat"]).unwrap();
    assert!(cli.command.is_none());
    assert!(!cli.json);
}

#[test]
fn ask_parses_mode_and_session() {
    let cli = Cli::try_parse_from([
        "pdfchat",
        "--base-url",
        "http://localhost:9000",
        "-vv",
        "ask",
        "--session-id",
        "abc",
        "--mode",
        "concise",
        "what is this?",
    ])
    .unwrap();

    assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000"));
    assert_eq!(cli.verbose, 2);
    match cli.command {
        Some(Command::Ask { session_id, mode, question }) => {
            assert_eq!(session_id, "abc");
            assert_eq!(mode, ChatMode::Concise);
            assert_eq!(question, "what is this?");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn ask_mode_defaults_to_standard() {
    let cli = Cli::try_parse_from(["pdfchat", "ask", "--session-id", "abc", "q"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Ask { mode: ChatMode::Standard, .. })));
}

#[test]
fn unknown_mode_is_rejected() {
    assert!(Cli::try_parse_from(["pdfchat", "ask", "--session-id", "abc", "--mode", "loud", "q"]).is_err());
}

#[test]
fn chat_takes_optional_developer_message() {
    let cli = Cli::try_parse_from(["pdfchat", "--json", "chat", "--developer-message", "Be terse.", "hi"]).unwrap();
    assert!(cli.json);
    match cli.command {
        Some(Command::Chat { developer_message, message }) => {
            assert_eq!(developer_message.as_deref(), Some("Be terse."));
            assert_eq!(message, "hi");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn failures_display_bare_message() {
    let err = CliError::Failed("Chat failed: boom".to_owned());
    assert_eq!(err.to_string(), "Chat failed: boom");
    assert_eq!(CliError::NotPdf(PathBuf::from("notes.txt")).to_string(), "notes.txt is not a .pdf file");
}

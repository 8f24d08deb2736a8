//! Command-level error mapping: what reaches the user after a command fails

mod common;

use std::sync::Arc;

use serde_json::json;

use common::*;
use shortlink_client::cli::Commands;
use shortlink_client::config::StaticConfig;
use shortlink_client::flows::GENERIC_FAILURE_MESSAGE;
use shortlink_client::interfaces::cli::{CliContext, CliError, run_cli_command};

fn context(transport: Arc<ScriptedTransport>, signed_in: bool) -> CliContext {
    let session = if signed_in {
        signed_in_session()
    } else {
        signed_out_session()
    };
    CliContext::new(
        api_client(transport, session),
        MemoryClipboard::new(),
        Arc::new(StaticConfig::default()),
    )
}

fn login() -> Commands {
    Commands::Login {
        email: Some("ada@example.com".into()),
        password: Some("hunter22".into()),
    }
}

#[tokio::test]
async fn test_stats_failure_is_not_reported_twice() {
    let transport = ScriptedTransport::new();
    transport.respond(404, json!({"error": "URL not found"}));
    transport.respond_raw(500, "");
    let ctx = context(transport.clone(), true);

    for _ in 0..2 {
        let err = run_cli_command(
            Commands::Stats {
                short_code: "abc".into(),
            },
            &ctx,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::Rendered), "got {:?}", err);
    }
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_login_failure_without_backend_message_is_generic() {
    let transport = ScriptedTransport::new();
    transport.respond_raw(500, "");
    transport.fail("connection refused");
    let ctx = context(transport, false);

    for _ in 0..2 {
        match run_cli_command(login(), &ctx).await {
            Err(CliError::RequestError(msg)) => assert_eq!(msg, GENERIC_FAILURE_MESSAGE),
            other => panic!("expected request error, got {:?}", other),
        }
    }
    assert!(!ctx.api.session().is_signed_in());
}

#[tokio::test]
async fn test_register_failure_shows_backend_message() {
    let transport = ScriptedTransport::new();
    transport.respond(409, json!({"error": "Email already registered"}));
    let ctx = context(transport, false);

    let err = run_cli_command(
        Commands::Register {
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: Some("hunter22".into()),
        },
        &ctx,
    )
    .await
    .unwrap_err();
    match err {
        CliError::RequestError(msg) => {
            assert_eq!(msg, "Email already registered");
            assert!(!msg.contains("409"));
        }
        other => panic!("expected request error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_register_missing_fields_is_parse_error() {
    let ctx = context(ScriptedTransport::new(), false);
    let err = run_cli_command(
        Commands::Register {
            username: " ".into(),
            email: "ada@example.com".into(),
            password: Some("hunter22".into()),
        },
        &ctx,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CliError::ParseError(_)));
}

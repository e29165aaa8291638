//! Discharge Assistant — server entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Resolve effective log level (CLI `-v` flags > env > config)
//!   4. Init logger once
//!   5. Build the provider and prompt template
//!   6. `--check`: probe the provider and exit
//!   7. Spawn Ctrl-C → shutdown signal watcher
//!   8. Serve HTTP until shutdown

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use discharge_assistant::config::{self, API_KEY_ENV_VARS};
use discharge_assistant::error::AppError;
use discharge_assistant::llm::{LlmProvider, providers};
use discharge_assistant::logger;
use discharge_assistant::summary::{PromptTemplate, SummaryService};
use discharge_assistant::web::{AppState, WebServer};

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
    bind: Option<String>,
    check: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // .env is optional.
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let mut config = config::load(args.config_path.as_deref())?;
    if let Some(bind) = args.bind {
        config.http.bind = bind;
    }

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    logger::init(effective_log_level, args.log_level.is_some(), config.log_file.as_deref())?;

    info!(
        app_name = %config.app_name,
        bind = %config.http.bind,
        provider = %config.llm.provider,
        configured_log_level = %config.log_level,
        effective_log_level = %effective_log_level,
        "config loaded"
    );

    let provider = providers::build(&config.llm, config.llm_api_key.clone())?;
    if config.llm_api_key.is_none() && !matches!(provider, LlmProvider::Dummy(_)) {
        warn!(
            provider = provider.name(),
            "no API key in {} — generation requests will fail",
            API_KEY_ENV_VARS.join(" / ")
        );
    }

    if args.check {
        return check_provider(&provider).await;
    }

    let template = PromptTemplate::load(config.summary.prompt_file.as_deref())?;
    let state = AppState::new(config.app_name.as_str(), SummaryService::new(provider, template));

    // Shared shutdown token — Ctrl-C cancels it, the server watches it.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received — initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    WebServer::new(config.http.bind.clone(), state).run(shutdown).await
}

/// Probe the configured provider: reachability, available models, and one
/// tiny generation. Prints a report and fails on the first hard error.
async fn check_provider(provider: &LlmProvider) -> Result<(), AppError> {
    println!("provider: {} (model {})", provider.name(), provider.model());

    provider.ping().await?;
    println!("✓ reachable");

    match provider.list_models().await {
        Ok(models) => {
            println!("available models:");
            for m in models {
                println!("  - {m}");
            }
        }
        Err(e) => println!("  (model listing unavailable: {e})"),
    }

    let reply = provider.complete("Say hello").await?;
    println!("✓ generation ok: {}", reply.text);
    Ok(())
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;
    let mut bind = None;
    let mut check = false;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: discharge-assistant [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -b, --bind <ADDR>          Listen address (overrides config and DISCHARGE_BIND)");
                println!("      --check                Probe the LLM provider and exit");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                std::process::exit(0);
            }
            "-f" | "--config" => match iter.next() {
                Some(path) => config_path = Some(path),
                None => {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            },
            "-b" | "--bind" => match iter.next() {
                Some(addr) => bind = Some(addr),
                None => {
                    eprintln!("error: -b/--bind requires an address argument");
                    std::process::exit(1);
                }
            },
            "--check" => check = true,
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => {}
        }
    }

    CliArgs {
        log_level: logger::verbosity_level(verbosity),
        config_path,
        bind,
        check,
    }
}

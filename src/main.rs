use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use httpdconf::{BuildpackInfo, Cli, Invocation, Outcome, handle};

/// Exit code the lifecycle reads as "detection did not pass".
const DETECT_FAIL: i32 = 100;

/// Default filter from `BP_LOG_LEVEL`; `RUST_LOG` wins when set.
fn init_logging() {
    let level = match std::env::var("BP_LOG_LEVEL") {
        Ok(v) if v.eq_ignore_ascii_case("debug") => "debug",
        _ => "info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let inv = Invocation {
        env_vars: std::env::vars().collect(),
        cli_overrides: cli.overrides.to_pairs(),
        buildpack: BuildpackInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };
    let action = cli.into_action();

    match handle(&action, &inv) {
        Ok(Outcome::Skipped { reason }) => {
            eprintln!("{reason}");
            std::process::exit(DETECT_FAIL);
        }
        Ok(outcome) => println!("{outcome}"),
        Err(e) => {
            eprintln!("Error:\n{e}");
            std::process::exit(1);
        }
    }
}

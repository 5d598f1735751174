mod state;

use crate::state::app_settings::{AppSettings, DEFAULT_SETTINGS_PATH};
use crate::state::messages::{NetworkRequest, NetworkResponse};
use crate::state::network::NetworkWorker;
use crate::state::refresher::PeriodicRefresher;
use anyhow::Context;
use chrono::{Local, NaiveDate};
use log::{LevelFilter, info, warn};
use scorepanel_api::ClockFormat;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

const CONFIG_ENV: &str = "SCOREPANEL_CONFIG";

#[derive(Debug, Default, PartialEq, Eq)]
struct RunOptions {
    config: Option<PathBuf>,
    date: Option<NaiveDate>,
}

#[derive(Debug, PartialEq, Eq)]
enum CliAction {
    Help,
    Version,
    Run(RunOptions),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(options) = handle_cli_args() else {
        return Ok(());
    };

    better_panic::install();

    let config_path = options
        .config
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    let settings = AppSettings::load(&config_path)?;
    init_logger(settings.log_level);

    if settings.instances.is_empty() {
        warn!("no instances configured in {}", config_path.display());
        return Ok(());
    }
    let settings = Arc::new(settings);

    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Network thread
    let network_worker = NetworkWorker::new(network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // A pinned date is a one-shot query; otherwise refresh when configured.
    let refresh = if options.date.is_some() { None } else { settings.refresh };
    let today = options.date.unwrap_or_else(|| Local::now().date_naive());

    let initial = settings.requests(today);
    let expected = initial.len();
    info!(
        "requesting {expected} scorepanel(s) for {} ({}h clock)",
        today.format("%Y%m%d"),
        if settings.clock == ClockFormat::H24 { 24 } else { 12 }
    );
    for request in initial {
        network_req_tx.send(request).await.context("network worker stopped")?;
    }

    let periodic_task = refresh.map(|period| {
        let refresher = PeriodicRefresher::new(settings.clone(), period, network_req_tx.clone());
        tokio::spawn(refresher.run())
    });

    let result = output_loop(network_resp_rx, refresh.is_none().then_some(expected)).await;

    network_task.abort();
    if let Some(task) = periodic_task {
        task.abort();
    }

    result
}

fn handle_cli_args() -> Option<RunOptions> {
    match parse_args(std::env::args().skip(1)) {
        Ok(CliAction::Help) => {
            println!("{}", usage_text());
            None
        }
        Ok(CliAction::Version) => {
            println!("scorepanel {}", env!("CARGO_PKG_VERSION"));
            None
        }
        Ok(CliAction::Run(options)) => Some(options),
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliAction, String> {
    let mut options = RunOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliAction::Help),
            "-V" | "--version" => return Ok(CliAction::Version),
            "-c" | "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                options.config = Some(PathBuf::from(path));
            }
            "-d" | "--date" => {
                let value = args.next().ok_or("--date needs a YYYYMMDD value")?;
                let date = NaiveDate::parse_from_str(&value, "%Y%m%d")
                    .map_err(|_| format!("Invalid date: {value} (expected YYYYMMDD)"))?;
                options.date = Some(date);
            }
            _ => return Err(format!("Unknown argument: {arg}")),
        }
    }

    Ok(CliAction::Run(options))
}

fn usage_text() -> &'static str {
    "scorepanel - ESPN scoreboard feeds as display-ready game records

Usage:
  scorepanel [--config <path>] [--date YYYYMMDD]
  scorepanel --help
  scorepanel --version

Options:
  -c, --config <path>   Settings file (default scorepanel.json)
  -d, --date YYYYMMDD   Fetch one day once and exit

Environment:
  SCOREPANEL_CONFIG   Settings file when --config is not given
  RUST_LOG            Log filter, overrides logLevel from the settings"
}

/// Logs go to stderr; stdout carries only score updates.
fn init_logger(level: Option<LevelFilter>) {
    let default = level.unwrap_or(LevelFilter::Warn).as_str().to_lowercase();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Print each update as one JSON line. With `remaining` set, stop after that
/// many updates; otherwise run until interrupted.
async fn output_loop(
    mut network_responses: mpsc::Receiver<NetworkResponse>,
    mut remaining: Option<usize>,
) -> anyhow::Result<()> {
    loop {
        if remaining == Some(0) {
            return Ok(());
        }

        tokio::select! {
            response = network_responses.recv() => {
                let Some(response) = response else {
                    return Ok(());
                };
                print_response(&response)?;
                if let Some(n) = remaining.as_mut() {
                    *n -= 1;
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, shutting down");
                return Ok(());
            }
        }
    }
}

fn print_response(response: &NetworkResponse) -> anyhow::Result<()> {
    let NetworkResponse::ScoreUpdate(update) = response;
    let line = serde_json::to_string(update)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{line}")?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_config_and_date() {
        let action = parse_args(args(&["--config", "panel.json", "-d", "20240316"])).unwrap();
        assert_eq!(
            action,
            CliAction::Run(RunOptions {
                config: Some(PathBuf::from("panel.json")),
                date: NaiveDate::from_ymd_opt(2024, 3, 16),
            })
        );
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse_args(args(&["--help", "--bogus"])), Ok(CliAction::Help));
        assert_eq!(parse_args(args(&["-V"])), Ok(CliAction::Version));
        assert_eq!(parse_args(args(&[])), Ok(CliAction::Run(RunOptions::default())));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(args(&["--date", "2024-03-16"])).is_err());
        assert!(parse_args(args(&["--config"])).is_err());
        assert!(parse_args(args(&["--loud"])).is_err());
    }
}

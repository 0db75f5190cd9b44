use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use simple_logger::SimpleLogger;

use fbref_pizza::cohort::MINUTE_OPTIONS;
use fbref_pizza::config::PizzaConfig;
use fbref_pizza::dataset::{SEASONS, SeasonStore, leagues};
use fbref_pizza::error::PizzaError;
use fbref_pizza::pipeline::{PizzaReport, PizzaRequest, players_for_request, run_pizza};
use fbref_pizza::pizza_export;
use fbref_pizza::stat_columns::Position;

const USAGE: &str = "usage: fbref_pizza [--season S] [--league L] [--position FW|MF|DF] \
[--minutes N] [--squad S] [--player P] [--no-per90] [--data DIR] [--json PATH] [--xlsx PATH]";

fn main() -> Result<ExitCode> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = PizzaConfig::from_env();
    if let Some(dir) = flag_value(&args, "--data") {
        config.data_dir = PathBuf::from(dir);
    }
    SimpleLogger::new()
        .with_level(config.log_level)
        .init()
        .context("init logger")?;

    match run(&args, &config) {
        Ok(report) => {
            print_report(&report);
            export(&args, &report)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) if err.is_reportable() => {
            eprintln!("[WARN] {err}");
            Ok(ExitCode::from(2))
        }
        Err(err) => Err(err.into()),
    }
}

fn run(args: &[String], config: &PizzaConfig) -> Result<PizzaReport, PizzaError> {
    let season = flag_value(args, "--season").unwrap_or_else(|| SEASONS[0].to_string());
    let mut store = SeasonStore::new(&config.data_dir);
    let table = store.table(&season)?;

    let league = match flag_value(args, "--league") {
        Some(league) => league,
        None => leagues(table)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("season {season} has no rows"))?,
    };
    let position = match flag_value(args, "--position") {
        Some(raw) => raw.parse::<Position>()?,
        None => Position::Forward,
    };
    let min_minutes = match flag_value(args, "--minutes") {
        Some(raw) => parse_minutes(&raw)?,
        None => MINUTE_OPTIONS[0],
    };
    let squad = flag_value(args, "--squad").filter(|s| !s.trim().is_empty());
    let per_90 = !args.iter().any(|a| a == "--no-per90");

    let mut request = PizzaRequest {
        season,
        league,
        position,
        min_minutes,
        squad,
        player: String::new(),
        per_90,
    };
    request.player = match flag_value(args, "--player") {
        Some(player) => player,
        None => players_for_request(table, &request)?
            .into_iter()
            .next()
            .ok_or_else(|| PizzaError::PlayerNotFound(String::new()))?,
    };

    run_pizza(table, &request, config)
}

fn parse_minutes(raw: &str) -> Result<u32, PizzaError> {
    let minutes = raw
        .trim()
        .parse::<u32>()
        .with_context(|| format!("invalid --minutes value {raw}"))?;
    if minutes == 0 {
        return Err(anyhow!("--minutes must be at least 1").into());
    }
    if !MINUTE_OPTIONS.contains(&minutes) {
        log::info!("{minutes} is not one of the usual thresholds {MINUTE_OPTIONS:?}");
    }
    Ok(minutes)
}

fn print_report(report: &PizzaReport) {
    println!("{}", report.title);
    println!();
    let width = report
        .results
        .iter()
        .map(|r| r.column.name.len())
        .max()
        .unwrap_or(0);
    for r in &report.results {
        println!(
            "{:<width$}  {:>8.2}  {:>3}  rank {}/{}",
            r.column.name, r.raw_value, r.percentile, r.rank, report.cohort_size
        );
    }
    println!();
    println!("{}", report.caption);
    println!("Datasource: fbref.com");
}

fn export(args: &[String], report: &PizzaReport) -> Result<()> {
    if let Some(path) = flag_value(args, "--json") {
        let path = PathBuf::from(path);
        pizza_export::export_json(&path, report)?;
        println!("[INFO] wrote {}", path.display());
    }
    if let Some(path) = flag_value(args, "--xlsx") {
        let path = PathBuf::from(path);
        pizza_export::export_workbook(&path, report)?;
        println!("[INFO] wrote {}", path.display());
    }
    Ok(())
}

/// Accepts both `--flag value` and `--flag=value`.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(rest) = arg.strip_prefix(flag) {
            if let Some(value) = rest.strip_prefix('=') {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() && !next.starts_with("--") {
                return Some(next.clone());
            }
        }
    }
    None
}

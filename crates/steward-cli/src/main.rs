// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod commands;
mod config;
mod render;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use runtime::Session;
use std::env;
use std::io;
use std::path::PathBuf;
use steward_app::AdminState;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "STEWARD_LOG";

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `steward --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    let upload_delay = config.upload_delay()?;
    init_logging(&config.log_level())?;

    let state = AdminState::seeded().context("load seed records")?;
    if options.check_only {
        return Ok(());
    }

    info!(
        config = %options.config_path.display(),
        upload_delay_ms = upload_delay.as_millis() as u64,
        "session starting"
    );
    let stdout = io::stdout();
    let mut session = Session::new(state, upload_delay, stdout.lock());
    if config.show_dashboard() {
        session.print_dashboard()?;
    }
    session.run(io::stdin().lock())?;

    let dashboard = session.state().dashboard();
    info!(
        studies = dashboard.total_studies,
        unread_requests = dashboard.unread_requests,
        "session ended"
    );
    Ok(())
}

fn init_logging(config_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(config_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))
}

/// What the binary should do before (or instead of) starting a session.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

impl CliOptions {
    fn with_config_path(config_path: PathBuf) -> Self {
        Self {
            config_path,
            print_config_path: false,
            print_example: false,
            check_only: false,
            show_help: false,
        }
    }
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions::with_config_path(default_config_path);
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let flag = match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
                continue;
            }
            "--print-config-path" => &mut options.print_config_path,
            "--print-example-config" => &mut options.print_example,
            "--check" => &mut options.check_only,
            "--help" | "-h" => &mut options.show_help,
            unknown => {
                bail!("unknown argument {unknown:?}; run with --help to see supported options")
            }
        };
        *flag = true;
    }

    Ok(options)
}

fn print_help() {
    println!("steward: ministry admin console");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config and seed data, then exit");
    println!("  --help                   Show this help");
    println!();
    println!("Commands are read from stdin, one per line; type `help` once running.");
    println!("Set {LOG_ENV} (for example {LOG_ENV}=debug) to override [log] level.");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args};
    use anyhow::Result;
    use std::path::PathBuf;

    fn resolved_path() -> PathBuf {
        PathBuf::from("/home/admin/.config/steward/config.toml")
    }

    #[test]
    fn no_arguments_start_a_session_with_the_resolved_config() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), resolved_path())?;
        assert_eq!(options, CliOptions::with_config_path(resolved_path()));
        Ok(())
    }

    #[test]
    fn check_with_explicit_config_validates_that_file() -> Result<()> {
        let options = parse_cli_args(
            ["--check", "--config", "/srv/steward/staging.toml"],
            resolved_path(),
        )?;
        assert!(options.check_only);
        assert_eq!(options.config_path, PathBuf::from("/srv/steward/staging.toml"));
        assert!(!options.print_config_path && !options.print_example && !options.show_help);
        Ok(())
    }

    #[test]
    fn last_config_flag_wins() -> Result<()> {
        let options = parse_cli_args(
            ["--config", "first.toml", "--print-config-path", "--config", "second.toml"],
            resolved_path(),
        )?;
        assert!(options.print_config_path);
        assert_eq!(options.config_path, PathBuf::from("second.toml"));
        Ok(())
    }

    #[test]
    fn example_template_and_short_help_combine() -> Result<()> {
        let options = parse_cli_args(["--print-example-config", "-h"], resolved_path())?;
        assert!(options.print_example);
        assert!(options.show_help);
        Ok(())
    }

    #[test]
    fn dangling_config_flag_is_an_error() {
        let error = parse_cli_args(["--check", "--config"], resolved_path())
            .expect_err("--config needs a value");
        assert!(error.to_string().contains("--config requires a file path"));
    }

    #[test]
    fn unknown_flag_after_valid_ones_points_at_help() {
        let error = parse_cli_args(["--check", "--upload-delay"], resolved_path())
            .expect_err("unsupported flag");
        let message = error.to_string();
        assert!(message.contains("\"--upload-delay\""), "{message}");
        assert!(message.contains("--help"), "{message}");
    }
}

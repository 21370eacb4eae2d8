use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use scopelog::{
    fields, values, FieldRepresentation, LogConfig, LogFormat, Logger, PlainStyler, Settings,
};

/// Scope column width used unless the config file or a flag says otherwise
const DEMO_SCOPE_LENGTH: usize = 40;

#[derive(Parser, Debug)]
#[command(
    name = "scopelog-demo",
    about = "Walk through nested scopes, tags, operations and fields",
    version
)]
struct Cli {
    /// Width of the scope column (default: 40, or the config file's value)
    #[arg(long)]
    scope_length: Option<usize>,

    /// Show the caller's file:line column
    #[arg(long)]
    show_lines: bool,

    /// How attached fields are rendered
    #[arg(long, value_enum)]
    fields: Option<FieldsChoice>,

    /// Record layout
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Hide DEBUG records
    #[arg(long)]
    no_debug: bool,

    /// Disable terminal colors
    #[arg(long)]
    plain: bool,

    /// Config file (default: ./scopelog.toml, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also route `tracing` events through the logger
    #[arg(long)]
    tracing: bool,

    /// Pause between steps, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FieldsChoice {
    None,
    Json,
    Kv,
}

impl From<FieldsChoice> for FieldRepresentation {
    fn from(choice: FieldsChoice) -> Self {
        match choice {
            FieldsChoice::None => FieldRepresentation::None,
            FieldsChoice::Json => FieldRepresentation::Json,
            FieldsChoice::Kv => FieldRepresentation::KeyValue,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatChoice {
    Pipe,
    Json,
}

impl From<FormatChoice> for LogFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Pipe => LogFormat::Pipe,
            FormatChoice::Json => LogFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Some(LogConfig::from_path(path)?),
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            LogConfig::discover(&cwd)?
        }
    };
    configure(&Settings::shared(), &cli, config.as_ref());

    let log = scopelog::scope("MAIN").tag("REQ001");

    if cli.tracing {
        scopelog::init_tracing(log.clone(), "info");
        tracing::info!(target: "startup", delay_ms = cli.delay_ms, "tracing bridge installed");
    }

    let delay = Duration::from_millis(cli.delay_ms);

    log.info("Starting program", &[]);
    log.debug("Scope column is %d wide", &values![scopelog::scope_length()]);

    call0(&log, "MyArg0", delay).await;
    call1(&log, "Call1Arg");
    call2(&log, "Call2Arg");

    log.success("Program finished", &[]);
    Ok(())
}

/// Demo defaults first, then the config file, then command-line flags.
fn configure(settings: &Settings, cli: &Cli, config: Option<&LogConfig>) {
    settings.set_scope_length(DEMO_SCOPE_LENGTH);
    if let Some(config) = config {
        config.apply(settings);
    }

    if let Some(length) = cli.scope_length {
        settings.set_scope_length(length);
    }
    if cli.show_lines {
        settings.set_show_lines(true);
    }
    if let Some(fields) = cli.fields {
        settings.set_field_representation(fields.into());
    }
    if let Some(format) = cli.format {
        settings.set_log_format(format.into());
    }
    if cli.no_debug {
        settings.set_debug(false);
    }
    if cli.plain {
        settings.set_styler(Arc::new(PlainStyler));
    }
}

async fn call0(parent: &Logger, arg0: &str, delay: Duration) {
    let log = parent
        .sub_scope("Call0")
        .with_fields(fields! { "arg0" => arg0 });

    log.awaiting("Doing some work", &[]);
    tokio::time::sleep(delay).await;
    log.done("Finished some work", &[]);
    log.note("Not sure what I'm doing...", &[]);
    log.info("Calling Call1", &[]);
    call1(&log, "call1arg");
    log.done("Exiting", &[]);
}

fn call1(parent: &Logger, huebr: &str) {
    let log = parent
        .sub_scope("Call1")
        .with_fields(fields! { "huebr" => huebr });

    log.info("Calling Call2", &[]);
    call2(&log, "abcde");
    log.warn("Call 1 finished", &[]);
}

fn call2(parent: &Logger, pop: &str) {
    let log = parent
        .sub_scope("Call2")
        .with_fields(fields! { "pop" => pop });

    log.io("Doing some IO", &[]);
    log.error("I'm useless. Please fix-me\nSecond line of the report", &[]);
}

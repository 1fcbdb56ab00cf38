use anyhow::{Context, Result};
use clap::Parser;
use input_log_converter::config::{load_config, ConverterConfig};
use input_log_converter::converter::{NoopObserver, RowObserver, TraceObserver};
use input_log_converter::logging::{init_logging, shutdown_logging, LoggingOptions};
use input_log_converter::convert_directory;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "input-log-converter",
    version,
    about = "Convert recorded mouse event logs into a CSV table"
)]
struct Args {
    /// TOML config file; flags below override its values.
    #[arg(long, env = "INPUT_LOG_CONVERTER_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the .json capture files [default: data]
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Output table path [default: data.csv]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Process files sorted by name for reproducible output.
    #[arg(long)]
    sorted: bool,

    /// Do not log each row as it is written.
    #[arg(short, long)]
    quiet: bool,

    /// Also write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the run summary as JSON on stdout.
    #[arg(long)]
    summary_json: bool,
}

impl Args {
    fn apply(&self, mut config: ConverterConfig) -> ConverterConfig {
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if self.sorted {
            config.sort_files = true;
        }
        if self.quiet {
            config.trace_rows = false;
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = Some(log_file.clone());
        }
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ConverterConfig::default(),
    };
    let config = args.apply(config);

    init_logging(&LoggingOptions {
        level: config.log_level.clone(),
        log_file: config.log_file.clone(),
    })?;

    let mut trace = TraceObserver;
    let mut quiet = NoopObserver;
    let observer: &mut dyn RowObserver = if config.trace_rows {
        &mut trace
    } else {
        &mut quiet
    };

    let result = convert_directory(
        &config.input_dir,
        &config.output_path,
        config.scan_order(),
        observer,
    )
    .with_context(|| {
        format!(
            "Failed to convert {} into {}",
            config.input_dir.display(),
            config.output_path.display()
        )
    });

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            shutdown_logging();
            return Err(e);
        }
    };

    info!(
        output = %config.output_path.display(),
        rows = summary.rows,
        "Wrote table"
    );

    if args.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    shutdown_logging();
    Ok(())
}

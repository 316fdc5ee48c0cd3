//! mlnx-thermal - Mellanox thermal sensor tool
//!
//! Enumerates the thermal sensors of a Mellanox switch SKU and prints their
//! backing files or current readings.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use sonic_platform_mlnx::config::DEFAULT_CONFIG_PATH;
use sonic_platform_mlnx::{
    PsuBase, SensorCategory, SysfsPsuStatus, Thermal, ThermalBase, ThermalConfig, ThermalFactory,
    ThermalReading, TopologyCatalog,
};

#[derive(Debug, Parser)]
#[command(name = "mlnx-thermal", version, about = "Mellanox thermal sensor tool")]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Hardware SKU (overrides the config file)
    #[arg(long)]
    sku: Option<String>,

    /// hw-management thermal directory (overrides the config file)
    #[arg(long)]
    thermal_root: Option<PathBuf>,

    /// Log level (overrides the config file and RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Number of PSU status providers to create
    #[arg(long)]
    psus: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List sensors with their backing files
    List,
    /// Read temperature and high threshold of every sensor
    Read,
    /// List supported SKUs
    Skus,
}

const DEFAULT_LOG_LEVEL: &str = "info";

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Level used until the config file has been read.
fn startup_log_level(cli: &Cli) -> &str {
    cli.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
}

/// True when the config file may still change the log level.
fn config_controls_log_level(cli: &Cli, rust_log_set: bool) -> bool {
    cli.log_level.is_none() && !rust_log_set
}

/// Initializes tracing/logging subsystem
///
/// Installed before the config is loaded so config messages are not lost;
/// the returned handle swaps in the configured level afterwards.
fn init_logging(level: &str) -> FilterHandle {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
    handle
}

fn load_config(cli: &Cli) -> Result<ThermalConfig> {
    let mut config = ThermalConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    if let Some(sku) = &cli.sku {
        config.sku = Some(sku.clone());
    }
    if let Some(root) = &cli.thermal_root {
        config.thermal_root = root.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if cli.psus.is_some() {
        config.psu_count_override = cli.psus;
    }

    config.validate()?;
    Ok(config)
}

fn build_thermals(config: &ThermalConfig) -> Result<Vec<Thermal>> {
    let sku = config
        .sku
        .as_deref()
        .context("no SKU given: use --sku or set sku in the config file")?;

    let factory = ThermalFactory::new(TopologyCatalog::mellanox(), config.layout());
    let span = factory.catalog().lookup(sku)?.span(SensorCategory::Psu);
    let count = config.psu_count_override.unwrap_or(span.count as usize);

    let psus: Vec<Arc<dyn PsuBase>> = (0..count as u32)
        .map(|i| {
            Arc::new(SysfsPsuStatus::new(span.start + i, factory.layout())) as Arc<dyn PsuBase>
        })
        .collect();

    let mut thermals = Vec::new();
    factory.initialize(sku, &psus, &mut thermals)?;
    Ok(thermals)
}

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:.3}", v))
}

fn run(cli: &Cli, config: &ThermalConfig) -> Result<()> {
    match cli.command {
        Command::Skus => {
            for sku in TopologyCatalog::mellanox().skus() {
                println!("{}", sku);
            }
        }
        Command::List => {
            let thermals = build_thermals(config)?;
            for thermal in &thermals {
                let threshold = thermal
                    .high_threshold_path()
                    .map_or_else(|| "-".to_string(), |p| p.display().to_string());
                println!(
                    "{:<26} {:<9} {} {}",
                    thermal.name(),
                    thermal.category(),
                    thermal.temperature_path().display(),
                    threshold
                );
            }
        }
        Command::Read => {
            let thermals = build_thermals(config)?;
            let readings: Vec<ThermalReading> = thermals.iter().map(Thermal::reading).collect();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&readings)?);
            } else {
                println!("{:<26} {:>12} {:>12}", "Sensor", "Temperature", "High TH");
                for reading in &readings {
                    println!(
                        "{:<26} {:>12} {:>12}",
                        reading.name,
                        format_value(reading.temperature),
                        format_value(reading.high_threshold)
                    );
                }
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let filter = init_logging(startup_log_level(&cli));

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let rust_log_set = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    if config_controls_log_level(&cli, rust_log_set) {
        if let Err(e) = filter.reload(EnvFilter::new(&config.log_level)) {
            error!("Failed to apply log level {}: {}", config.log_level, e);
        }
    }
    info!("--- Starting mlnx-thermal (Rust) ---");

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

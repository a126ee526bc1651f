use anyhow::Result;
use clap::{Parser, Subcommand};
use pulso::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the full dashboard
    Dashboard {
        /// Re-fetch and redraw every N seconds
        #[arg(long, value_name = "SECONDS")]
        watch: Option<u64>,
    },
    /// Display FX quotes and gaps
    Fx,
    /// Display crypto reference prices
    Crypto,
    /// Display deposit and wallet rate tables
    Rates,
    /// Display policy rate, country risk and the equity index
    Indicators,
}

impl From<Commands> for pulso::AppCommand {
    fn from(cmd: Commands) -> pulso::AppCommand {
        match cmd {
            Commands::Dashboard { watch } => pulso::AppCommand::Dashboard {
                watch_seconds: watch,
            },
            Commands::Fx => pulso::AppCommand::Fx,
            Commands::Crypto => pulso::AppCommand::Crypto,
            Commands::Rates => pulso::AppCommand::Rates,
            Commands::Indicators => pulso::AppCommand::Indicators,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => pulso::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            // Bare invocation shows the dashboard once.
            pulso::run_command(
                pulso::AppCommand::Dashboard {
                    watch_seconds: None,
                },
                cli.config_path.as_deref(),
            )
            .await
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = pulso::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
# Omit a provider section to use the public upstream.
providers:
  yahoo:
    base_url: "https://query1.finance.yahoo.com"

# Optional JSON feeds for the rate tables; without them the built-in
# tables are shown.
tables: {}

ttl_seconds: 300
timeout_seconds: 10
equity_symbol: "^MERV"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}

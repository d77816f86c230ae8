//! Welcome service entry point.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use welcome_service::config::Config;
use welcome_service::metrics;
use welcome_service::server;
use welcome_service::utils::shutdown_signal;

/// Welcome and health JSON endpoints.
#[derive(Parser, Debug)]
#[command(name = "welcome-service")]
#[command(about = "Serves the welcome and health JSON endpoints")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Port to listen on; overrides PORT.
    #[arg(short, long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP listener (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            // Logging is not up yet; the filter itself comes from config.
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(port) = args.port {
        config.port = port.to_string();
    }

    init_logging(&config, args.verbose);

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve) | None => cmd_serve(config).await,
    }
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("welcome_service=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("WELCOME SERVICE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    if let Err(e) = config.validate() {
        println!("FAILED");
        println!("  Error: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed"));
    }
    println!("OK");

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}", config.socket_addr()?);
    match config.metrics_addr()? {
        Some(addr) => println!("  Metrics Exporter: {}", addr),
        None => println!("  Metrics Exporter: Disabled"),
    }
    println!("  Log Filter: {}", config.rust_log);
    println!("  Log Format: {}", if config.log_json { "JSON" } else { "Text" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP listener until shutdown. Startup failures are fatal.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    metrics::init_metrics();
    if let Some(addr) = config.metrics_addr()? {
        if let Err(e) = metrics::install_exporter(addr) {
            error!("{}", e);
            std::process::exit(1);
        }
    }

    info!(
        "Welcome service starting on port {}",
        config.effective_port()
    );

    if let Err(e) = server::serve(&config, shutdown_signal()).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }

    info!("Shutdown complete");
    Ok(())
}

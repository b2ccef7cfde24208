use clap::{Parser, Subcommand};

/// usergate - Minimal user management service
#[derive(Parser)]
#[command(name = "usergate")]
#[command(about = "Register, log in and list users", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = usergate::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    usergate::observability::init_observability(
        &config.observability.log_level,
        &config.observability.log_format,
    )?;

    match cli.command {
        Commands::Serve { host, port } => usergate::server::serve(config, host, port).await,
        Commands::Migrate => usergate::migrate::migrate(&config).await,
        Commands::Reset => usergate::migrate::reset(&config).await,
    }
}

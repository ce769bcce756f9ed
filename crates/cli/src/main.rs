//! # dnscheck
//!
//! Looks up many hosts against groups of DNS resolvers at once and reports
//! where the resolvers disagree. Runs as an HTTP API (`serve`, the default)
//! or as a one-shot command (`lookup`).

mod bootstrap;
mod commands;
mod di;
mod server;

use bootstrap::{init_logging, load_config};
use clap::{Parser, Subcommand};
use commands::{run_lookup, run_serve, LookupArgs};
use dnscheck_domain::CliOverrides;
use tracing::info;

#[derive(Parser)]
#[command(name = "dnscheck")]
#[command(version)]
#[command(about = "Concurrent multi-resolver DNS lookups")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Address the HTTP API binds to
    #[arg(short = 'H', long, global = true)]
    host: Option<String>,

    /// HTTP API port
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// SQLite database file for stored lookups
    #[arg(long, global = true)]
    database: Option<String>,

    /// Custom resolver address; repeat for more. Replaces every other group.
    #[arg(short, long = "resolver", global = true)]
    resolver: Vec<String>,

    /// Maximum number of queries in flight
    #[arg(short, long, global = true)]
    concurrency: Option<usize>,

    /// Maximum number of hosts per lookup
    #[arg(short, long, global = true)]
    limit: Option<usize>,

    /// Per-query timeout in milliseconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Run a single lookup and print it as JSON
    Lookup(LookupArgs),
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            bind_address: self.host.clone(),
            port: self.port,
            database: self.database.clone(),
            custom_resolvers: self.resolver.clone(),
            concurrency: self.concurrency,
            limit: self.limit,
            query_timeout: self.timeout,
            debug: self.debug,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.overrides())?;
    init_logging(&config);

    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        listen = %config.server.listen_addr(),
        database = %config.database.path,
        concurrency = config.lookup.concurrency,
        limit = config.lookup.limit,
        timeout_ms = config.lookup.query_timeout,
        "Configuration loaded"
    );

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_serve(config).await,
        Command::Lookup(args) => run_lookup(config, args).await,
    }
}

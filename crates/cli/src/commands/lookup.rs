use crate::bootstrap::{build_registry, init_database};
use crate::di::{Repositories, UseCases};
use clap::Args;
use dnscheck_domain::resolver::{CUSTOM_GROUP, GOOGLE_GROUP};
use dnscheck_domain::{Config, LookupResultSet, StatsCalculator, StatsSummary};
use serde::Serialize;
use std::sync::Arc;

const SCRATCH_DATABASE: &str = "sqlite::memory:";

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Resolver group to query (default: "Custom" with --resolver, else "Google DNS")
    #[arg(short, long)]
    pub group: Option<String>,

    /// Record type
    #[arg(short = 't', long = "type", default_value = "A")]
    pub record_type: String,

    /// Store the result set and print its key
    #[arg(long)]
    pub save: bool,

    /// Hosts to look up
    #[arg(required = true)]
    pub hosts: Vec<String>,
}

#[derive(Serialize)]
struct LookupOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    results: &'a LookupResultSet,
    summary: StatsSummary,
}

/// Runs one batch and prints the result set and its summary as JSON.
pub async fn run_lookup(config: Config, args: LookupArgs) -> anyhow::Result<()> {
    let registry = Arc::new(build_registry(&config.resolvers).await?);

    // Nothing is written unless the batch is to be kept.
    let database_url = if args.save {
        config.database.url()
    } else {
        SCRATCH_DATABASE.to_string()
    };
    let pool = init_database(&database_url).await?;
    let use_cases = UseCases::new(&config, registry, &Repositories::new(pool));

    let group = args.group.unwrap_or_else(|| {
        if config.resolvers.custom.is_empty() {
            GOOGLE_GROUP.to_string()
        } else {
            CUSTOM_GROUP.to_string()
        }
    });
    let raw_hosts = args.hosts.join("\n");

    let (key, results) = if args.save {
        let submitted = use_cases
            .submit_lookup
            .execute(&raw_hosts, &args.record_type, &group)
            .await?;
        (Some(submitted.key), submitted.results)
    } else {
        let results = use_cases
            .submit_lookup
            .lookup(&raw_hosts, &args.record_type, &group)
            .await?;
        (None, results)
    };

    let summary = StatsCalculator::new(config.lookup.stats).summarize(&results)?;
    let output = LookupOutput {
        key,
        results: &results,
        summary,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

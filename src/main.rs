use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use snel_shape::command::types::LoadRequest;
use snel_shape::engine::core::CancellationToken;
use snel_shape::engine::core::record::Record;
use snel_shape::engine::core::summary::AggregateKind;
use snel_shape::engine::query::{
    DataSource, MemoryProvider, ProviderCapabilities, QueryExecutor, load,
};
use snel_shape::logging;
use tracing::info;

#[derive(Parser)]
#[command(name = "snelshape")]
#[command(about = "Group, filter and summarize a JSON record set", long_about = None)]
struct Args {
    /// JSON file holding an array of records
    #[arg(short, long)]
    records: PathBuf,

    /// JSON file holding the load options (filter, group, summaries)
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Serve the records through an in-process provider instead of evaluating locally
    #[arg(long)]
    provider: bool,

    /// Provider cannot evaluate filters
    #[arg(long, requires = "provider")]
    no_filter: bool,

    /// Provider cannot group
    #[arg(long, requires = "provider")]
    no_grouping: bool,

    /// Aggregates the provider supports (comma separated; default: all)
    #[arg(long, value_delimiter = ',', requires = "provider")]
    aggregates: Option<Vec<String>>,

    /// Pretty-print the result
    #[arg(long)]
    pretty: bool,
}

fn read_records(path: &PathBuf) -> anyhow::Result<Vec<Record>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a JSON record array", path.display()))
}

fn read_request(path: Option<&PathBuf>) -> anyhow::Result<LoadRequest> {
    let Some(path) = path else {
        return Ok(LoadRequest::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read options from {}", path.display()))?;
    Ok(LoadRequest::from_json(&raw)?)
}

fn capabilities(args: &Args) -> anyhow::Result<ProviderCapabilities> {
    let aggregates = match &args.aggregates {
        None => AggregateKind::ALL.to_vec(),
        Some(names) => names
            .iter()
            .map(|n| AggregateKind::parse(n))
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(ProviderCapabilities::all()
        .with_filter(!args.no_filter)
        .with_grouping(!args.no_grouping)
        .with_aggregates(&aggregates))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init()?;
    let args = Args::parse();

    let records = read_records(&args.records)?;
    let request = read_request(args.options.as_ref())?;
    info!(target: "shape::cli", records = records.len(), provider = args.provider, "Loading");

    let source = if args.provider {
        DataSource::provider(MemoryProvider::new(records).with_capabilities(capabilities(&args)?))
    } else {
        DataSource::memory(records)
    };

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let executor = QueryExecutor::from_config();
    let result = load(&source, &request, &executor, &cancel).await?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", output);
    Ok(())
}

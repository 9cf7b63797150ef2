mod client;
mod output;
mod telemetry;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use clap::{Parser, Subcommand};
use logbook_core::config::Config;
use logbook_core::model::NewLogRecord;
use logbook_core::time::parse_time_or_relative;
use logbook_store::Store;

use crate::client::LogbookClient;
use crate::output::{print_logs_human, print_record_human};
use crate::telemetry::{LogFormat, init_cli_tracing, init_run_tracing};

#[derive(Parser, Debug)]
#[command(name = "logbook")]
#[command(about = "Structured log ingestion and query service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Print raw JSON instead of log lines")]
    json: bool,

    #[arg(long, global = true, help = "Server address (host:port or URL)")]
    addr: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Run the HTTP ingest and query server")]
    Run {
        #[arg(long)]
        db_path: Option<PathBuf>,
        #[arg(long)]
        http_addr: Option<String>,
    },
    #[command(about = "Query stored logs, newest first")]
    Search {
        #[arg(long)]
        service: Option<String>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long, help = "Case-insensitive substring of the message")]
        message: Option<String>,
        #[arg(long, help = "RFC3339 time or duration ago (e.g. 15m)")]
        since: Option<String>,
        #[arg(long, help = "RFC3339 time or duration ago (e.g. 1m)")]
        until: Option<String>,
        #[arg(long)]
        limit: Option<i64>,
        #[arg(long)]
        offset: Option<i64>,
    },
    #[command(about = "Submit a single log record")]
    Send {
        #[arg(long)]
        service: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        trace_id: Option<String>,
        #[arg(long)]
        span_id: Option<String>,
        #[arg(long, help = "JSON metadata object")]
        metadata: Option<String>,
        #[arg(long, help = "RFC3339 time or duration ago; defaults to now")]
        timestamp: Option<String>,
    },
}

#[derive(Debug, Default, PartialEq)]
struct SearchArgs {
    service: Option<String>,
    level: Option<String>,
    message: Option<String>,
    since: Option<String>,
    until: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { db_path, http_addr } => run_server(db_path, http_addr).await,
        Commands::Search {
            service,
            level,
            message,
            since,
            until,
            limit,
            offset,
        } => {
            init_cli_tracing();
            let client = LogbookClient::new(&resolve_addr(cli.addr)?);
            let query = search_query(SearchArgs {
                service,
                level,
                message,
                since,
                until,
                limit,
                offset,
            })?;
            tracing::debug!(?query, "searching logs");
            let logs = client.search(&query).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&logs)?);
            } else {
                print_logs_human(&logs);
            }
            Ok(())
        }
        Commands::Send {
            service,
            message,
            level,
            trace_id,
            span_id,
            metadata,
            timestamp,
        } => {
            init_cli_tracing();
            let client = LogbookClient::new(&resolve_addr(cli.addr)?);
            let record = NewLogRecord {
                service_name: service,
                log_level: level.unwrap_or_default(),
                message,
                timestamp: timestamp.map(|v| parse_time_or_relative(&v)).transpose()?,
                trace_id,
                span_id,
                metadata: metadata
                    .map(|raw| serde_json::from_str(&raw))
                    .transpose()
                    .context("--metadata must be valid JSON")?,
            };
            let saved = client.send(&record).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else {
                print_record_human(&saved);
            }
            Ok(())
        }
    }
}

async fn run_server(db_path: Option<PathBuf>, http_addr: Option<String>) -> anyhow::Result<()> {
    let mut cfg = Config::load().context("load config")?;
    if let Some(v) = db_path {
        cfg.db_path = v;
    }
    if let Some(v) = http_addr {
        cfg.http_addr = v;
    }

    init_run_tracing(LogFormat::from_env());
    let store = Store::open(&cfg.db_path, cfg.db_threads).context("open store")?;
    let addr: SocketAddr = cfg
        .http_addr
        .parse()
        .with_context(|| format!("invalid http addr {}", cfg.http_addr))?;

    eprintln!("logbook run");
    eprintln!("  db: {}", store.db_path());
    eprintln!("  http: {addr}");

    let http_task = tokio::spawn(logbook_api::server::run_http_server(store, addr));

    tokio::select! {
        res = http_task => {
            res??;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received ctrl-c, shutting down");
        }
    }

    Ok(())
}

fn resolve_addr(addr: Option<String>) -> anyhow::Result<String> {
    match addr {
        Some(addr) => Ok(addr),
        None => Ok(Config::load().context("load config")?.http_addr),
    }
}

fn search_query(args: SearchArgs) -> anyhow::Result<Vec<(&'static str, String)>> {
    let mut query = Vec::new();
    if let Some(v) = args.service {
        query.push(("service", v));
    }
    if let Some(v) = args.level {
        query.push(("level", v));
    }
    if let Some(v) = args.message {
        query.push(("message", v));
    }
    if let Some(v) = args.since {
        query.push(("start_time", rfc3339(parse_time_or_relative(&v)?)));
    }
    if let Some(v) = args.until {
        query.push(("end_time", rfc3339(parse_time_or_relative(&v)?)));
    }
    if let Some(v) = args.limit {
        query.push(("limit", v.to_string()));
    }
    if let Some(v) = args.offset {
        query.push(("offset", v.to_string()));
    }
    Ok(query)
}

fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

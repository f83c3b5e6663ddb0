//! CLI command implementations: `serve` boots the HTTP server, `explain`
//! plans a single filter query and prints the result without binding a
//! socket.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{self, AppState};
use crate::archive;
use crate::cache::ResponseCache;
use crate::config::AppConfig;
use crate::dictionary::Dictionaries;
use crate::index::IndexSet;
use crate::observability::{Logger, MetricsRegistry};
use crate::planner::plan_filter;
use crate::storage::{self, RecordStore};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { data_dir } => serve(data_dir),
        Command::Explain { data_dir, query } => explain(data_dir, &query),
    }
}

fn load_engine(data_dir: PathBuf) -> CliResult<(AppConfig, RecordStore, Dictionaries)> {
    let config = AppConfig::load(data_dir)?;
    let raw_accounts = archive::load_accounts(&config.archive_path())?;
    let record_count = raw_accounts.len();

    let mut dicts = Dictionaries::new();
    let records = storage::build_records(raw_accounts, &mut dicts)?;
    dicts.freeze();
    let store = RecordStore::from_records(records);

    Logger::info("ARCHIVE_LOADED", &[("records", &record_count.to_string())]);

    Ok((config, store, dicts))
}

pub fn serve(data_dir: PathBuf) -> CliResult<()> {
    let (config, store, dicts) = load_engine(data_dir)?;

    let index = IndexSet::build(&store, &dicts, config.now);
    Logger::info("INDEX_BUILT", &[("accounts", &store.len().to_string())]);

    let listen_addr = config.listen_addr;
    let state = Arc::new(AppState {
        store,
        dicts,
        index,
        cache: ResponseCache::new(),
        metrics: MetricsRegistry::new(),
        now: config.now,
    });
    let router = api::build_router(state);

    let runtime = tokio::runtime::Runtime::new().map_err(CliError::from)?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(listen_addr).await.map_err(CliError::from)?;
        Logger::info("SERVER_LISTENING", &[("addr", &listen_addr.to_string())]);
        axum::serve(listener, router).await.map_err(|e| CliError::boot_failed(e.to_string()))
    })
}

pub fn explain(data_dir: PathBuf, query: &str) -> CliResult<()> {
    let (config, store, dicts) = load_engine(data_dir)?;
    let index = IndexSet::build(&store, &dicts, config.now);

    let params = parse_raw_query_string(query);
    let parsed = api::parse_filter_query(&params).map_err(|_| CliError::boot_failed("malformed filter query"))?;
    let plan = plan_filter(&parsed.predicates, &index, &dicts);

    let report = serde_json::json!({
        "matched": plan.positions.len(),
        "limit": parsed.limit,
        "projection": {
            "sex": plan.projection.sex,
            "status": plan.projection.status,
            "fname": plan.projection.fname,
            "sname": plan.projection.sname,
            "phone": plan.projection.phone,
            "country": plan.projection.country,
            "city": plan.projection.city,
            "birth": plan.projection.birth,
            "premium": plan.projection.premium,
        },
    });
    write_response(report)
}

/// Splits a raw `key=value&key=value` query string. Deliberately minimal —
/// `explain` is a local diagnostic surface, not the HTTP request path, so
/// it accepts an already-decoded string rather than pulling in a URL
/// encoding crate the rest of the engine has no other use for.
fn parse_raw_query_string(query: &str) -> HashMap<String, String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_query_string_splits_pairs() {
        let parsed = parse_raw_query_string("sex_eq=f&limit=10");
        assert_eq!(parsed.get("sex_eq"), Some(&"f".to_string()));
        assert_eq!(parsed.get("limit"), Some(&"10".to_string()));
    }

    #[test]
    fn empty_query_string_yields_no_params() {
        assert!(parse_raw_query_string("").is_empty());
    }
}

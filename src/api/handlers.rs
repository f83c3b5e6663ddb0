//! The four endpoint handlers (§4.5): cache check, parse, execute,
//! serialize, cache store — in that order. Every handler shares the same
//! shape; what differs is which parser/operator/encoder it calls and
//! whether a 404 is reachable at all (only recommend/suggest can 404).

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::cache::CacheEntry;
use crate::executor::{execute_filter, execute_group, execute_recommend, execute_suggest, RecommendQuery, SuggestQuery};

use super::errors::ApiError;
use super::params::{parse_account_id, parse_filter_query, parse_group_query, parse_location_query, parse_query_id};
use super::response::{encode_accounts, encode_groups};
use super::state::AppState;

fn json_response(bytes: Vec<u8>) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], bytes).into_response()
}

fn respond_from_cache(entry: CacheEntry) -> Response {
    match entry {
        CacheEntry::Success(bytes) => json_response(bytes),
        CacheEntry::Bad => StatusCode::BAD_REQUEST.into_response(),
        CacheEntry::NotFound => StatusCode::NOT_FOUND.into_response(),
    }
}

/// A malformed `query_id` itself has nothing to key a cache entry on, so it
/// is handled before the cache lookup and never cached.
fn require_query_id(state: &AppState, params: &HashMap<String, String>) -> Result<Option<i64>, Response> {
    parse_query_id(params).map_err(|err| {
        state.metrics.record_bad_request();
        err.into_response()
    })
}

pub async fn filter(State(state): State<Arc<AppState>>, Query(params): Query<HashMap<String, String>>) -> Response {
    state.metrics.record_request();

    let query_id = match require_query_id(&state, &params) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if let Some(qid) = query_id {
        if let Some(entry) = state.cache.get(qid) {
            state.metrics.record_cache_hit();
            return respond_from_cache(entry);
        }
    }

    let result = (|| -> Result<Vec<u8>, ApiError> {
        let query = parse_filter_query(&params)?;
        let views = execute_filter(&query.predicates, query.limit, &state.store, &state.index, &state.dicts);
        encode_accounts(&views)
    })();

    match result {
        Ok(bytes) => {
            if let Some(qid) = query_id {
                state.cache.put(qid, CacheEntry::Success(bytes.clone()));
            }
            json_response(bytes)
        }
        Err(ApiError::BadParameter) => {
            state.metrics.record_bad_request();
            if let Some(qid) = query_id {
                state.cache.put(qid, CacheEntry::Bad);
            }
            ApiError::BadParameter.into_response()
        }
        Err(ApiError::InternalEncoding) => {
            state.metrics.record_internal_error();
            ApiError::InternalEncoding.into_response()
        }
        Err(ApiError::NotFound) => unreachable!("filter has no notion of a missing target account"),
    }
}

pub async fn group(State(state): State<Arc<AppState>>, Query(params): Query<HashMap<String, String>>) -> Response {
    state.metrics.record_request();

    let query_id = match require_query_id(&state, &params) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if let Some(qid) = query_id {
        if let Some(entry) = state.cache.get(qid) {
            state.metrics.record_cache_hit();
            return respond_from_cache(entry);
        }
    }

    let result = (|| -> Result<Vec<u8>, ApiError> {
        let query = parse_group_query(&params)?;
        let rows = execute_group(&query, &state.store, &state.dicts);
        encode_groups(&rows)
    })();

    match result {
        Ok(bytes) => {
            if let Some(qid) = query_id {
                state.cache.put(qid, CacheEntry::Success(bytes.clone()));
            }
            json_response(bytes)
        }
        Err(ApiError::BadParameter) => {
            state.metrics.record_bad_request();
            if let Some(qid) = query_id {
                state.cache.put(qid, CacheEntry::Bad);
            }
            ApiError::BadParameter.into_response()
        }
        Err(ApiError::InternalEncoding) => {
            state.metrics.record_internal_error();
            ApiError::InternalEncoding.into_response()
        }
        Err(ApiError::NotFound) => unreachable!("group has no notion of a missing target account"),
    }
}

pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.metrics.record_request();

    let query_id = match require_query_id(&state, &params) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if let Some(qid) = query_id {
        if let Some(entry) = state.cache.get(qid) {
            state.metrics.record_cache_hit();
            return respond_from_cache(entry);
        }
    }

    let result = (|| -> Result<Vec<u8>, ApiError> {
        let target_id = parse_account_id(&id)?;
        let location = parse_location_query(&params)?;
        let query = RecommendQuery { target_id, country: location.country, city: location.city, limit: location.limit };
        let views = execute_recommend(&query, &state.store, &state.dicts, state.now).ok_or(ApiError::NotFound)?;
        encode_accounts(&views)
    })();

    finish(&state, query_id, result)
}

pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.metrics.record_request();

    let query_id = match require_query_id(&state, &params) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if let Some(qid) = query_id {
        if let Some(entry) = state.cache.get(qid) {
            state.metrics.record_cache_hit();
            return respond_from_cache(entry);
        }
    }

    let result = (|| -> Result<Vec<u8>, ApiError> {
        let target_id = parse_account_id(&id)?;
        let location = parse_location_query(&params)?;
        let query = SuggestQuery { target_id, country: location.country, city: location.city, limit: location.limit };
        let views = execute_suggest(&query, &state.store, &state.dicts).ok_or(ApiError::NotFound)?;
        encode_accounts(&views)
    })();

    finish(&state, query_id, result)
}

/// Shared tail for recommend/suggest, the two endpoints that can 404.
fn finish(state: &AppState, query_id: Option<i64>, result: Result<Vec<u8>, ApiError>) -> Response {
    match result {
        Ok(bytes) => {
            if let Some(qid) = query_id {
                state.cache.put(qid, CacheEntry::Success(bytes.clone()));
            }
            json_response(bytes)
        }
        Err(ApiError::BadParameter) => {
            state.metrics.record_bad_request();
            if let Some(qid) = query_id {
                state.cache.put(qid, CacheEntry::Bad);
            }
            ApiError::BadParameter.into_response()
        }
        Err(ApiError::NotFound) => {
            state.metrics.record_not_found();
            if let Some(qid) = query_id {
                state.cache.put(qid, CacheEntry::NotFound);
            }
            ApiError::NotFound.into_response()
        }
        Err(ApiError::InternalEncoding) => {
            state.metrics.record_internal_error();
            ApiError::InternalEncoding.into_response()
        }
    }
}

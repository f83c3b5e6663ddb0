//! Response body construction. A successful filter/recommend/suggest call
//! wraps its account list in `{"accounts": [...]}`; a successful group call
//! wraps its rows in `{"groups": [...]}` — the one example spec.md gives in
//! full (§8's filter example) uses the `accounts` envelope, and `groups` is
//! the same convention applied to the operator that returns aggregates
//! instead of accounts.

use serde::Serialize;

use crate::executor::{AccountView, GroupRow};

use super::errors::ApiError;

#[derive(Serialize)]
struct AccountsResponse<'a> {
    accounts: &'a [AccountView],
}

#[derive(Serialize)]
struct GroupsResponse<'a> {
    groups: &'a [GroupRow],
}

pub fn encode_accounts(views: &[AccountView]) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(&AccountsResponse { accounts: views }).map_err(|_| ApiError::InternalEncoding)
}

pub fn encode_groups(rows: &[GroupRow]) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(&GroupsResponse { groups: rows }).map_err(|_| ApiError::InternalEncoding)
}

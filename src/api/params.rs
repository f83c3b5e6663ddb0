//! Query-parameter parsing (§6, §7): each endpoint accepts a closed set of
//! keys; anything outside that set, an empty value, or a value that does
//! not parse into its expected shape is `ApiError::BadParameter`.
//!
//! Parsing happens entirely here so everything downstream — the planner,
//! the four operators — can assume well-formed input.

use std::collections::HashMap;

use crate::executor::{GroupKey, GroupPredicate, GroupQuery, Order};
use crate::model::{AccountId, Sex, Status};
use crate::planner::FilterPredicate;

use super::errors::ApiError;

fn non_empty(value: &str) -> Result<&str, ApiError> {
    if value.is_empty() {
        Err(ApiError::BadParameter)
    } else {
        Ok(value)
    }
}

fn parse_i64(value: &str) -> Result<i64, ApiError> {
    value.parse().map_err(|_| ApiError::BadParameter)
}

fn parse_bool_flag(value: &str) -> Result<bool, ApiError> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(ApiError::BadParameter),
    }
}

fn parse_limit(value: &str) -> Result<u32, ApiError> {
    let n = parse_i64(value)?;
    if n <= 0 {
        return Err(ApiError::BadParameter);
    }
    Ok(n as u32)
}

fn parse_csv_strings(value: &str) -> Result<Vec<String>, ApiError> {
    let parts: Vec<String> = value.split(',').map(str::to_string).collect();
    if parts.iter().any(String::is_empty) {
        return Err(ApiError::BadParameter);
    }
    Ok(parts)
}

fn parse_csv_ids(value: &str) -> Result<Vec<AccountId>, ApiError> {
    value.split(',').map(|p| p.parse::<AccountId>().map_err(|_| ApiError::BadParameter)).collect()
}

fn reject_unknown_keys(params: &HashMap<String, String>, allowed: &[&str]) -> Result<(), ApiError> {
    for key in params.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(ApiError::BadParameter);
        }
    }
    Ok(())
}

/// `query_id` is accepted by every endpoint regardless of its other keys
/// (§4.5); parsed separately so the four per-endpoint parsers below don't
/// each have to special-case it in their key whitelist loop.
pub fn parse_query_id(params: &HashMap<String, String>) -> Result<Option<i64>, ApiError> {
    match params.get("query_id") {
        None => Ok(None),
        Some(value) => parse_i64(non_empty(value)?).map(Some),
    }
}

pub struct FilterQuery {
    pub predicates: Vec<FilterPredicate>,
    pub limit: u32,
}

const FILTER_KEYS: &[&str] = &[
    "sex_eq",
    "email_domain",
    "email_lt",
    "email_gt",
    "status_eq",
    "status_neq",
    "fname_eq",
    "fname_any",
    "fname_null",
    "sname_eq",
    "sname_starts",
    "sname_null",
    "phone_code",
    "phone_null",
    "country_eq",
    "country_null",
    "city_eq",
    "city_any",
    "city_null",
    "birth_lt",
    "birth_gt",
    "birth_year",
    "interests_contains",
    "interests_any",
    "likes_contains",
    "premium_now",
    "premium_null",
    "limit",
    "query_id",
];

pub fn parse_filter_query(params: &HashMap<String, String>) -> Result<FilterQuery, ApiError> {
    reject_unknown_keys(params, FILTER_KEYS)?;

    let mut predicates = Vec::new();
    let mut limit = None;

    for (key, raw) in params {
        if key == "query_id" {
            continue;
        }
        let value = non_empty(raw)?;
        match key.as_str() {
            "sex_eq" => predicates.push(FilterPredicate::SexEq(Sex::parse(value).ok_or(ApiError::BadParameter)?)),
            "email_domain" => predicates.push(FilterPredicate::EmailDomain(value.to_string())),
            "email_lt" => predicates.push(FilterPredicate::EmailLt(value.to_string())),
            "email_gt" => predicates.push(FilterPredicate::EmailGt(value.to_string())),
            "status_eq" => {
                predicates.push(FilterPredicate::StatusEq(Status::parse(value).ok_or(ApiError::BadParameter)?))
            }
            "status_neq" => {
                predicates.push(FilterPredicate::StatusNeq(Status::parse(value).ok_or(ApiError::BadParameter)?))
            }
            "fname_eq" => predicates.push(FilterPredicate::FnameEq(value.to_string())),
            "fname_any" => predicates.push(FilterPredicate::FnameAny(parse_csv_strings(value)?)),
            "fname_null" => predicates.push(FilterPredicate::FnameNull(parse_bool_flag(value)?)),
            "sname_eq" => predicates.push(FilterPredicate::SnameEq(value.to_string())),
            "sname_starts" => predicates.push(FilterPredicate::SnameStarts(value.to_string())),
            "sname_null" => predicates.push(FilterPredicate::SnameNull(parse_bool_flag(value)?)),
            "phone_code" => predicates.push(FilterPredicate::PhoneCode(value.to_string())),
            "phone_null" => predicates.push(FilterPredicate::PhoneNull(parse_bool_flag(value)?)),
            "country_eq" => predicates.push(FilterPredicate::CountryEq(value.to_string())),
            "country_null" => predicates.push(FilterPredicate::CountryNull(parse_bool_flag(value)?)),
            "city_eq" => predicates.push(FilterPredicate::CityEq(value.to_string())),
            "city_any" => predicates.push(FilterPredicate::CityAny(parse_csv_strings(value)?)),
            "city_null" => predicates.push(FilterPredicate::CityNull(parse_bool_flag(value)?)),
            "birth_lt" => predicates.push(FilterPredicate::BirthLt(parse_i64(value)?)),
            "birth_gt" => predicates.push(FilterPredicate::BirthGt(parse_i64(value)?)),
            "birth_year" => predicates.push(FilterPredicate::BirthYear(parse_i64(value)? as i32)),
            "interests_contains" => predicates.push(FilterPredicate::InterestsContains(parse_csv_strings(value)?)),
            "interests_any" => predicates.push(FilterPredicate::InterestsAny(parse_csv_strings(value)?)),
            "likes_contains" => predicates.push(FilterPredicate::LikesContains(parse_csv_ids(value)?)),
            "premium_now" => predicates.push(FilterPredicate::PremiumNow),
            "premium_null" => predicates.push(FilterPredicate::PremiumNull(parse_bool_flag(value)?)),
            "limit" => limit = Some(parse_limit(value)?),
            other => unreachable!("key {other} passed the whitelist check above"),
        }
    }

    Ok(FilterQuery { predicates, limit: limit.ok_or(ApiError::BadParameter)? })
}

const GROUP_KEYS: &[&str] =
    &["sex", "status", "country", "city", "birth", "joined", "interests", "likes", "limit", "order", "keys", "query_id"];

pub fn parse_group_query(params: &HashMap<String, String>) -> Result<GroupQuery, ApiError> {
    reject_unknown_keys(params, GROUP_KEYS)?;

    let mut predicates = Vec::new();
    let mut limit = None;
    let mut order = None;
    let mut keys = None;

    for (key, raw) in params {
        if key == "query_id" {
            continue;
        }
        let value = non_empty(raw)?;
        match key.as_str() {
            "sex" => predicates.push(GroupPredicate::Sex(Sex::parse(value).ok_or(ApiError::BadParameter)?)),
            "status" => predicates.push(GroupPredicate::Status(Status::parse(value).ok_or(ApiError::BadParameter)?)),
            "country" => predicates.push(GroupPredicate::Country(value.to_string())),
            "city" => predicates.push(GroupPredicate::City(value.to_string())),
            "birth" => predicates.push(GroupPredicate::BirthYear(parse_i64(value)? as i32)),
            "joined" => predicates.push(GroupPredicate::JoinedYear(parse_i64(value)? as i32)),
            "interests" => predicates.push(GroupPredicate::Interests(value.to_string())),
            "likes" => {
                let id = value.parse::<AccountId>().map_err(|_| ApiError::BadParameter)?;
                predicates.push(GroupPredicate::Likes(id));
            }
            "limit" => limit = Some(parse_limit(value)?),
            "order" => {
                order = Some(match value {
                    "1" => Order::Ascending,
                    "-1" => Order::Descending,
                    _ => return Err(ApiError::BadParameter),
                });
            }
            "keys" => {
                let mut parsed = Vec::new();
                for name in parse_csv_strings(value)? {
                    parsed.push(match name.as_str() {
                        "sex" => GroupKey::Sex,
                        "status" => GroupKey::Status,
                        "interests" => GroupKey::Interests,
                        "country" => GroupKey::Country,
                        "city" => GroupKey::City,
                        _ => return Err(ApiError::BadParameter),
                    });
                }
                if parsed.is_empty() {
                    return Err(ApiError::BadParameter);
                }
                keys = Some(parsed);
            }
            other => unreachable!("key {other} passed the whitelist check above"),
        }
    }

    Ok(GroupQuery {
        predicates,
        keys: keys.ok_or(ApiError::BadParameter)?,
        order: order.ok_or(ApiError::BadParameter)?,
        limit: limit.ok_or(ApiError::BadParameter)?,
    })
}

/// The location/limit parameters shared verbatim by recommend and suggest
/// (§6: "Recommend/suggest keys: country, city, limit").
pub struct LocationQuery {
    pub country: Option<String>,
    pub city: Option<String>,
    pub limit: u32,
}

const LOCATION_KEYS: &[&str] = &["country", "city", "limit", "query_id"];

pub fn parse_location_query(params: &HashMap<String, String>) -> Result<LocationQuery, ApiError> {
    reject_unknown_keys(params, LOCATION_KEYS)?;

    let mut country = None;
    let mut city = None;
    let mut limit = None;

    for (key, raw) in params {
        if key == "query_id" {
            continue;
        }
        let value = non_empty(raw)?;
        match key.as_str() {
            "country" => country = Some(value.to_string()),
            "city" => city = Some(value.to_string()),
            "limit" => limit = Some(parse_limit(value)?),
            other => unreachable!("key {other} passed the whitelist check above"),
        }
    }

    Ok(LocationQuery { country, city, limit: limit.ok_or(ApiError::BadParameter)? })
}

/// Parses a path segment (`/accounts/<id>/recommend/`) into an account id.
pub fn parse_account_id(raw: &str) -> Result<AccountId, ApiError> {
    raw.parse().map_err(|_| ApiError::BadParameter)
}

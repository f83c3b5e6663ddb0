//! Turns decoded [`RawAccount`] values into packed [`Record`]s, interning
//! categorical columns into `dicts` as it goes. Single-threaded by
//! necessity (dictionary assignment order must be deterministic — two
//! accounts racing to intern the same new string must not be able to
//! receive different ids), per §4.1 "during load it is single-threaded".

use std::collections::HashSet;

use regex::Regex;

use crate::dictionary::Dictionaries;
use crate::model::{AccountId, RawAccount, Sex, Status};
use crate::storage::errors::{StorageError, StorageResult};
use crate::storage::record::Record;

/// `8(495)1234567` — captures the 3-digit code between the parens.
fn phone_code_pattern() -> &'static Regex {
    static PATTERN: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^8\((\d{3})\)\d+$").unwrap())
}

fn extract_phone_code(phone: &str) -> Option<String> {
    phone_code_pattern()
        .captures(phone)
        .map(|caps| caps[1].to_string())
}

/// Builds the full set of [`Record`]s from raw accounts, interning
/// categorical fields into `dicts`. Rejects duplicate ids and unrecognized
/// sex/status codes; everything else (absent optional fields, unparsed
/// phone numbers) degrades gracefully rather than failing the whole load.
pub fn build_records(raw: Vec<RawAccount>, dicts: &mut Dictionaries) -> StorageResult<Vec<Record>> {
    let mut seen_ids = HashSet::with_capacity(raw.len());
    let mut records = Vec::with_capacity(raw.len());

    for account in raw {
        if !seen_ids.insert(account.id) {
            return Err(StorageError::DuplicateId(account.id));
        }

        let sex = Sex::parse(&account.sex).ok_or_else(|| StorageError::InvalidSex {
            id: account.id,
            value: account.sex.clone(),
        })?;
        let status = Status::parse(&account.status).ok_or_else(|| StorageError::InvalidStatus {
            id: account.id,
            value: account.status.clone(),
        })?;

        records.push(build_one(account, sex, status, dicts)?);
    }

    Ok(records)
}

fn build_one(
    account: RawAccount,
    sex: Sex,
    status: Status,
    dicts: &mut Dictionaries,
) -> StorageResult<Record> {
    let fname_id = match account.fname.as_deref().filter(|s| !s.is_empty()) {
        Some(v) => Some(dicts.fname.intern(v).map_err(|_| StorageError::DictionaryCapacity {
            field: "fname",
            value: v.to_string(),
        })?),
        None => None,
    };
    let sname_id = match account.sname.as_deref().filter(|s| !s.is_empty()) {
        Some(v) => Some(dicts.sname.intern(v).map_err(|_| StorageError::DictionaryCapacity {
            field: "sname",
            value: v.to_string(),
        })?),
        None => None,
    };
    let country_id = match account.country.as_deref().filter(|s| !s.is_empty()) {
        Some(v) => Some(dicts.country.intern(v).map_err(|_| StorageError::DictionaryCapacity {
            field: "country",
            value: v.to_string(),
        })?),
        None => None,
    };
    let city_id = match account.city.as_deref().filter(|s| !s.is_empty()) {
        Some(v) => Some(dicts.city.intern(v).map_err(|_| StorageError::DictionaryCapacity {
            field: "city",
            value: v.to_string(),
        })?),
        None => None,
    };

    let mut interests: Vec<u16> = Vec::with_capacity(account.interests.len());
    for interest in &account.interests {
        if interest.is_empty() {
            continue;
        }
        let id = dicts
            .interest
            .intern(interest)
            .map_err(|_| StorageError::DictionaryCapacity {
                field: "interest",
                value: interest.clone(),
            })?;
        interests.push(id);
    }
    interests.sort_unstable();
    interests.dedup();

    let phone = account.phone.filter(|s| !s.is_empty());
    let phone_code = phone.as_deref().and_then(extract_phone_code);

    let premium = account.premium.map(|p| (p.start, p.finish));

    let likes: Vec<(AccountId, i64)> = account.likes.into_iter().map(|l| (l.id, l.ts)).collect();

    Ok(Record {
        id: account.id,
        email: account.email,
        phone,
        phone_code,
        fname_id,
        sname_id,
        country_id,
        city_id,
        sex,
        status,
        birth: account.birth as i32,
        joined: account.joined as i32,
        interests,
        premium,
        likes,
    })
}

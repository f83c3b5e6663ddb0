//! Raw account schema as it arrives from the archive, and the small closed
//! enumerations (`Sex`, `Status`) shared between the wire format and the
//! record store.

use chrono::{Datelike, TimeZone, Utc};
use serde::Deserialize;
use std::fmt;

pub type AccountId = u32;

/// UTC calendar year of a seconds-epoch timestamp (§4.3's `birth_year`, the
/// group operator's `birth`/`joined` year predicates).
pub fn year_of(seconds: i32) -> Option<i32> {
    Utc.timestamp_opt(seconds as i64, 0).single().map(|dt| dt.year())
}

/// One account as decoded from a `*.json` file inside `data.zip`.
///
/// Unknown JSON fields are ignored (`serde(default)` fills absent ones);
/// this struct intentionally mirrors the JSON schema 1:1 and performs no
/// validation — that happens in [`crate::storage::builder`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawAccount {
    pub id: AccountId,
    pub email: String,
    #[serde(default)]
    pub fname: Option<String>,
    #[serde(default)]
    pub sname: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub sex: String,
    pub birth: i64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    pub joined: i64,
    pub status: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub premium: Option<RawPremium>,
    #[serde(default)]
    pub likes: Vec<RawLike>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPremium {
    pub start: i64,
    pub finish: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLike {
    pub id: AccountId,
    pub ts: i64,
}

/// A JSON file inside `data.zip` is `{"accounts": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAccountFile {
    #[serde(default)]
    pub accounts: Vec<RawAccount>,
}

/// Biological sex, coded `m`=0, `f`=1 per the dictionary fixed at §4.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Sex {
    Male = 0,
    Female = 1,
}

impl Sex {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn opposite(self) -> Sex {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "m",
            Sex::Female => "f",
        }
    }

    pub fn parse(s: &str) -> Option<Sex> {
        match s {
            "m" => Some(Sex::Male),
            "f" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relationship status, coded 0/1/2 per the dictionary fixed at §4.1.
/// The wire representation is the localized Russian string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    Free = 0,
    Busy = 1,
    Complicated = 2,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Free, Status::Busy, Status::Complicated];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Free => "свободны",
            Status::Busy => "заняты",
            Status::Complicated => "всё сложно",
        }
    }

    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "свободны" => Some(Status::Free),
            "заняты" => Some(Status::Busy),
            "всё сложно" => Some(Status::Complicated),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_roundtrip() {
        assert_eq!(Sex::parse("m"), Some(Sex::Male));
        assert_eq!(Sex::parse("f"), Some(Sex::Female));
        assert_eq!(Sex::parse("x"), None);
        assert_eq!(Sex::Male.opposite(), Sex::Female);
    }

    #[test]
    fn status_roundtrip() {
        for status in Status::ALL {
            assert_eq!(Status::parse(status.as_str()), Some(status));
        }
        assert_eq!(Status::parse("unknown"), None);
    }
}

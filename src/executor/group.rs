//! The group operator (§4.4.1): inline-scan aggregation with an optional
//! `interests` unwind and multi-key ordered sort.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::dictionary::Dictionaries;
use crate::model::{year_of, AccountId, Sex, Status};
use crate::storage::{Record, RecordStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Sex,
    Status,
    Interests,
    Country,
    City,
}

impl GroupKey {
    pub fn name(self) -> &'static str {
        match self {
            GroupKey::Sex => "sex",
            GroupKey::Status => "status",
            GroupKey::Interests => "interests",
            GroupKey::Country => "country",
            GroupKey::City => "city",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GroupPredicate {
    Sex(Sex),
    Status(Status),
    Country(String),
    City(String),
    BirthYear(i32),
    JoinedYear(i32),
    Interests(String),
    Likes(AccountId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

pub struct GroupQuery {
    pub predicates: Vec<GroupPredicate>,
    pub keys: Vec<GroupKey>,
    pub order: Order,
    pub limit: u32,
}

/// One output row, serialized as `{<key>: <value>, ..., "count": n}` with
/// keys in the exact order the caller asked for them — a plain
/// `serde_json::Map` would alphabetize and break that order.
pub struct GroupRow {
    fields: Vec<(&'static str, String)>,
    count: u64,
}

impl Serialize for GroupRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("count", &self.count)?;
        map.end()
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Default)]
struct Tuple {
    sex: String,
    status: String,
    interests: String,
    country: String,
    city: String,
}

impl Tuple {
    fn field(&self, key: GroupKey) -> &str {
        match key {
            GroupKey::Sex => &self.sex,
            GroupKey::Status => &self.status,
            GroupKey::Interests => &self.interests,
            GroupKey::Country => &self.country,
            GroupKey::City => &self.city,
        }
    }
}

fn matches(record: &Record, predicates: &[GroupPredicate], dicts: &Dictionaries) -> bool {
    predicates.iter().all(|p| match p {
        GroupPredicate::Sex(sex) => record.sex == *sex,
        GroupPredicate::Status(status) => record.status == *status,
        GroupPredicate::Country(name) => match dicts.country.lookup(name) {
            Some(id) => record.country_id == Some(id),
            None => false,
        },
        GroupPredicate::City(name) => match dicts.city.lookup(name) {
            Some(id) => record.city_id == Some(id),
            None => false,
        },
        GroupPredicate::BirthYear(year) => year_of(record.birth) == Some(*year),
        GroupPredicate::JoinedYear(year) => year_of(record.joined) == Some(*year),
        GroupPredicate::Interests(name) => match dicts.interest.lookup(name) {
            Some(id) => record.interests.binary_search(&id).is_ok(),
            None => false,
        },
        GroupPredicate::Likes(target) => record.likes.iter().any(|&(id, _)| id == *target),
    })
}

/// Runs the group operator end to end, returning up to `query.limit` rows.
pub fn execute_group(query: &GroupQuery, store: &RecordStore, dicts: &Dictionaries) -> Vec<GroupRow> {
    let unwind_interests = query.keys.contains(&GroupKey::Interests);
    let mut counts: HashMap<Tuple, u64> = HashMap::new();

    for record in store.records() {
        if !matches(record, &query.predicates, dicts) {
            continue;
        }

        if unwind_interests {
            for &interest_id in &record.interests {
                let tuple = tuple_for(record, &query.keys, dicts, Some(interest_id));
                *counts.entry(tuple).or_insert(0) += 1;
            }
        } else {
            let tuple = tuple_for(record, &query.keys, dicts, None);
            *counts.entry(tuple).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<(Tuple, u64)> = counts.into_iter().collect();
    rows.sort_by(|(tuple_a, count_a), (tuple_b, count_b)| {
        let key_a = sort_key(tuple_a, *count_a, &query.keys);
        let key_b = sort_key(tuple_b, *count_b, &query.keys);
        match query.order {
            Order::Ascending => key_a.cmp(&key_b),
            Order::Descending => key_b.cmp(&key_a),
        }
    });

    rows.into_iter()
        .take(query.limit as usize)
        .map(|(tuple, count)| GroupRow {
            fields: query.keys.iter().map(|&k| (k.name(), tuple.field(k).to_string())).collect(),
            count,
        })
        .collect()
}

fn tuple_for(record: &Record, keys: &[GroupKey], dicts: &Dictionaries, interest_id: Option<u16>) -> Tuple {
    let has = |k: GroupKey| keys.contains(&k);
    Tuple {
        sex: if has(GroupKey::Sex) { record.sex.as_str().to_string() } else { String::new() },
        status: if has(GroupKey::Status) { record.status.as_str().to_string() } else { String::new() },
        interests: if has(GroupKey::Interests) {
            interest_id.map(|id| dicts.interest.resolve(id).to_string()).unwrap_or_default()
        } else {
            String::new()
        },
        country: if has(GroupKey::Country) {
            record.country_id.map(|id| dicts.country.resolve(id).to_string()).unwrap_or_default()
        } else {
            String::new()
        },
        city: if has(GroupKey::City) {
            record.city_id.map(|id| dicts.city.resolve(id).to_string()).unwrap_or_default()
        } else {
            String::new()
        },
    }
}

fn sort_key(tuple: &Tuple, count: u64, keys: &[GroupKey]) -> (u64, Vec<String>) {
    (count, keys.iter().map(|&k| tuple.field(k).to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: AccountId, sex: Sex, status: Status) -> Record {
        Record {
            id,
            email: format!("{id}@x.io"),
            phone: None,
            phone_code: None,
            fname_id: None,
            sname_id: None,
            country_id: None,
            city_id: None,
            sex,
            status,
            birth: 0,
            joined: 0,
            interests: vec![],
            premium: None,
            likes: vec![],
        }
    }

    #[test]
    fn groups_by_sex_and_status_sorted_descending() {
        let store = RecordStore::from_records(vec![
            rec(1, Sex::Male, Status::Free),
            rec(2, Sex::Female, Status::Busy),
            rec(3, Sex::Female, Status::Free),
        ]);
        let dicts = Dictionaries::new();
        let query = GroupQuery {
            predicates: vec![],
            keys: vec![GroupKey::Sex, GroupKey::Status],
            order: Order::Descending,
            limit: 10,
        };
        let rows = execute_group(&query, &store, &dicts);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].fields[0].1, "m");
    }

    #[test]
    fn unwinds_interests_into_one_tuple_per_value() {
        let mut a = rec(1, Sex::Male, Status::Free);
        let mut dicts = Dictionaries::new();
        let tea = dicts.interest.intern("tea").unwrap();
        let jazz = dicts.interest.intern("jazz").unwrap();
        a.interests = vec![tea, jazz];
        let store = RecordStore::from_records(vec![a]);
        let query = GroupQuery {
            predicates: vec![],
            keys: vec![GroupKey::Interests],
            order: Order::Ascending,
            limit: 10,
        };
        let rows = execute_group(&query, &store, &dicts);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn limit_truncates_results() {
        let store = RecordStore::from_records(vec![
            rec(1, Sex::Male, Status::Free),
            rec(2, Sex::Female, Status::Busy),
        ]);
        let dicts = Dictionaries::new();
        let query = GroupQuery {
            predicates: vec![],
            keys: vec![GroupKey::Sex],
            order: Order::Ascending,
            limit: 1,
        };
        assert_eq!(execute_group(&query, &store, &dicts).len(), 1);
    }
}

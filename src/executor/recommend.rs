//! The recommend operator (§4.4.2): opposite-sex, shared-interest
//! candidates ranked by a compatibility score.

use crate::dictionary::Dictionaries;
use crate::model::AccountId;
use crate::planner::Projection;
use crate::storage::{Record, RecordStore};

use super::view::{materialize, AccountView};

const PREMIUM_BONUS: i64 = 1_000_000_000_000;
const STATUS_BONUS_FREE: i64 = 300_000_000_000;
const STATUS_BONUS_COMPLICATED: i64 = 200_000_000_000;
const STATUS_BONUS_BUSY: i64 = 100_000_000_000;
const INTEREST_BONUS: i64 = 10_000_000_000;
const BIRTH_BASE: i64 = 1_000_000_000;

pub struct RecommendQuery {
    pub target_id: AccountId,
    pub country: Option<String>,
    pub city: Option<String>,
    pub limit: u32,
}

fn status_bonus(record: &Record) -> i64 {
    use crate::model::Status::*;
    match record.status {
        Free => STATUS_BONUS_FREE,
        Complicated => STATUS_BONUS_COMPLICATED,
        Busy => STATUS_BONUS_BUSY,
    }
}

fn compatibility(target: &Record, candidate: &Record, shared_interests: u32, now: i64) -> i64 {
    let premium_bonus = if candidate.has_premium_now(now) { PREMIUM_BONUS } else { 0 };
    let interest_bonus = INTEREST_BONUS * shared_interests as i64;
    let birth_closeness = BIRTH_BASE - (candidate.birth as i64 - target.birth as i64).abs();
    premium_bonus + status_bonus(candidate) + interest_bonus + birth_closeness
}

/// Returns `None` when `target_id` is not in the store (404, §4.4.2).
pub fn execute_recommend(
    query: &RecommendQuery,
    store: &RecordStore,
    dicts: &Dictionaries,
    now: i64,
) -> Option<Vec<AccountView>> {
    let target = store.find_by_id(query.target_id)?;
    let opposite_sex = target.sex.opposite();
    let country_id = query.country.as_deref().and_then(|c| dicts.country.lookup(c));
    let city_id = query.city.as_deref().and_then(|c| dicts.city.lookup(c));

    // A requested location with no dictionary entry can't match anyone.
    if query.country.is_some() && country_id.is_none() {
        return Some(Vec::new());
    }
    if query.city.is_some() && city_id.is_none() {
        return Some(Vec::new());
    }

    let mut scored: Vec<(i64, AccountId)> = Vec::new();
    for candidate in store.records() {
        if candidate.id == target.id || candidate.sex != opposite_sex {
            continue;
        }
        if let Some(id) = country_id {
            if candidate.country_id != Some(id) {
                continue;
            }
        }
        if let Some(id) = city_id {
            if candidate.city_id != Some(id) {
                continue;
            }
        }
        let shared = target.shared_interest_count(candidate);
        if shared == 0 {
            continue;
        }
        scored.push((compatibility(target, candidate, shared, now), candidate.id));
    }

    // Descending compatibility, ascending id tie-break (§9 open question).
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let positions: Vec<u32> = scored
        .iter()
        .filter_map(|(_, id)| store.position_of(*id))
        .collect();

    Some(materialize(&positions, query.limit, Projection::recommend_fixed(), store, dicts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Sex, Status};

    fn rec(id: AccountId, sex: Sex, status: Status, birth: i32, interests: Vec<u16>) -> Record {
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
            birth,
            joined: 0,
            interests,
            premium: None,
            likes: vec![],
        }
    }

    #[test]
    fn missing_target_returns_none() {
        let store = RecordStore::from_records(vec![rec(1, Sex::Male, Status::Free, 0, vec![])]);
        let dicts = Dictionaries::new();
        let query = RecommendQuery { target_id: 99, country: None, city: None, limit: 5 };
        assert!(execute_recommend(&query, &store, &dicts, 0).is_none());
    }

    #[test]
    fn ranks_free_over_busy_when_sharing_one_interest_each() {
        let target = rec(1, Sex::Male, Status::Free, 0, vec![1, 2]);
        let busy_match = rec(2, Sex::Female, Status::Busy, 0, vec![2]);
        let free_match = rec(3, Sex::Female, Status::Free, 0, vec![1]);
        let store = RecordStore::from_records(vec![target, busy_match, free_match]);
        let dicts = Dictionaries::new();
        let query = RecommendQuery { target_id: 1, country: None, city: None, limit: 5 };
        let views = execute_recommend(&query, &store, &dicts, 0).unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, 3);
        assert_eq!(views[1].id, 2);
    }

    #[test]
    fn excludes_candidates_without_shared_interests() {
        let target = rec(1, Sex::Male, Status::Free, 0, vec![1]);
        let stranger = rec(2, Sex::Female, Status::Free, 0, vec![2]);
        let store = RecordStore::from_records(vec![target, stranger]);
        let dicts = Dictionaries::new();
        let query = RecommendQuery { target_id: 1, country: None, city: None, limit: 5 };
        let views = execute_recommend(&query, &store, &dicts, 0).unwrap();
        assert!(views.is_empty());
    }
}

//! The suggest operator (§4.4.3): same-sex, shared-like candidates ranked
//! by a timestamp-similarity score, whose own likes seed the result set.

use std::collections::{HashMap, HashSet};

use crate::dictionary::Dictionaries;
use crate::model::AccountId;
use crate::planner::Projection;
use crate::storage::{Record, RecordStore};

use super::view::{materialize, AccountView};

pub struct SuggestQuery {
    pub target_id: AccountId,
    pub country: Option<String>,
    pub city: Option<String>,
    pub limit: u32,
}

fn average_ts_by_id(likes: &[(AccountId, i64)]) -> HashMap<AccountId, f64> {
    let mut sums: HashMap<AccountId, (i64, u32)> = HashMap::new();
    for &(id, ts) in likes {
        let entry = sums.entry(id).or_insert((0, 0));
        entry.0 += ts;
        entry.1 += 1;
    }
    sums.into_iter().map(|(id, (sum, count))| (id, sum as f64 / count as f64)).collect()
}

fn similarity(target_likes: &HashMap<AccountId, f64>, candidate_likes: &HashMap<AccountId, f64>) -> f64 {
    target_likes
        .iter()
        .filter_map(|(id, &avg_target)| candidate_likes.get(id).map(|&avg_candidate| (avg_target, avg_candidate)))
        .map(|(avg_target, avg_candidate)| {
            if avg_target == avg_candidate {
                1.0
            } else {
                1.0 / (avg_target - avg_candidate).abs()
            }
        })
        .sum()
}

/// Returns `None` when `target_id` is not in the store (404, §4.4.3).
pub fn execute_suggest(
    query: &SuggestQuery,
    store: &RecordStore,
    dicts: &Dictionaries,
) -> Option<Vec<AccountView>> {
    let target = store.find_by_id(query.target_id)?;
    let country_id = query.country.as_deref().and_then(|c| dicts.country.lookup(c));
    let city_id = query.city.as_deref().and_then(|c| dicts.city.lookup(c));
    if query.country.is_some() && country_id.is_none() {
        return Some(Vec::new());
    }
    if query.city.is_some() && city_id.is_none() {
        return Some(Vec::new());
    }

    let target_likes = average_ts_by_id(&target.likes);
    let target_liked_ids: HashSet<AccountId> = target_likes.keys().copied().collect();

    let mut candidates: Vec<(&Record, f64)> = Vec::new();
    for candidate in store.records() {
        if candidate.id == target.id || candidate.sex != target.sex {
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
        let candidate_likes = average_ts_by_id(&candidate.likes);
        if !candidate_likes.keys().any(|id| target_liked_ids.contains(id)) {
            continue;
        }
        let sim = similarity(&target_likes, &candidate_likes);
        candidates.push((candidate, sim));
    }

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut collected: Vec<AccountId> = Vec::new();
    let mut seen: HashSet<AccountId> = HashSet::new();
    'outer: for (candidate, _) in &candidates {
        let mut new_ids: Vec<AccountId> = candidate
            .likes
            .iter()
            .map(|&(id, _)| id)
            .filter(|id| !target_liked_ids.contains(id))
            .collect();
        new_ids.sort_unstable_by(|a, b| b.cmp(a));
        new_ids.dedup();

        for id in new_ids {
            if seen.insert(id) {
                collected.push(id);
                if collected.len() >= query.limit as usize {
                    break 'outer;
                }
            }
        }
    }
    collected.truncate(query.limit as usize);

    let positions: Vec<u32> = collected.iter().filter_map(|&id| store.position_of(id)).collect();
    Some(materialize(&positions, query.limit, Projection::suggest_fixed(), store, dicts))
}

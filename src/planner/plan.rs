//! Translates a validated predicate list into posting-list operations and
//! runs the intersection/union algebra (§4.4.1, §4.4.2).
//!
//! `_contains`-shaped predicates (`interests_contains`, `likes_contains`)
//! contribute **one posting list per value**, every one of which joins the
//! global intersection bag — an account must match all of them (AND).
//! `_any`-shaped predicates (`fname_any`, `city_any`, `interests_any`)
//! pre-union their per-value posting lists into a single list before it
//! enters the bag — an account needs only one of the listed values (OR),
//! and the whole group then joins the AND with everything else.

use crate::dictionary::Dictionaries;
use crate::index::{intersect_desc, union_desc, IndexSet};

use super::predicate::{FilterPredicate, Projection};

pub struct FilterPlan {
    /// Matching record positions, already sorted descending.
    pub positions: Vec<u32>,
    pub projection: Projection,
}

/// Runs the planner+executor combine step (§4.4.2) for `/accounts/filter/`.
pub fn plan_filter(predicates: &[FilterPredicate], index: &IndexSet, dicts: &Dictionaries) -> FilterPlan {
    let mut projection = Projection::default();
    for predicate in predicates {
        projection.merge(predicate.forces());
    }

    if predicates.is_empty() {
        return FilterPlan {
            positions: index.all_descending().to_vec(),
            projection,
        };
    }

    let owned_lists: Vec<Vec<u32>> = predicates
        .iter()
        .map(|p| resolve_predicate(p, index, dicts))
        .collect();

    let positions = if owned_lists.len() == 1 {
        owned_lists.into_iter().next().unwrap()
    } else {
        intersect_desc(owned_lists.iter().map(Vec::as_slice).collect())
    };

    FilterPlan { positions, projection }
}

/// Resolves one predicate into its (possibly pre-unioned) posting list.
fn resolve_predicate(predicate: &FilterPredicate, index: &IndexSet, dicts: &Dictionaries) -> Vec<u32> {
    match predicate {
        FilterPredicate::SexEq(sex) => index.sex_eq(sex.code()).to_vec(),
        FilterPredicate::EmailDomain(domain) => index.email_domain(domain).to_vec(),
        FilterPredicate::EmailLt(bound) => index.email_lt(bound),
        FilterPredicate::EmailGt(bound) => index.email_gt(bound),
        FilterPredicate::StatusEq(status) => index.status_eq(status.code()).to_vec(),
        FilterPredicate::StatusNeq(status) => index.status_neq(status.code()).to_vec(),
        FilterPredicate::FnameEq(value) => match dicts.fname.lookup(value) {
            Some(id) => index.fname_eq(id).to_vec(),
            None => Vec::new(),
        },
        FilterPredicate::FnameAny(values) => union_by_lookup(values, index, dicts, |idx, id| idx.fname_eq(id), |d, v| d.fname.lookup(v)),
        FilterPredicate::FnameNull(is_null) => index.fname_null(*is_null).to_vec(),
        FilterPredicate::SnameEq(value) => match dicts.sname.lookup(value) {
            Some(id) => index.sname_eq(id).to_vec(),
            None => Vec::new(),
        },
        FilterPredicate::SnameStarts(prefix) => index.sname_starts(prefix).to_vec(),
        FilterPredicate::SnameNull(is_null) => index.sname_null(*is_null).to_vec(),
        FilterPredicate::PhoneCode(code) => index.phone_code(code).to_vec(),
        FilterPredicate::PhoneNull(is_null) => index.phone_null(*is_null).to_vec(),
        FilterPredicate::CountryEq(value) => match dicts.country.lookup(value) {
            Some(id) => index.country_eq(id).to_vec(),
            None => Vec::new(),
        },
        FilterPredicate::CountryNull(is_null) => index.country_null(*is_null).to_vec(),
        FilterPredicate::CityEq(value) => match dicts.city.lookup(value) {
            Some(id) => index.city_eq(id).to_vec(),
            None => Vec::new(),
        },
        FilterPredicate::CityAny(values) => union_by_lookup(values, index, dicts, |idx, id| idx.city_eq(id), |d, v| d.city.lookup(v)),
        FilterPredicate::CityNull(is_null) => index.city_null(*is_null).to_vec(),
        FilterPredicate::BirthLt(bound) => index.birth_lt(*bound as i32),
        FilterPredicate::BirthGt(bound) => index.birth_gt(*bound as i32),
        FilterPredicate::BirthYear(year) => index.birth_year(*year).to_vec(),
        FilterPredicate::InterestsContains(values) => {
            // One list per value; intersected at the call site along with
            // every other predicate's list (AND semantics).
            let lists: Vec<Vec<u32>> = values
                .iter()
                .map(|v| match dicts.interest.lookup(v) {
                    Some(id) => index.interests(id).to_vec(),
                    None => Vec::new(),
                })
                .collect();
            intersect_desc(lists.iter().map(Vec::as_slice).collect())
        }
        FilterPredicate::InterestsAny(values) => {
            union_by_lookup(values, index, dicts, |idx, id| idx.interests(id), |d, v| d.interest.lookup(v))
        }
        FilterPredicate::LikesContains(ids) => {
            let lists: Vec<Vec<u32>> = ids.iter().map(|&id| index.likes_contains(id).to_vec()).collect();
            intersect_desc(lists.iter().map(Vec::as_slice).collect())
        }
        FilterPredicate::PremiumNow => index.premium_now().to_vec(),
        FilterPredicate::PremiumNull(is_null) => index.premium_null(*is_null).to_vec(),
    }
}

/// Unions the posting lists of every value in `values` that resolves to a
/// dictionary id; values with no dictionary entry contribute nothing (a
/// dictionary miss is "no record can match", not an error — §4.4 edge
/// cases).
fn union_by_lookup<Id>(
    values: &[String],
    index: &IndexSet,
    dicts: &Dictionaries,
    list_for: impl Fn(&IndexSet, Id) -> &[u32],
    lookup: impl Fn(&Dictionaries, &str) -> Option<Id>,
) -> Vec<u32> {
    let lists: Vec<Vec<u32>> = values
        .iter()
        .filter_map(|v| lookup(dicts, v))
        .map(|id| list_for(index, id).to_vec())
        .collect();
    union_desc(lists.iter().map(Vec::as_slice).collect())
}

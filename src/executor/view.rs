//! The materialized output record (§4.4 step 3): resolves dictionary ids
//! back to strings and keeps only the fields the projection forces.
//! `interests`, `likes`, and `joined` never appear here — no operator
//! emits them.

use serde::Serialize;

use crate::dictionary::Dictionaries;
use crate::model::AccountId;
use crate::planner::Projection;
use crate::storage::{Record, RecordStore};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PremiumView {
    pub start: i64,
    pub finish: i64,
}

/// One account as it appears in an HTTP response. `id`/`email` are always
/// present; everything else is omitted entirely when absent rather than
/// serialized as `null` (§8).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountView {
    pub id: AccountId,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium: Option<PremiumView>,
}

impl AccountView {
    /// Builds a view of `record` keeping only the fields `projection`
    /// forces, resolving interned ids back to strings via `dicts`.
    pub fn project(record: &Record, projection: Projection, dicts: &Dictionaries) -> Self {
        AccountView {
            id: record.id,
            email: record.email.clone(),
            sex: projection.sex.then(|| record.sex.as_str()),
            status: projection.status.then(|| record.status.as_str()),
            fname: projection
                .fname
                .then(|| record.fname_id.map(|id| dicts.fname.resolve(id).to_string()))
                .flatten(),
            sname: projection
                .sname
                .then(|| record.sname_id.map(|id| dicts.sname.resolve(id).to_string()))
                .flatten(),
            phone: projection.phone.then(|| record.phone.clone()).flatten(),
            country: projection
                .country
                .then(|| record.country_id.map(|id| dicts.country.resolve(id).to_string()))
                .flatten(),
            city: projection
                .city
                .then(|| record.city_id.map(|id| dicts.city.resolve(id).to_string()))
                .flatten(),
            birth: projection.birth.then_some(record.birth as i64),
            premium: projection
                .premium
                .then(|| record.premium.map(|(start, finish)| PremiumView { start, finish }))
                .flatten(),
        }
    }
}

/// Materializes up to `limit` positions (already ordered) into views.
pub fn materialize(positions: &[u32], limit: u32, projection: Projection, store: &RecordStore, dicts: &Dictionaries) -> Vec<AccountView> {
    positions
        .iter()
        .take(limit as usize)
        .map(|&pos| AccountView::project(store.at(pos), projection, dicts))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Sex, Status};

    #[test]
    fn projection_hides_fields_not_forced() {
        let record = Record {
            id: 1,
            email: "a@x.io".to_string(),
            phone: None,
            phone_code: None,
            fname_id: None,
            sname_id: None,
            country_id: None,
            city_id: None,
            sex: Sex::Male,
            status: Status::Free,
            birth: 0,
            joined: 0,
            interests: vec![],
            premium: None,
            likes: vec![],
        };
        let dicts = Dictionaries::new();
        let view = AccountView::project(&record, Projection::default(), &dicts);
        assert_eq!(view.sex, None);
        assert_eq!(view.status, None);

        let mut projection = Projection::default();
        projection.sex = true;
        let view = AccountView::project(&record, projection, &dicts);
        assert_eq!(view.sex, Some("m"));
    }
}

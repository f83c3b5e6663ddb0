//! The filter operator (§4.4): plan, then materialize up to `limit` hits.

use crate::dictionary::Dictionaries;
use crate::index::IndexSet;
use crate::planner::{plan_filter, FilterPredicate};
use crate::storage::RecordStore;

use super::view::{materialize, AccountView};

pub fn execute_filter(
    predicates: &[FilterPredicate],
    limit: u32,
    store: &RecordStore,
    index: &IndexSet,
    dicts: &Dictionaries,
) -> Vec<AccountView> {
    let plan = plan_filter(predicates, index, dicts);
    materialize(&plan.positions, limit, plan.projection, store, dicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Sex, Status};
    use crate::storage::Record;

    fn rec(id: u32, sex: Sex) -> Record {
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
            status: Status::Free,
            birth: 0,
            joined: 0,
            interests: vec![],
            premium: None,
            likes: vec![],
        }
    }

    #[test]
    fn filter_respects_limit_and_descending_order() {
        let store = RecordStore::from_records(vec![rec(1, Sex::Male), rec(2, Sex::Male), rec(3, Sex::Male)]);
        let dicts = Dictionaries::new();
        let index = IndexSet::build(&store, &dicts, 0);
        let views = execute_filter(&[], 2, &store, &index, &dicts);
        let ids: Vec<u32> = views.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn filter_projects_only_forced_fields() {
        let store = RecordStore::from_records(vec![rec(1, Sex::Female)]);
        let dicts = Dictionaries::new();
        let index = IndexSet::build(&store, &dicts, 0);
        let views = execute_filter(&[FilterPredicate::SexEq(Sex::Female)], 10, &store, &index, &dicts);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].sex, Some("f"));
        assert_eq!(views[0].status, None);
    }
}

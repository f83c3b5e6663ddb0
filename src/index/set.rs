//! The full index set (§4.3): one structure per predicate family, built
//! once from a frozen [`RecordStore`] and never mutated afterward.
//!
//! Every index is built with a single descending walk over record
//! positions (`RecordStore::all_positions_descending`), so every posting
//! list comes out pre-sorted descending with no extra sort pass.

use std::collections::HashMap;

use crate::dictionary::Dictionaries;
use crate::model::{year_of, AccountId};
use crate::storage::{Record, RecordStore};

use super::trie::PrefixTrie;

const EMPTY: &[u32] = &[];

fn email_domain(email: &str) -> &str {
    email.split('@').nth(1).unwrap_or("")
}

pub struct IndexSet {
    all_descending: Vec<u32>,

    sex: [Vec<u32>; 2],
    status_eq: [Vec<u32>; 3],
    status_neq: [Vec<u32>; 3],

    fname_eq: HashMap<u8, Vec<u32>>,
    sname_eq: HashMap<u16, Vec<u32>>,
    country_eq: HashMap<u8, Vec<u32>>,
    city_eq: HashMap<u16, Vec<u32>>,

    fname_null: Vec<u32>,
    fname_not_null: Vec<u32>,
    sname_null: Vec<u32>,
    sname_not_null: Vec<u32>,
    country_null: Vec<u32>,
    country_not_null: Vec<u32>,
    city_null: Vec<u32>,
    city_not_null: Vec<u32>,
    phone_null: Vec<u32>,
    phone_not_null: Vec<u32>,
    premium_null: Vec<u32>,
    premium_not_null: Vec<u32>,

    email_domain: HashMap<String, Vec<u32>>,
    /// Ascending by email, for `email_lt`/`email_gt`'s binary-search split.
    email_sorted: Vec<(String, u32)>,

    sname_starts: PrefixTrie,

    phone_code: HashMap<String, Vec<u32>>,

    /// Ascending by birth, for `birth_lt`/`birth_gt`'s binary-search split.
    birth_sorted: Vec<(i32, u32)>,
    birth_year: HashMap<i32, Vec<u32>>,

    interests: HashMap<u16, Vec<u32>>,
    likes: HashMap<AccountId, Vec<u32>>,

    premium_now: Vec<u32>,
}

impl IndexSet {
    /// Builds every index in one pass (plus the two small sorts for
    /// email/birth range queries). `now` is the fixed reference timestamp
    /// from `options.txt`. `dicts` resolves `sname_id` back to the surname
    /// string the prefix trie is keyed on.
    pub fn build(store: &RecordStore, dicts: &Dictionaries, now: i64) -> Self {
        let mut set = IndexSet {
            all_descending: Vec::with_capacity(store.len()),
            sex: Default::default(),
            status_eq: Default::default(),
            status_neq: Default::default(),
            fname_eq: HashMap::new(),
            sname_eq: HashMap::new(),
            country_eq: HashMap::new(),
            city_eq: HashMap::new(),
            fname_null: Vec::new(),
            fname_not_null: Vec::new(),
            sname_null: Vec::new(),
            sname_not_null: Vec::new(),
            country_null: Vec::new(),
            country_not_null: Vec::new(),
            city_null: Vec::new(),
            city_not_null: Vec::new(),
            phone_null: Vec::new(),
            phone_not_null: Vec::new(),
            premium_null: Vec::new(),
            premium_not_null: Vec::new(),
            email_domain: HashMap::new(),
            email_sorted: Vec::with_capacity(store.len()),
            sname_starts: PrefixTrie::new(),
            phone_code: HashMap::new(),
            birth_sorted: Vec::with_capacity(store.len()),
            birth_year: HashMap::new(),
            interests: HashMap::new(),
            likes: HashMap::new(),
            premium_now: Vec::new(),
        };

        for position in store.all_positions_descending() {
            let record = store.at(position);
            set.index_one(record, position, now, dicts);
        }

        set.status_neq[0] = super::postings::union_desc(vec![&set.status_eq[1], &set.status_eq[2]]);
        set.status_neq[1] = super::postings::union_desc(vec![&set.status_eq[0], &set.status_eq[2]]);
        set.status_neq[2] = super::postings::union_desc(vec![&set.status_eq[0], &set.status_eq[1]]);

        set.email_sorted.sort_by(|a, b| a.0.cmp(&b.0));
        set.birth_sorted.sort_by_key(|b| b.0);

        set
    }

    fn index_one(&mut self, record: &Record, position: u32, now: i64, dicts: &Dictionaries) {
        self.all_descending.push(position);

        self.sex[record.sex.code() as usize].push(position);
        self.status_eq[record.status.code() as usize].push(position);

        push_opt(&mut self.fname_eq, record.fname_id, position);
        push_opt(&mut self.sname_eq, record.sname_id, position);
        push_opt(&mut self.country_eq, record.country_id, position);
        push_opt(&mut self.city_eq, record.city_id, position);

        push_null(&mut self.fname_null, &mut self.fname_not_null, record.fname_id.is_none(), position);
        push_null(&mut self.sname_null, &mut self.sname_not_null, record.sname_id.is_none(), position);
        push_null(&mut self.country_null, &mut self.country_not_null, record.country_id.is_none(), position);
        push_null(&mut self.city_null, &mut self.city_not_null, record.city_id.is_none(), position);
        push_null(&mut self.phone_null, &mut self.phone_not_null, record.phone.is_none(), position);
        push_null(&mut self.premium_null, &mut self.premium_not_null, record.premium.is_none(), position);

        self.email_domain
            .entry(email_domain(&record.email).to_string())
            .or_default()
            .push(position);
        self.email_sorted.push((record.email.clone(), position));

        if let Some(sname_id) = record.sname_id {
            self.sname_starts.insert(dicts.sname.resolve(sname_id), position);
        }

        if let Some(code) = &record.phone_code {
            self.phone_code.entry(code.clone()).or_default().push(position);
        }

        self.birth_sorted.push((record.birth, position));
        if let Some(year) = year_of(record.birth) {
            self.birth_year.entry(year).or_default().push(position);
        }

        for &interest_id in &record.interests {
            self.interests.entry(interest_id).or_default().push(position);
        }

        for &(liked_id, _ts) in &record.likes {
            self.likes.entry(liked_id).or_default().push(position);
        }

        if record.has_premium_now(now) {
            self.premium_now.push(position);
        }
    }

    pub fn all_descending(&self) -> &[u32] {
        &self.all_descending
    }

    pub fn sex_eq(&self, code: u8) -> &[u32] {
        self.sex.get(code as usize).map(Vec::as_slice).unwrap_or(EMPTY)
    }

    pub fn status_eq(&self, code: u8) -> &[u32] {
        self.status_eq.get(code as usize).map(Vec::as_slice).unwrap_or(EMPTY)
    }

    pub fn status_neq(&self, code: u8) -> &[u32] {
        self.status_neq.get(code as usize).map(Vec::as_slice).unwrap_or(EMPTY)
    }

    pub fn fname_eq(&self, id: u8) -> &[u32] {
        lookup(&self.fname_eq, &id)
    }

    pub fn sname_eq(&self, id: u16) -> &[u32] {
        lookup(&self.sname_eq, &id)
    }

    pub fn country_eq(&self, id: u8) -> &[u32] {
        lookup(&self.country_eq, &id)
    }

    pub fn city_eq(&self, id: u16) -> &[u32] {
        lookup(&self.city_eq, &id)
    }

    pub fn fname_null(&self, is_null: bool) -> &[u32] {
        if is_null { &self.fname_null } else { &self.fname_not_null }
    }

    pub fn sname_null(&self, is_null: bool) -> &[u32] {
        if is_null { &self.sname_null } else { &self.sname_not_null }
    }

    pub fn country_null(&self, is_null: bool) -> &[u32] {
        if is_null { &self.country_null } else { &self.country_not_null }
    }

    pub fn city_null(&self, is_null: bool) -> &[u32] {
        if is_null { &self.city_null } else { &self.city_not_null }
    }

    pub fn phone_null(&self, is_null: bool) -> &[u32] {
        if is_null { &self.phone_null } else { &self.phone_not_null }
    }

    pub fn premium_null(&self, is_null: bool) -> &[u32] {
        if is_null { &self.premium_null } else { &self.premium_not_null }
    }

    pub fn email_domain(&self, domain: &str) -> &[u32] {
        self.email_domain.get(domain).map(Vec::as_slice).unwrap_or(EMPTY)
    }

    /// Records with `email < bound`, sorted descending by position.
    pub fn email_lt(&self, bound: &str) -> Vec<u32> {
        let split = self
            .email_sorted
            .partition_point(|(email, _)| email.as_str() < bound);
        let mut out: Vec<u32> = self.email_sorted[..split].iter().map(|(_, p)| *p).collect();
        out.sort_unstable_by(|a, b| b.cmp(a));
        out
    }

    /// Records with `email > bound`, sorted descending by position.
    pub fn email_gt(&self, bound: &str) -> Vec<u32> {
        let split = self
            .email_sorted
            .partition_point(|(email, _)| email.as_str() <= bound);
        let mut out: Vec<u32> = self.email_sorted[split..].iter().map(|(_, p)| *p).collect();
        out.sort_unstable_by(|a, b| b.cmp(a));
        out
    }

    pub fn sname_starts(&self, prefix: &str) -> &[u32] {
        self.sname_starts.lookup_prefix(prefix)
    }

    pub fn phone_code(&self, code: &str) -> &[u32] {
        self.phone_code.get(code).map(Vec::as_slice).unwrap_or(EMPTY)
    }

    pub fn birth_lt(&self, bound: i32) -> Vec<u32> {
        let split = self.birth_sorted.partition_point(|(birth, _)| *birth < bound);
        let mut out: Vec<u32> = self.birth_sorted[..split].iter().map(|(_, p)| *p).collect();
        out.sort_unstable_by(|a, b| b.cmp(a));
        out
    }

    pub fn birth_gt(&self, bound: i32) -> Vec<u32> {
        let split = self.birth_sorted.partition_point(|(birth, _)| *birth <= bound);
        let mut out: Vec<u32> = self.birth_sorted[split..].iter().map(|(_, p)| *p).collect();
        out.sort_unstable_by(|a, b| b.cmp(a));
        out
    }

    pub fn birth_year(&self, year: i32) -> &[u32] {
        self.birth_year.get(&year).map(Vec::as_slice).unwrap_or(EMPTY)
    }

    pub fn interests(&self, id: u16) -> &[u32] {
        self.interests.get(&id).map(Vec::as_slice).unwrap_or(EMPTY)
    }

    pub fn likes_contains(&self, id: AccountId) -> &[u32] {
        self.likes.get(&id).map(Vec::as_slice).unwrap_or(EMPTY)
    }

    pub fn premium_now(&self) -> &[u32] {
        &self.premium_now
    }
}

fn lookup<'a, K: std::hash::Hash + Eq>(map: &'a HashMap<K, Vec<u32>>, key: &K) -> &'a [u32] {
    map.get(key).map(Vec::as_slice).unwrap_or(EMPTY)
}

fn push_opt<K: std::hash::Hash + Eq + Copy>(map: &mut HashMap<K, Vec<u32>>, key: Option<K>, position: u32) {
    if let Some(k) = key {
        map.entry(k).or_default().push(position);
    }
}

fn push_null(null_list: &mut Vec<u32>, not_null_list: &mut Vec<u32>, is_null: bool, position: u32) {
    if is_null {
        null_list.push(position);
    } else {
        not_null_list.push(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Sex, Status};

    fn rec(id: AccountId, sex: Sex, status: Status, birth: i32) -> Record {
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
            interests: vec![],
            premium: None,
            likes: vec![],
        }
    }

    #[test]
    fn status_neq_is_union_of_others() {
        let store = RecordStore::from_records(vec![
            rec(1, Sex::Male, Status::Free, 0),
            rec(2, Sex::Female, Status::Busy, 0),
            rec(3, Sex::Female, Status::Complicated, 0),
        ]);
        let idx = IndexSet::build(&store, &Dictionaries::new(), 0);
        // status_neq(Free) should hit accounts 2 and 3.
        let mut hits: Vec<u32> = idx.status_neq(Status::Free.code()).to_vec();
        hits.sort_unstable();
        let ids: Vec<AccountId> = hits.iter().map(|&p| store.at(p).id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn birth_lt_and_gt_split_correctly() {
        let store = RecordStore::from_records(vec![
            rec(1, Sex::Male, Status::Free, 100),
            rec(2, Sex::Male, Status::Free, 200),
            rec(3, Sex::Male, Status::Free, 300),
        ]);
        let idx = IndexSet::build(&store, &Dictionaries::new(), 0);
        let lt = idx.birth_lt(200);
        assert_eq!(lt.len(), 1);
        assert_eq!(store.at(lt[0]).id, 1);

        let gt = idx.birth_gt(200);
        assert_eq!(gt.len(), 1);
        assert_eq!(store.at(gt[0]).id, 3);
    }

    #[test]
    fn postings_come_out_descending_by_position() {
        let store = RecordStore::from_records(vec![
            rec(1, Sex::Male, Status::Free, 0),
            rec(2, Sex::Male, Status::Free, 0),
            rec(3, Sex::Male, Status::Free, 0),
        ]);
        let idx = IndexSet::build(&store, &Dictionaries::new(), 0);
        assert_eq!(idx.sex_eq(Sex::Male.code()), &[2, 1, 0]);
        assert_eq!(idx.all_descending(), &[2, 1, 0]);
    }

    #[test]
    fn premium_now_respects_exclusive_window() {
        let mut a = rec(1, Sex::Male, Status::Free, 0);
        a.premium = Some((100, 200));
        let store = RecordStore::from_records(vec![a]);
        let idx = IndexSet::build(&store, &Dictionaries::new(), 150);
        assert_eq!(idx.premium_now().len(), 1);
        let idx_after = IndexSet::build(&store, &Dictionaries::new(), 200);
        assert_eq!(idx_after.premium_now().len(), 0);
    }
}

//! Posting-list algebra (§4.3.1).
//!
//! Every posting list is a `Vec<u32>` of record positions sorted
//! **descending** — the same order `RecordStore::all_positions_descending`
//! walks the store in, so a list built by pushing positions while scanning
//! the store descending comes out pre-sorted with no extra pass.

use itertools::Itertools;

/// Intersects `lists`, smallest first, binary-searching each candidate
/// against the rest. Preserves descending order: the output is a subset of
/// the smallest list walked in its own order.
pub fn intersect_desc(mut lists: Vec<&[u32]>) -> Vec<u32> {
    if lists.is_empty() {
        return Vec::new();
    }
    lists.sort_by_key(|l| l.len());
    let (smallest, rest) = lists.split_first().unwrap();
    smallest
        .iter()
        .copied()
        .filter(|&pos| rest.iter().all(|list| contains_desc(list, pos)))
        .collect()
}

/// K-way merges `lists` (each already descending) into one deduplicated
/// descending list.
pub fn union_desc(lists: Vec<&[u32]>) -> Vec<u32> {
    lists
        .into_iter()
        .kmerge_by(|a, b| a > b)
        .dedup()
        .copied()
        .collect()
}

/// Binary-search membership test against a descending-sorted list.
pub fn contains_desc(list: &[u32], position: u32) -> bool {
    list.binary_search_by(|probe| position.cmp(probe)).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_keeps_descending_order() {
        let a: Vec<u32> = vec![9, 7, 5, 3, 1];
        let b: Vec<u32> = vec![8, 7, 6, 5, 4];
        let got = intersect_desc(vec![&a, &b]);
        assert_eq!(got, vec![7, 5]);
    }

    #[test]
    fn intersect_with_one_list_is_identity() {
        let a: Vec<u32> = vec![5, 3, 1];
        assert_eq!(intersect_desc(vec![&a]), a);
    }

    #[test]
    fn union_merges_and_dedups() {
        let a: Vec<u32> = vec![9, 5, 1];
        let b: Vec<u32> = vec![8, 5, 2];
        assert_eq!(union_desc(vec![&a, &b]), vec![9, 8, 5, 2, 1]);
    }

    #[test]
    fn contains_finds_membership_in_descending_list() {
        let list: Vec<u32> = vec![9, 7, 5, 3, 1];
        assert!(contains_desc(&list, 5));
        assert!(!contains_desc(&list, 6));
    }
}

// crates/strata-ledger/src/checkpoint.rs
//
// Checkpoint records and the point-in-time lookup they support.
//
// A checkpoint pins the value a balance (or the total supply) held
// immediately after the mutation at a given ledger height. Histories are
// sorted by height and only ever grow at the end, so the value at any past
// height is a binary search for the greatest recorded height <= the query.

use serde::{Deserialize, Serialize};

use strata_core::Shares;

/// Ledger height: the global operation counter, analogous to a block
/// height. Advances exactly once per top-level mutating operation.
pub type LedgerIndex = u64;

/// An immutable (height, value) pair in a balance or supply history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Height at which the value was recorded.
    pub index: LedgerIndex,
    /// Balance or supply immediately after the mutation at `index`.
    pub value: Shares,
}

/// Value recorded at the greatest height <= `at`.
///
/// Returns 0 when the history is empty or starts after `at`: no checkpoint
/// means the account had never held shares by then, which is a legitimate
/// state, not an error. Queries at or past the newest checkpoint return
/// the live value.
pub fn value_at(history: &[Checkpoint], at: LedgerIndex) -> Shares {
    let first = match history.first() {
        Some(first) => first,
        None => return 0,
    };
    if first.index > at {
        return 0;
    }
    let last = history[history.len() - 1];
    if last.index <= at {
        return last.value;
    }
    // first.index <= at < last.index, so the partition point lands
    // strictly inside the array.
    let pos = history.partition_point(|c| c.index <= at);
    history[pos - 1].value
}

/// Append `value` at `index`, overwriting the last entry when it already
/// sits at `index` — several writes to one account inside one operation
/// collapse into a single checkpoint.
pub fn record(history: &mut Vec<Checkpoint>, index: LedgerIndex, value: Shares) {
    match history.last_mut() {
        Some(last) if last.index == index => last.value = value,
        _ => history.push(Checkpoint { index, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_history(pairs: &[(u64, u64)]) -> Vec<Checkpoint> {
        pairs
            .iter()
            .map(|&(index, value)| Checkpoint { index, value })
            .collect()
    }

    #[test]
    fn test_empty_history_is_zero() {
        assert_eq!(value_at(&[], 0), 0);
        assert_eq!(value_at(&[], 100), 0);
    }

    #[test]
    fn test_query_before_first_checkpoint() {
        let history = make_history(&[(5, 100)]);
        assert_eq!(value_at(&history, 4), 0);
        assert_eq!(value_at(&history, 5), 100);
    }

    #[test]
    fn test_query_past_last_returns_live_value() {
        let history = make_history(&[(1, 100), (3, 250)]);
        assert_eq!(value_at(&history, 3), 250);
        assert_eq!(value_at(&history, 1_000_000), 250);
    }

    #[test]
    fn test_query_between_checkpoints() {
        let history = make_history(&[(1, 100), (4, 250), (9, 40)]);
        assert_eq!(value_at(&history, 2), 100);
        assert_eq!(value_at(&history, 3), 100);
        assert_eq!(value_at(&history, 4), 250);
        assert_eq!(value_at(&history, 8), 250);
        assert_eq!(value_at(&history, 9), 40);
    }

    #[test]
    fn test_binary_search_over_long_history() {
        // Value at height h is h * 10 for even heights 2..=40.
        let history = make_history(&(1u64..=20).map(|i| (i * 2, i * 20)).collect::<Vec<_>>());
        for query in 0..45 {
            let expected = (query / 2).min(20) * 20;
            assert_eq!(value_at(&history, query), expected, "query {}", query);
        }
    }

    #[test]
    fn test_record_appends() {
        let mut history = Vec::new();
        record(&mut history, 1, 10);
        record(&mut history, 2, 20);
        assert_eq!(history, make_history(&[(1, 10), (2, 20)]));
    }

    #[test]
    fn test_record_same_index_overwrites() {
        let mut history = Vec::new();
        record(&mut history, 1, 10);
        record(&mut history, 1, 35);
        assert_eq!(history, make_history(&[(1, 35)]));
    }
}

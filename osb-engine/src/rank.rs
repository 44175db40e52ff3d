//! PP ranking
//!
//! All orderings in the engine are PP descending with a stable sort, so
//! records with equal PP keep their prior relative order.

use std::cmp::Ordering;

use crate::record::{Record, ScoreEntry};
use crate::Leaderboards;

/// Anything ordered by PP
pub trait Scored {
    fn pp_value(&self) -> f64;
}

impl Scored for Record {
    fn pp_value(&self) -> f64 {
        Record::pp_value(self)
    }
}

impl Scored for ScoreEntry {
    fn pp_value(&self) -> f64 {
        ScoreEntry::pp_value(self)
    }
}

impl<T: Scored + ?Sized> Scored for &T {
    fn pp_value(&self) -> f64 {
        (**self).pp_value()
    }
}

fn by_pp_desc<T: Scored>(a: &T, b: &T) -> Ordering {
    b.pp_value()
        .partial_cmp(&a.pp_value())
        .unwrap_or(Ordering::Equal)
}

/// Stable in-place sort, highest PP first
pub fn sort_by_pp<T: Scored>(items: &mut [T]) {
    items.sort_by(by_pp_desc);
}

/// Rank one category in place
pub fn rank_records(records: &mut [Record]) {
    sort_by_pp(records);
}

/// Ranked copy of every category; the input is left untouched
pub fn rank(leaderboards: &Leaderboards) -> Leaderboards {
    leaderboards
        .iter()
        .map(|(category, records)| {
            let mut ranked = records.clone();
            rank_records(&mut ranked);
            (category.clone(), ranked)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(user: &str, pp: serde_json::Value) -> Record {
        serde_json::from_value(json!({"user": user, "pp": pp})).unwrap()
    }

    fn users(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.user.as_deref().unwrap()).collect()
    }

    #[test]
    fn test_rank_descending_and_stable() {
        let mut lb = Leaderboards::new();
        lb.insert(
            "NM".to_string(),
            vec![
                record("a", json!(50)),
                record("b", json!(100)),
                record("c", json!(50)),
                record("d", json!(100)),
            ],
        );

        let ranked = rank(&lb);
        assert_eq!(users(&ranked["NM"]), vec!["b", "d", "a", "c"]);
        // Input untouched
        assert_eq!(users(&lb["NM"]), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_missing_pp_ranks_as_zero() {
        let mut records = vec![
            record("none", serde_json::Value::Null),
            record("neg", json!(-5)),
            record("text", json!("12")),
            record("pos", json!(1)),
        ];
        rank_records(&mut records);
        assert_eq!(users(&records), vec!["pos", "none", "text", "neg"]);
    }
}

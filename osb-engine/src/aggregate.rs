//! Cross-source aggregation
//!
//! Sources are merged in order. Within a category a record is kept only if
//! no earlier record has the same [`IdentityKey`]; later duplicates are
//! dropped whole, even if their other attributes differ. Stats entries are
//! replaced per category by later sources.

use std::collections::{HashMap, HashSet};

use crate::loader::SourceDocument;
use crate::rank::rank_records;
use crate::record::IdentityKey;
use crate::{Leaderboards, Stats};

/// Merged leaderboards and stats
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedData {
    pub leaderboards: Leaderboards,
    pub stats: Stats,
}

impl CombinedData {
    /// Sort every category by PP, descending and stable
    pub fn into_ranked(mut self) -> Self {
        for records in self.leaderboards.values_mut() {
            rank_records(records);
        }
        self
    }

    pub fn into_parts(self) -> (Leaderboards, Stats) {
        (self.leaderboards, self.stats)
    }
}

/// Merge sources, earliest first
pub fn aggregate<I>(documents: I) -> CombinedData
where
    I: IntoIterator<Item = SourceDocument>,
{
    let mut combined = CombinedData::default();
    let mut seen: HashMap<String, HashSet<IdentityKey>> = HashMap::new();

    for document in documents {
        for (category, records) in document.leaderboards {
            let keys = seen.entry(category.clone()).or_default();
            let merged = combined.leaderboards.entry(category).or_default();

            for record in records {
                if keys.insert(record.identity_key()) {
                    merged.push(record);
                }
            }
        }

        // Whole-entry override, no field merge
        for (category, meta) in document.stats {
            combined.stats.insert(category, meta);
        }
    }

    combined
}

//! Presentation views derived from ranked leaderboards
//!
//! Every builder is a pure function of its inputs. Missing fields degrade to
//! empty or zero values; an unknown category or player produces an empty
//! view, never an error.

use std::collections::{BTreeSet, HashSet};

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::rank::{sort_by_pp, Scored};
use crate::record::{IdentityKey, PlayerScoreKey, Record, ScoreEntry};
use crate::{Leaderboards, Stats};

/// Aggregate category skipped when scanning a player's scores
pub const OVERALL_CATEGORY: &str = "OVERALL";

/// Size of the home page top list
pub const TOP_SCORES_LIMIT: usize = 10;

/// Records taken from the head of each category for the activity list
pub const RECENT_PER_CATEGORY: usize = 3;

/// Size of the home page activity list
pub const RECENT_SCORES_LIMIT: usize = 8;

/// Records shown on a category page without a search
pub const CATEGORY_SCORES_LIMIT: usize = 100;

/// Home page data
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeView {
    pub player_count: usize,
    pub score_count: usize,
    pub top_scores: Vec<ScoreEntry>,
    /// Highest-PP records of each category. Sources carry no timestamps, so
    /// this is not ordered by time despite the name.
    pub recent_scores: Vec<ScoreEntry>,
    pub all_players: Vec<String>,
}

/// Category page data
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryView {
    /// Upper-cased category filter
    pub category: String,
    /// Lower-cased search query, if one was given
    pub search_query: Option<String>,
    pub scores: Vec<Record>,
    pub stats: Option<Value>,
    pub all_players: Vec<String>,
}

/// Player profile data
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerView {
    pub username: String,
    pub scores: Vec<ScoreEntry>,
}

/// Borrowed record plus its category, cloned only once selected
#[derive(Clone, Copy)]
struct Candidate<'a> {
    record: &'a Record,
    category: &'a str,
}

impl Scored for Candidate<'_> {
    fn pp_value(&self) -> f64 {
        self.record.pp_value()
    }
}

impl Candidate<'_> {
    fn to_entry(self) -> ScoreEntry {
        ScoreEntry::new(self.record.clone(), self.category)
    }
}

/// Sorted distinct non-empty `user` values across all categories
pub fn all_players(leaderboards: &Leaderboards) -> Vec<String> {
    leaderboards
        .values()
        .flatten()
        .filter_map(Record::user_name)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Build the home page view
///
/// Top scores are de-duplicated across categories by identity key, the
/// first category holding a key providing the annotation. Only records with
/// a user and a beatmap id take part.
pub fn build_home_view(leaderboards: &Leaderboards) -> HomeView {
    let mut unique: IndexMap<IdentityKey, Candidate<'_>> = IndexMap::new();
    let mut recent: Vec<Candidate<'_>> = Vec::new();

    for (category, records) in leaderboards {
        recent.extend(
            records
                .iter()
                .take(RECENT_PER_CATEGORY)
                .filter(|record| record.user_name().is_some())
                .map(|record| Candidate {
                    record,
                    category: category.as_str(),
                }),
        );

        for record in records {
            if record.user_name().is_none() || !record.has_beatmap() {
                continue;
            }
            if let Entry::Vacant(slot) = unique.entry(record.identity_key()) {
                slot.insert(Candidate {
                    record,
                    category: category.as_str(),
                });
            }
        }
    }

    let score_count = unique.len();

    let mut top: Vec<Candidate<'_>> = unique.into_values().collect();
    sort_by_pp(&mut top);
    sort_by_pp(&mut recent);

    let all_players = all_players(leaderboards);

    HomeView {
        player_count: all_players.len(),
        score_count,
        top_scores: top
            .into_iter()
            .take(TOP_SCORES_LIMIT)
            .map(Candidate::to_entry)
            .collect(),
        recent_scores: recent
            .into_iter()
            .take(RECENT_SCORES_LIMIT)
            .map(Candidate::to_entry)
            .collect(),
        all_players,
    }
}

/// Case-insensitive category lookup on an already upper-cased name
///
/// An exact key match is preferred; otherwise the first key equal ignoring
/// case is used.
fn lookup_category<'a, V>(map: &'a IndexMap<String, V>, normalized: &str) -> Option<&'a V> {
    map.get(normalized).or_else(|| {
        map.iter()
            .find(|(key, _)| key.to_uppercase() == normalized)
            .map(|(_, value)| value)
    })
}

/// Build a category page view
///
/// With a non-empty search every record whose `user` contains the query
/// (ignoring case) is returned, uncapped. Without one the first
/// [`CATEGORY_SCORES_LIMIT`] ranked records are returned.
pub fn build_category_view(
    leaderboards: &Leaderboards,
    stats: &Stats,
    category: &str,
    search_query: Option<&str>,
) -> CategoryView {
    let category = category.to_uppercase();
    let search_query = search_query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let records: &[Record] = lookup_category(leaderboards, &category)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let scores = match &search_query {
        Some(query) => records
            .iter()
            .filter(|record| {
                record
                    .user
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(query.as_str())
            })
            .cloned()
            .collect(),
        None => records.iter().take(CATEGORY_SCORES_LIMIT).cloned().collect(),
    };

    CategoryView {
        stats: lookup_category(stats, &category).cloned(),
        category,
        search_query,
        scores,
        all_players: all_players(leaderboards),
    }
}

/// Build a player profile view
///
/// Scans every category except [`OVERALL_CATEGORY`] for records whose
/// resolved player name equals `username` ignoring case. Each hit records its
/// 1-based position in the category as `global_rank`. Hits are de-duplicated
/// on `(beatmap_id, pp, category)`.
///
/// An empty `username` matches no records, including records without a name.
pub fn build_player_view(leaderboards: &Leaderboards, username: &str) -> PlayerView {
    let wanted = username.to_lowercase();
    let mut scores = Vec::new();

    if !wanted.is_empty() {
        let mut seen: HashSet<PlayerScoreKey> = HashSet::new();

        for (category, records) in leaderboards {
            if category.to_uppercase() == OVERALL_CATEGORY {
                continue;
            }

            for (index, record) in records.iter().enumerate() {
                let matches = record
                    .player_name()
                    .is_some_and(|name| name.to_lowercase() == wanted);
                if matches && seen.insert(PlayerScoreKey::new(record, category)) {
                    scores.push(ScoreEntry::new(record.clone(), category).with_rank(index + 1));
                }
            }
        }

        sort_by_pp(&mut scores);
    }

    PlayerView {
        username: username.to_string(),
        scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leaderboards(value: Value) -> Leaderboards {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_lookup_prefers_exact_then_ignores_case() {
        let lb = leaderboards(json!({
            "hd": [{"user": "lower"}],
            "HD": [{"user": "upper"}],
            "dt": [{"user": "only-lower"}]
        }));
        let stats = Stats::new();

        let view = build_category_view(&lb, &stats, "hd", None);
        assert_eq!(view.category, "HD");
        assert_eq!(view.scores[0].user.as_deref(), Some("upper"));

        let view = build_category_view(&lb, &stats, "Dt", None);
        assert_eq!(view.scores[0].user.as_deref(), Some("only-lower"));
    }

    #[test]
    fn test_category_cap_without_search() {
        let records: Vec<Value> = (0..150)
            .map(|i| json!({"user": format!("p{}", i), "pp": 1000 - i}))
            .collect();
        let lb = leaderboards(json!({"NM": records}));

        let view = build_category_view(&lb, &Stats::new(), "nm", Some("   "));
        assert_eq!(view.scores.len(), CATEGORY_SCORES_LIMIT);
        assert_eq!(view.search_query, None);
    }

    #[test]
    fn test_recent_scores_skip_userless_heads() {
        let lb = leaderboards(json!({
            "NM": [{"pp": 900}, {"user": "a", "pp": 800}],
        }));
        let view = build_home_view(&lb);
        assert_eq!(view.recent_scores.len(), 1);
        assert_eq!(view.recent_scores[0].category, "NM");
    }

    #[test]
    fn test_player_count_includes_records_without_beatmap() {
        let lb = leaderboards(json!({
            "NM": [{"user": "a", "pp": 1}, {"user": "b", "beatmap_id": 2, "pp": 2}],
        }));
        let view = build_home_view(&lb);
        assert_eq!(view.player_count, 2);
        assert_eq!(view.score_count, 1);
        assert_eq!(view.all_players, vec!["a", "b"]);
    }

    #[test]
    fn test_player_view_matches_username_field() {
        let lb = leaderboards(json!({
            "HD": [
                {"user": "someone", "pp": 300},
                {"username": "Legacy", "beatmap_id": 5, "pp": 200}
            ],
        }));
        let view = build_player_view(&lb, "legacy");
        assert_eq!(view.scores.len(), 1);
        assert_eq!(view.scores[0].global_rank, Some(2));
    }

    #[test]
    fn test_empty_username_matches_nothing() {
        let lb = leaderboards(json!({"HD": [{"pp": 1}]}));
        assert!(build_player_view(&lb, "").scores.is_empty());
    }
}

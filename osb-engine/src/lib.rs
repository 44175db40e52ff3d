//! # OSB Leaderboard Engine
//!
//! Merges score records from several JSON source documents into
//! de-duplicated, PP-ranked leaderboards and derives the views the web
//! pages show.
//!
//! Pipeline: [`loader`] → [`aggregate`] → [`rank`] → [`views`].
//!
//! The engine holds no state between calls. Every query reloads the sources
//! and recomputes everything from scratch.

use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

pub mod aggregate;
pub mod loader;
pub mod rank;
pub mod record;
pub mod views;

pub use aggregate::{aggregate, CombinedData};
pub use loader::{load_sources, SourceDocument};
pub use rank::rank;
pub use record::{BeatmapId, IdentityKey, NameField, Record, ScoreEntry};
pub use views::{
    build_category_view, build_home_view, build_player_view, CategoryView, HomeView, PlayerView,
};

/// Category name → records, in first-seen category order
pub type Leaderboards = IndexMap<String, Vec<Record>>;

/// Category name → opaque category metadata
pub type Stats = IndexMap<String, Value>;

/// Load every source, merge them and rank each category by PP
///
/// Sources are given in precedence order: on duplicate identity keys the
/// earliest source wins. Missing or malformed sources are skipped.
pub fn load_combined_data<P: AsRef<Path>>(sources: &[P]) -> CombinedData {
    aggregate(load_sources(sources)).into_ranked()
}

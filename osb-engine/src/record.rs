//! Score record model
//!
//! A [`Record`] carries the three fields the engine interprets (`user`,
//! `beatmap_id`, `pp`) plus every other attribute of the source object in
//! an opaque `extra` map that is written back unchanged on serialization.
//!
//! Interpreted fields are lenient: a value of the wrong JSON type is treated
//! as absent instead of rejecting the record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use tracing::debug;

/// Beatmap identifier, integer or string in the source documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BeatmapId {
    Number(Number),
    Text(String),
}

impl BeatmapId {
    /// True unless the id is zero or an empty string
    pub fn is_set(&self) -> bool {
        match self {
            BeatmapId::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
            BeatmapId::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for BeatmapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeatmapId::Number(n) => write!(f, "{}", n),
            BeatmapId::Text(s) => f.write_str(s),
        }
    }
}

/// Fields a player name may be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    User,
    Username,
}

/// Player name resolution order: the first non-empty field wins
pub const PLAYER_NAME_PRIORITY: [NameField; 2] = [NameField::User, NameField::Username];

/// One scored play
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Alternate player name field found in older sources
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub beatmap_id: Option<BeatmapId>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pp: Option<Number>,

    /// Attributes the engine does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Deserialize an optional field, treating type mismatches as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match T::deserialize(&value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            debug!("Treating unexpected field value {} as absent: {}", value, e);
            Ok(None)
        }
    }
}

impl Record {
    /// PP used for ranking; absent counts as zero
    pub fn pp_value(&self) -> f64 {
        self.pp.as_ref().and_then(Number::as_f64).unwrap_or(0.0)
    }

    /// The `user` field, if non-empty
    pub fn user_name(&self) -> Option<&str> {
        self.name_field(NameField::User)
    }

    /// Read one name field, ignoring empty strings
    pub fn name_field(&self, field: NameField) -> Option<&str> {
        let value = match field {
            NameField::User => self.user.as_deref(),
            NameField::Username => self.username.as_deref(),
        };
        value.filter(|name| !name.is_empty())
    }

    /// Player name resolved through [`PLAYER_NAME_PRIORITY`]
    pub fn player_name(&self) -> Option<&str> {
        PLAYER_NAME_PRIORITY
            .iter()
            .find_map(|field| self.name_field(*field))
    }

    /// True when the beatmap id is present and non-empty
    pub fn has_beatmap(&self) -> bool {
        self.beatmap_id.as_ref().is_some_and(BeatmapId::is_set)
    }

    /// Duplicate-detection key within one category
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            user: self.user.clone(),
            beatmap_id: self.beatmap_id_text(),
            pp: self.pp_text(),
        }
    }

    fn beatmap_id_text(&self) -> Option<String> {
        self.beatmap_id.as_ref().map(ToString::to_string)
    }

    fn pp_text(&self) -> Option<String> {
        self.pp.as_ref().map(ToString::to_string)
    }
}

/// `(user, beatmap_id, pp)` compared by textual rendering
///
/// `None` is the sentinel for an absent field, so two records that both lack
/// a field still match on it. Two plays by the same player on the same map
/// with identical PP collapse into one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    user: Option<String>,
    beatmap_id: Option<String>,
    pp: Option<String>,
}

/// Key for a player's own scores: the user is implied by the scan
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PlayerScoreKey {
    beatmap_id: Option<String>,
    pp: Option<String>,
    category: String,
}

impl PlayerScoreKey {
    pub(crate) fn new(record: &Record, category: &str) -> Self {
        Self {
            beatmap_id: record.beatmap_id_text(),
            pp: record.pp_text(),
            category: category.to_string(),
        }
    }
}

/// Record annotated with where it was found
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntry {
    #[serde(flatten)]
    pub record: Record,

    /// Category the record was taken from
    pub category: String,

    /// 1-based position within the category at view-build time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_rank: Option<usize>,
}

impl ScoreEntry {
    /// Annotate a record with its category
    ///
    /// Source attributes named like the annotations are dropped so the
    /// serialized entry has a single `category` / `global_rank`.
    pub fn new(mut record: Record, category: &str) -> Self {
        record.extra.remove("category");
        record.extra.remove("global_rank");
        Self {
            record,
            category: category.to_string(),
            global_rank: None,
        }
    }

    pub fn with_rank(mut self, rank: usize) -> Self {
        self.global_rank = Some(rank);
        self
    }

    pub fn pp_value(&self) -> f64 {
        self.record.pp_value()
    }
}

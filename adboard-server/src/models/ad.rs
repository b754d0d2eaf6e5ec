//! Ad entity and its normalized write payloads

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Serialize, Serializer};

/// Stored ad record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Ad {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub owner: String,
    #[serde(serialize_with = "serialize_utc")]
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a new ad (all trimmed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAd {
    pub title: String,
    pub description: String,
    pub owner: String,
}

/// Validated partial update. `None` means "leave untouched".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
}

impl AdPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.owner.is_none()
    }

    /// Merge the supplied fields into `ad`. `id` and `created_at` never change.
    pub fn apply_to(&self, ad: &mut Ad) {
        if let Some(title) = &self.title {
            ad.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            ad.description.clone_from(description);
        }
        if let Some(owner) = &self.owner {
            ad.owner.clone_from(owner);
        }
    }
}

/// Creation timestamp for a new ad.
///
/// Truncated to microseconds, the precision PostgreSQL stores, so a record
/// returned from `create` compares equal to the one read back later.
pub fn creation_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn serialize_utc<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Micros, true))
}

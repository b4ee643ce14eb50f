//! Political parties and parliaments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical party identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoliticalParty {
  pub party_id:    Uuid,
  pub name:        String,
  /// Abbreviation used in vote records, e.g. "D66".
  pub name_short:  String,
  pub wikidata_id: Option<String>,
  pub founded:     Option<NaiveDate>,
  pub dissolved:   Option<NaiveDate>,
  /// Cached derived value, recomputed periodically from the current
  /// memberships — not transactionally maintained.
  pub seats:       u32,
}

/// A chamber whose members are tracked, e.g. the Tweede Kamer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parliament {
  pub parliament_id: Uuid,
  pub name:          String,
}

/// Input to [`crate::store::ChamberStore::add_party`].
/// `party_id` is assigned by the store; `seats` starts at zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewParty {
  pub name:       String,
  pub name_short: String,
  #[serde(default)]
  pub wikidata_id: Option<String>,
  #[serde(default)]
  pub founded:    Option<NaiveDate>,
  #[serde(default)]
  pub dissolved:  Option<NaiveDate>,
}

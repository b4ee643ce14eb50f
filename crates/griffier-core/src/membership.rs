//! Temporal membership intervals.
//!
//! A membership links a person to a party or a parliament over a date
//! interval. Intervals are half-open: active on `joined`, no longer active on
//! `left`. `joined == None` means "since before records began"; `left == None`
//! means "still active".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Common interface ────────────────────────────────────────────────────────

/// The interval behaviour shared by [`PartyMembership`] and
/// [`ParliamentMembership`]. Two distinct tagged types, one trait — no
/// inheritance.
pub trait TemporalMembership {
  fn joined(&self) -> Option<NaiveDate>;
  fn left(&self) -> Option<NaiveDate>;

  /// Active at `date` iff `joined <= date` (open start always passes) and
  /// `date < left` (open end always passes).
  fn is_active_at(&self, date: NaiveDate) -> bool {
    let started = self.joined().is_none_or(|joined| joined <= date);
    let not_ended = self.left().is_none_or(|left| date < left);
    started && not_ended
  }
}

// ─── Interval records ────────────────────────────────────────────────────────

/// A person's affiliation with a political party over a date interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyMembership {
  pub membership_id: Uuid,
  pub person_id:     Uuid,
  pub party_id:      Uuid,
  pub joined:        Option<NaiveDate>,
  pub left:          Option<NaiveDate>,
}

/// A person's seat in a parliament over a date interval. Also the anchor for
/// deriving "party at a given date" from concurrent party memberships.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParliamentMembership {
  pub membership_id: Uuid,
  pub person_id:     Uuid,
  pub parliament_id: Uuid,
  pub joined:        Option<NaiveDate>,
  pub left:          Option<NaiveDate>,
}

impl TemporalMembership for PartyMembership {
  fn joined(&self) -> Option<NaiveDate> { self.joined }

  fn left(&self) -> Option<NaiveDate> { self.left }
}

impl TemporalMembership for ParliamentMembership {
  fn joined(&self) -> Option<NaiveDate> { self.joined }

  fn left(&self) -> Option<NaiveDate> { self.left }
}

// ─── Store inputs ────────────────────────────────────────────────────────────

/// Input to [`crate::store::ChamberStore::add_party_membership`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPartyMembership {
  pub person_id: Uuid,
  pub party_id:  Uuid,
  pub joined:    Option<NaiveDate>,
  pub left:      Option<NaiveDate>,
}

/// Input to [`crate::store::ChamberStore::add_parliament_membership`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewParliamentMembership {
  pub person_id:     Uuid,
  pub parliament_id: Uuid,
  pub joined:        Option<NaiveDate>,
  pub left:          Option<NaiveDate>,
}

// ─── Data-quality checks ─────────────────────────────────────────────────────

/// Index pairs of intervals that overlap each other.
///
/// Party memberships for one person should not normally overlap; when they
/// do, the source data is suspect. This reports the condition — it never
/// corrects it. Callers log the pairs for manual review.
pub fn overlapping_pairs<M: TemporalMembership>(
  memberships: &[M],
) -> Vec<(usize, usize)> {
  let mut pairs = Vec::new();
  for i in 0..memberships.len() {
    for j in i + 1..memberships.len() {
      if intervals_overlap(&memberships[i], &memberships[j]) {
        pairs.push((i, j));
      }
    }
  }
  pairs
}

/// Half-open interval overlap, with open bounds extending indefinitely.
fn intervals_overlap<M: TemporalMembership>(a: &M, b: &M) -> bool {
  let a_starts_before_b_ends = match (a.joined(), b.left()) {
    (Some(a_joined), Some(b_left)) => a_joined < b_left,
    _ => true,
  };
  let b_starts_before_a_ends = match (b.joined(), a.left()) {
    (Some(b_joined), Some(a_left)) => b_joined < a_left,
    _ => true,
  };
  a_starts_before_b_ends && b_starts_before_a_ends
}

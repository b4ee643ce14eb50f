//! Person — the canonical identity record.
//!
//! Everyone appearing in the records (members, ministers, submitters of
//! documents) resolves to exactly one `Person`. Records are created by the
//! resolution facade when no existing record matches, and are never mutated
//! afterwards except to backfill external identifiers or initials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::normalize::slugify;

/// Surname of the shared sentinel record handed to callers that supply no
/// name at all. Keeps the "surname is never empty" invariant intact.
pub const UNKNOWN_SURNAME: &str = "unknown";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub person_id:      Uuid,
  pub forename:       String,
  pub surname:        String,
  /// Particle such as "van" or "van der"; sorts separately from the surname.
  pub surname_prefix: String,
  /// Dot-separated letter groups, e.g. "P.A.". May be empty.
  pub initials:       String,
  pub wikidata_id:    Option<String>,
  /// Identifier on the parliamentary biography site.
  pub parlement_id:   Option<String>,
  /// Derived from the fullname at creation; immutable afterwards.
  pub slug:           String,
  pub created_at:     DateTime<Utc>,
}

impl Person {
  /// Surname with its particle in front: "van der Steur".
  pub fn surname_including_prefix(&self) -> String {
    if self.surname_prefix.is_empty() {
      self.surname.clone()
    } else {
      format!("{} {}", self.surname_prefix, self.surname)
    }
  }

  /// Display name: forename, particle, surname — skipping empty parts.
  pub fn fullname(&self) -> String {
    let mut full = String::new();
    for part in [
      self.forename.as_str(),
      self.surname_prefix.as_str(),
      self.surname.as_str(),
    ] {
      if part.is_empty() {
        continue;
      }
      if !full.is_empty() {
        full.push(' ');
      }
      full.push_str(part);
    }
    full
  }

  /// Whether this is the sentinel record for empty-name sources.
  pub fn is_unknown(&self) -> bool {
    self.surname == UNKNOWN_SURNAME
      && self.forename.is_empty()
      && self.initials.is_empty()
  }
}

/// Input to [`crate::store::ChamberStore::add_person`].
/// `person_id`, `slug` and `created_at` are assigned by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPerson {
  #[serde(default)]
  pub forename:       String,
  pub surname:        String,
  #[serde(default)]
  pub surname_prefix: String,
  #[serde(default)]
  pub initials:       String,
  #[serde(default)]
  pub wikidata_id:    Option<String>,
  #[serde(default)]
  pub parlement_id:   Option<String>,
}

impl NewPerson {
  /// The slug the stored record will carry. Falls back to the initials when
  /// the name parts alone produce nothing usable.
  pub fn slug(&self) -> String {
    let name_slug = slugify(&format!(
      "{} {} {}",
      self.forename, self.surname_prefix, self.surname
    ));
    if name_slug.is_empty() {
      slugify(&self.initials)
    } else {
      name_slug
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn person(forename: &str, prefix: &str, surname: &str) -> Person {
    Person {
      person_id:      Uuid::new_v4(),
      forename:       forename.to_string(),
      surname:        surname.to_string(),
      surname_prefix: prefix.to_string(),
      initials:       String::new(),
      wikidata_id:    None,
      parlement_id:   None,
      slug:           String::new(),
      created_at:     Utc::now(),
    }
  }

  #[test]
  fn fullname_includes_prefix() {
    let p = person("Ard", "van der", "Steur");
    assert_eq!(p.fullname(), "Ard van der Steur");
    assert_eq!(p.surname_including_prefix(), "van der Steur");
  }

  #[test]
  fn fullname_skips_empty_parts() {
    let p = person("", "", "Grapperhaus");
    assert_eq!(p.fullname(), "Grapperhaus");
    assert_eq!(p.surname_including_prefix(), "Grapperhaus");
  }

  #[test]
  fn new_person_slug() {
    let input = NewPerson {
      forename: "Pia".to_string(),
      surname: "Dijkstra".to_string(),
      ..NewPerson::default()
    };
    assert_eq!(input.slug(), "pia-dijkstra");
  }

  #[test]
  fn new_person_slug_falls_back_to_initials() {
    let input = NewPerson {
      initials: "P.A.".to_string(),
      surname: String::new(),
      ..NewPerson::default()
    };
    assert_eq!(input.slug(), "p-a");
  }
}

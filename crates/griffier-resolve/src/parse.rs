//! Free-text name parsing.
//!
//! Scraped sources write names in two shapes, and the shape is not reliably
//! detectable from the string alone — "Dijkstra, P.A." and "P.A. Dijkstra"
//! are both common. The caller therefore picks the heuristic; the parser
//! never auto-detects and never fails. Malformed input produces whatever
//! partial [`NameQuery`] the heuristics yield, and an empty surname simply
//! matches nothing downstream.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::prefix::PrefixTable;

/// One or more uppercase-letter-dot groups, anywhere in the string.
///
/// Lowercase initials and multi-letter groups such as "A.Th.B." are not
/// matched in full; the upstream data contains a handful of those and they
/// come out truncated or empty. Known limitation, kept as-is.
static INITIALS_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?:[A-Z]\.)+").unwrap());

/// Parenthesised forename aside: "Doe, B.A. (John)".
static FORENAME_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\(.*?\)").unwrap());

/// The parsed components of one free-text name. Transient — consumed by the
/// matcher, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameQuery {
  pub initials:       String,
  pub surname:        String,
  pub surname_prefix: String,
  /// Best-effort only; used as a tie-break signal, never required.
  pub forename:       String,
}

/// First run of uppercase initials in `name`, or empty.
pub fn find_initials(name: &str) -> &str {
  INITIALS_RE
    .find(name)
    .map(|m| m.as_str())
    .unwrap_or_default()
}

/// Members with the same surname get their forename appended in parentheses;
/// it is noise for the surname/initials heuristics, so strip it.
fn strip_forename(name: &str) -> String {
  FORENAME_RE.replace_all(name, "").into_owned()
}

/// Parse a surname-first name: "Dijkstra, P.A.", "Dijkstra,P.A.(Pia)",
/// "van Dijkstra, P.A.", "Dijkstra van, P.A.".
///
/// Commas are dropped, the initials are located by pattern rather than by
/// position (the prefix may sit before or after the surname token), and the
/// surname is whatever text remains once prefix and initials are removed.
pub fn parse_name_surname_first(
  name: &str,
  prefixes: &PrefixTable,
) -> NameQuery {
  let name = strip_forename(name).replace(',', "");
  let initials = find_initials(&name).to_string();
  let surname_prefix = prefixes
    .find_prefix(&name)
    .map(|(prefix, _)| prefix)
    .unwrap_or_default();

  let mut surname = name;
  if !surname_prefix.is_empty() {
    surname = surname.replace(surname_prefix.as_str(), "");
  }
  if !initials.is_empty() {
    surname = surname.replace(initials.as_str(), "");
  }

  NameQuery {
    initials,
    surname: surname.trim().to_string(),
    surname_prefix,
    forename: String::new(),
  }
}

/// Parse an initials-first name: "P.A. Dijkstra", "P.A. (Pia) Dijkstra".
///
/// The initials are everything before the first space; the surname is
/// everything after the last dot. A leading known prefix is peeled off
/// first so it cannot be misread as the initials token.
pub fn parse_name_initials_first(
  name: &str,
  prefixes: &PrefixTable,
) -> NameQuery {
  let stripped = strip_forename(name);
  let stripped = stripped.trim();

  let (surname_prefix, rest) = match prefixes.find_prefix(stripped) {
    Some((prefix, 0)) => {
      let rest = stripped[prefix.len()..].trim_start();
      (prefix, rest)
    }
    _ => (String::new(), stripped),
  };

  let initials = rest.split(' ').next().unwrap_or_default().to_string();
  let surname = rest.rsplit('.').next().unwrap_or_default().trim().to_string();

  NameQuery {
    initials,
    surname,
    surname_prefix,
    forename: String::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn table() -> PrefixTable { PrefixTable::dutch() }

  // ── Surname-first format ──────────────────────────────────────────────

  #[test]
  fn surname_first_basic() {
    let q = parse_name_surname_first("Dijkstra, P.A.", &table());
    assert_eq!(q.initials, "P.A.");
    assert_eq!(q.surname, "Dijkstra");
    assert_eq!(q.surname_prefix, "");
  }

  #[test]
  fn surname_first_spelling_variants_are_equivalent() {
    let expected = parse_name_surname_first("Dijkstra, P.A.", &table());
    for spelling in ["Dijkstra,P.A.", "Dijkstra P.A."] {
      assert_eq!(parse_name_surname_first(spelling, &table()), expected);
    }
  }

  #[test]
  fn surname_first_discards_forename_aside() {
    let q = parse_name_surname_first("Dijkstra,P.A.(Pia)", &table());
    assert_eq!(q.initials, "P.A.");
    assert_eq!(q.surname, "Dijkstra");
    assert_eq!(q.forename, "");

    let q = parse_name_surname_first("Dijkstra, (Pia) P.A.", &table());
    assert_eq!(q.initials, "P.A.");
    assert_eq!(q.surname, "Dijkstra");
  }

  #[test]
  fn surname_first_prefix_before_surname() {
    let q = parse_name_surname_first("van Dijkstra, P.A.", &table());
    assert_eq!(q.surname_prefix, "van");
    assert_eq!(q.surname, "Dijkstra");
    assert_eq!(q.initials, "P.A.");
  }

  #[test]
  fn surname_first_prefix_after_surname() {
    let q = parse_name_surname_first("Dijkstra van, P.A.", &table());
    assert_eq!(q.surname_prefix, "van");
    assert_eq!(q.surname, "Dijkstra");
    assert_eq!(q.initials, "P.A.");
  }

  #[test]
  fn surname_first_multi_word_prefix() {
    let q = parse_name_surname_first("Steur, A.G. van der", &table());
    assert_eq!(q.surname_prefix, "van der");
    assert_eq!(q.surname, "Steur");
    assert_eq!(q.initials, "A.G.");
  }

  #[test]
  fn surname_first_two_word_surname() {
    let q = parse_name_surname_first("Koser Kaya, F.", &table());
    assert_eq!(q.surname, "Koser Kaya");
    assert_eq!(q.initials, "F.");
  }

  #[test]
  fn surname_first_without_initials() {
    let q = parse_name_surname_first("Balkenende", &table());
    assert_eq!(q.initials, "");
    assert_eq!(q.surname, "Balkenende");
  }

  #[test]
  fn surname_first_empty_input() {
    assert_eq!(parse_name_surname_first("", &table()), NameQuery::default());
  }

  // ── Initials-first format ─────────────────────────────────────────────

  #[test]
  fn initials_first_basic() {
    let q = parse_name_initials_first("P.A. Dijkstra", &table());
    assert_eq!(q.initials, "P.A.");
    assert_eq!(q.surname, "Dijkstra");
  }

  #[test]
  fn initials_first_discards_forename_aside() {
    let q = parse_name_initials_first("P.A. (Pia) Dijkstra", &table());
    assert_eq!(q.initials, "P.A.");
    assert_eq!(q.surname, "Dijkstra");
    assert_eq!(q.forename, "");
  }

  #[test]
  fn initials_first_prefix_stays_with_surname() {
    let q = parse_name_initials_first("A.G. van der Steur", &table());
    assert_eq!(q.initials, "A.G.");
    assert_eq!(q.surname, "van der Steur");
  }

  #[test]
  fn initials_first_leading_prefix_is_not_initials() {
    let q = parse_name_initials_first("van der Steur", &table());
    assert_eq!(q.surname_prefix, "van der");
    assert_eq!(q.initials, "Steur");
    assert_eq!(q.surname, "Steur");
  }

  // ── Known limitations, reproduced deliberately ────────────────────────

  #[test]
  fn lowercase_initials_are_not_recognised() {
    // The pattern only matches uppercase groups; OCR noise like "p.a."
    // yields no initials rather than a guess.
    assert_eq!(find_initials("p.a. Dijkstra"), "");
  }

  #[test]
  fn multi_letter_initial_groups_truncate() {
    // "A.Th.B." breaks at the two-letter group; only the leading run of
    // single-letter groups is captured.
    assert_eq!(find_initials("A.Th.B. Kamp"), "A.");
  }
}

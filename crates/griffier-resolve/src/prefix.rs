//! Registry of known surname particles ("van", "van der", "'t", …).

/// Particles seen in the member and submitter data. Order is canonical for
/// reading; [`PrefixTable::new`] re-sorts longest-first so that "van" can
/// never shadow "van der".
const DUTCH_PREFIXES: &[&str] = &[
  "van der", "van den", "van de", "van 't", "in het", "in 't", "op de",
  "van", "von", "den", "der", "ten", "ter", "te", "de", "het", "'t",
];

/// An ordered set of surname prefixes, longest first.
///
/// The table is plain configuration — construct one with extra entries when
/// the source data calls for it, or use [`PrefixTable::dutch`].
#[derive(Debug, Clone)]
pub struct PrefixTable {
  prefixes: Vec<String>,
}

impl Default for PrefixTable {
  fn default() -> Self { Self::dutch() }
}

impl PrefixTable {
  /// Build a table from arbitrary prefixes. Entries are sorted longest
  /// first; equal lengths keep their given order.
  pub fn new<I, S>(prefixes: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let mut prefixes: Vec<String> =
      prefixes.into_iter().map(Into::into).collect();
    prefixes.sort_by_key(|p| std::cmp::Reverse(p.len()));
    Self { prefixes }
  }

  /// The built-in Dutch particle set.
  pub fn dutch() -> Self { Self::new(DUTCH_PREFIXES.iter().copied()) }

  /// The Dutch set extended with caller-supplied entries.
  pub fn dutch_with(extra: &[String]) -> Self {
    Self::new(
      DUTCH_PREFIXES
        .iter()
        .map(|p| p.to_string())
        .chain(extra.iter().cloned()),
    )
  }

  /// Find the first known prefix occurring in `text` as a standalone word,
  /// returning the prefix and its byte offset.
  ///
  /// A prefix only counts when it starts the string or follows whitespace,
  /// and when it is followed by whitespace or the end of the string. This
  /// keeps "van" from matching inside "Evangelische", and demotes
  /// "van der" to "van" in "Ard van derSteur".
  pub fn find_prefix(&self, text: &str) -> Option<(String, usize)> {
    for prefix in &self.prefixes {
      let mut from = 0;
      while let Some(rel) = text[from..].find(prefix.as_str()) {
        let pos = from + rel;
        if Self::is_word_bounded(text, pos, prefix.len()) {
          return Some((prefix.clone(), pos));
        }
        from = pos + 1;
      }
    }
    None
  }

  fn is_word_bounded(text: &str, pos: usize, len: usize) -> bool {
    let starts_word = pos == 0
      || text[..pos]
        .chars()
        .next_back()
        .is_some_and(char::is_whitespace);
    let end = pos + len;
    let ends_word = end == text.len()
      || text[end..].chars().next().is_some_and(char::is_whitespace);
    starts_word && ends_word
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn multi_word_prefix_wins_over_its_head() {
    let table = PrefixTable::dutch();
    assert_eq!(
      table.find_prefix("Ard van der Steur"),
      Some(("van der".to_string(), 4))
    );
  }

  #[test]
  fn prefix_must_be_followed_by_whitespace() {
    let table = PrefixTable::dutch();
    // "van der" is present as a substring but runs into "Steur"; only the
    // standalone "van" qualifies.
    assert_eq!(
      table.find_prefix("Ard van derSteur"),
      Some(("van".to_string(), 4))
    );
  }

  #[test]
  fn no_prefix_in_plain_name() {
    let table = PrefixTable::dutch();
    assert_eq!(table.find_prefix("Jan Peter Balkenende"), None);
  }

  #[test]
  fn prefix_inside_a_word_does_not_match() {
    let table = PrefixTable::dutch();
    assert_eq!(table.find_prefix("Evangelische Partij"), None);
  }

  #[test]
  fn prefix_at_string_start_and_end() {
    let table = PrefixTable::dutch();
    assert_eq!(
      table.find_prefix("van Dijkstra"),
      Some(("van".to_string(), 0))
    );
    assert_eq!(
      table.find_prefix("Dijkstra van"),
      Some(("van".to_string(), 9))
    );
  }

  #[test]
  fn extra_prefixes_are_honoured() {
    let table = PrefixTable::dutch_with(&["auf dem".to_string()]);
    assert_eq!(
      table.find_prefix("Hein auf dem Berge"),
      Some(("auf dem".to_string(), 5))
    );
  }
}

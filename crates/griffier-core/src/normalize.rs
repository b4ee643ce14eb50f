//! Text normalisation shared by the matcher and the slug derivation.
//!
//! Scraped vote records and document metadata spell the same surname with and
//! without diacritics ("Koşer Kaya" vs "Koser Kaya"), so every comparison in
//! the matcher runs over the folded form of both sides.

use unicode_normalization::UnicodeNormalization;

/// Lowercase `text` and strip diacritics down to the ASCII base form.
///
/// NFD decomposition splits accented characters into base + combining marks;
/// the marks are dropped. Characters that do not decompose (ø, ß, …) are
/// handled by a small replacement table first.
pub fn fold(text: &str) -> String {
  let mut replaced = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      'ß' => replaced.push_str("ss"),
      'Æ' | 'æ' => replaced.push_str("ae"),
      'Œ' | 'œ' => replaced.push_str("oe"),
      'Ø' | 'ø' => replaced.push('o'),
      'Ł' | 'ł' => replaced.push('l'),
      'Đ' | 'đ' => replaced.push('d'),
      'ı' => replaced.push('i'),
      _ => replaced.push(c),
    }
  }
  replaced
    .nfd()
    .filter(|c| !is_combining_mark(*c))
    .collect::<String>()
    .to_lowercase()
}

/// Derive a URL-safe slug: folded text with every non-alphanumeric run
/// collapsed to a single hyphen.
pub fn slugify(text: &str) -> String {
  let folded = fold(text);
  let mut slug = String::with_capacity(folded.len());
  for c in folded.chars() {
    if c.is_ascii_alphanumeric() {
      slug.push(c);
    } else if !slug.ends_with('-') && !slug.is_empty() {
      slug.push('-');
    }
  }
  slug.trim_end_matches('-').to_string()
}

fn is_combining_mark(c: char) -> bool {
  matches!(
    c,
    '\u{0300}'..='\u{036F}'
      | '\u{1AB0}'..='\u{1AFF}'
      | '\u{1DC0}'..='\u{1DFF}'
      | '\u{20D0}'..='\u{20FF}'
      | '\u{FE20}'..='\u{FE2F}'
  )
}

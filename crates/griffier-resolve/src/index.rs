//! CandidateIndex — an eagerly materialised snapshot of known persons.
//!
//! Each resolution call takes a fresh snapshot; eventual consistency with
//! concurrent writes is acceptable. The ordering is creation order, and the
//! matcher's tie-break depends on it, so the index never sorts.

use griffier_core::person::Person;

#[derive(Debug, Clone, Default)]
pub struct CandidateIndex {
  persons: Vec<Person>,
}

impl CandidateIndex {
  pub fn new(persons: Vec<Person>) -> Self { Self { persons } }

  pub fn len(&self) -> usize { self.persons.len() }

  pub fn is_empty(&self) -> bool { self.persons.is_empty() }

  /// All candidates, in index order.
  pub fn iter(&self) -> impl Iterator<Item = &Person> { self.persons.iter() }

  /// Candidates satisfying `predicate`, in index order — the first yielded
  /// element is the "first match wins" winner.
  pub fn find_by<'a, P>(
    &'a self,
    predicate: P,
  ) -> impl Iterator<Item = &'a Person>
  where
    P: Fn(&Person) -> bool + 'a,
  {
    self.persons.iter().filter(move |p| predicate(p))
  }
}

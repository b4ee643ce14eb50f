//! The `ChamberStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g.
//! `griffier-store-sqlite`). The resolution facade depends on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  membership::{
    NewParliamentMembership, NewPartyMembership, ParliamentMembership,
    PartyMembership,
  },
  party::{NewParty, Parliament, PoliticalParty},
  person::{NewPerson, Person},
};

/// Backfill input for [`ChamberStore::backfill_person`]. Only the fields set
/// to `Some` are written; everything else on the person is immutable.
#[derive(Debug, Clone, Default)]
pub struct PersonBackfill {
  pub initials:     Option<String>,
  pub wikidata_id:  Option<String>,
  pub parlement_id: Option<String>,
}

/// Abstraction over a parliamentary record store backend.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait ChamberStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Persons ───────────────────────────────────────────────────────────

  /// Create and persist a new person. The store assigns the id, the slug
  /// and the creation timestamp.
  fn add_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Retrieve a person by slug. Returns `None` if not found.
  fn person_by_slug<'a>(
    &'a self,
    slug: &'a str,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + 'a;

  /// List all persons in creation order.
  ///
  /// The matcher resolves equal-score ties in favour of the candidate seen
  /// first, so the ordering here is part of the contract.
  fn list_persons(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Backfill external identifiers and/or initials on an existing person.
  /// The only permitted mutation of a person record.
  fn backfill_person(
    &self,
    id: Uuid,
    backfill: PersonBackfill,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  // ── Parties and parliaments ───────────────────────────────────────────

  fn add_party(
    &self,
    input: NewParty,
  ) -> impl Future<Output = Result<PoliticalParty, Self::Error>> + Send + '_;

  fn get_party(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<PoliticalParty>, Self::Error>> + Send + '_;

  fn list_parties(
    &self,
  ) -> impl Future<Output = Result<Vec<PoliticalParty>, Self::Error>> + Send + '_;

  /// Overwrite the cached seat count. Called by periodic recomputation, not
  /// by resolution.
  fn set_party_seats(
    &self,
    id: Uuid,
    seats: u32,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn add_parliament<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Parliament, Self::Error>> + Send + 'a;

  // ── Memberships ───────────────────────────────────────────────────────

  fn add_party_membership(
    &self,
    input: NewPartyMembership,
  ) -> impl Future<Output = Result<PartyMembership, Self::Error>> + Send + '_;

  /// All party memberships for a person, in creation order.
  fn party_memberships(
    &self,
    person_id: Uuid,
  ) -> impl Future<Output = Result<Vec<PartyMembership>, Self::Error>> + Send + '_;

  fn add_parliament_membership(
    &self,
    input: NewParliamentMembership,
  ) -> impl Future<Output = Result<ParliamentMembership, Self::Error>> + Send + '_;

  /// All parliament memberships for a person, in creation order.
  fn parliament_memberships(
    &self,
    person_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ParliamentMembership>, Self::Error>> + Send + '_;
}

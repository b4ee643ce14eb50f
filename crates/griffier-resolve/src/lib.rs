//! Name parsing and entity resolution for parliamentary records.
//!
//! Scraped sources never carry stable identifiers, only free-text names in
//! varying spellings. This crate turns those strings into canonical
//! [`Person`] and [`PoliticalParty`] records held in a [`ChamberStore`]:
//! parse the name into a [`NameQuery`], score it against a snapshot of all
//! known persons, and create a record when nothing matches. Temporal lookups
//! answer "which party, which seat, on this date".

pub mod error;
pub mod index;
pub mod matcher;
pub mod parse;
pub mod prefix;
pub mod temporal;

use chrono::NaiveDate;
use griffier_core::{
  membership::{ParliamentMembership, PartyMembership},
  party::PoliticalParty,
  person::{NewPerson, Person, UNKNOWN_SURNAME},
  store::ChamberStore,
};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

pub use self::{
  error::{Error, Result},
  index::CandidateIndex,
  parse::{NameQuery, parse_name_initials_first, parse_name_surname_first},
  prefix::PrefixTable,
};

/// The resolution facade over a [`ChamberStore`].
///
/// Holds the prefix table alongside the store so every parse and every match
/// uses the same particle set.
pub struct Resolver<S> {
  store:    S,
  prefixes: PrefixTable,
}

impl<S: ChamberStore> Resolver<S> {
  pub fn new(store: S) -> Self {
    Self::with_prefixes(store, PrefixTable::dutch())
  }

  pub fn with_prefixes(store: S, prefixes: PrefixTable) -> Self {
    Self { store, prefixes }
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn prefixes(&self) -> &PrefixTable { &self.prefixes }

  // ─── Parsing ───────────────────────────────────────────────────────────────

  /// Parse a surname-first name ("Dijkstra, P.A.") with this resolver's
  /// prefix table.
  pub fn parse_surname_first(&self, name: &str) -> NameQuery {
    parse::parse_name_surname_first(name, &self.prefixes)
  }

  /// Parse an initials-first name ("P.A. Dijkstra") with this resolver's
  /// prefix table.
  pub fn parse_initials_first(&self, name: &str) -> NameQuery {
    parse::parse_name_initials_first(name, &self.prefixes)
  }

  /// Find the first known surname particle in `text`, with its byte offset.
  pub fn find_prefix(&self, text: &str) -> Option<(String, usize)> {
    self.prefixes.find_prefix(text)
  }

  // ─── Person resolution ─────────────────────────────────────────────────────

  /// A fresh candidate snapshot, in creation order.
  async fn snapshot(&self) -> Result<CandidateIndex> {
    let persons = self.store.list_persons().await.map_err(Error::store)?;
    Ok(CandidateIndex::new(persons))
  }

  /// Resolve a surname/initials pair to a known person, if any scores above
  /// the match threshold.
  pub async fn resolve_person(
    &self,
    surname: &str,
    initials: &str,
  ) -> Result<Option<Person>> {
    let query = NameQuery {
      surname: surname.to_string(),
      initials: initials.to_string(),
      ..NameQuery::default()
    };
    let index = self.snapshot().await?;
    Ok(matcher::best_match(&query, &index).cloned())
  }

  /// Resolve by exact display name. No scoring, no folding.
  pub async fn resolve_person_by_fullname(
    &self,
    fullname: &str,
  ) -> Result<Option<Person>> {
    let index = self.snapshot().await?;
    Ok(matcher::find_by_fullname(fullname, &index).cloned())
  }

  /// Resolve `query` to a person, creating a new record when nothing
  /// matches. This is the ingestion entry point: every submitter or member
  /// string ends up here, and the same string always yields the same person.
  ///
  /// A query with an empty surname resolves to the shared
  /// [unknown person](Resolver::unknown_person) sentinel.
  pub async fn resolve_or_create_person(
    &self,
    query: &NameQuery,
  ) -> Result<Person> {
    if query.surname.trim().is_empty() {
      return self.unknown_person().await;
    }

    let index = self.snapshot().await?;
    if let Some(found) = matcher::best_match(query, &index) {
      debug!(person_id = %found.person_id, surname = %query.surname, "matched existing person");
      return Ok(found.clone());
    }

    // The scorer compares the query's bare surname against the candidate's
    // surname/prefix combinations; it cannot see a prefix the parser split
    // off the query, nor a candidate whose particle was stored inside the
    // surname. An exact folded comparison of the full forms covers both.
    let query_full = surname_with_prefix(query);
    let folded_full = griffier_core::normalize::fold(&query_full);
    let folded_initials = griffier_core::normalize::fold(&query.initials);
    let exact = index
      .find_by(|p| {
        griffier_core::normalize::fold(&p.surname_including_prefix())
          == folded_full
          && griffier_core::normalize::fold(&p.initials) == folded_initials
      })
      .next();
    if let Some(found) = exact {
      debug!(person_id = %found.person_id, surname = %query.surname, "matched person by exact full surname");
      return Ok(found.clone());
    }

    info!(
      surname = %query.surname,
      initials = %query.initials,
      "no existing person matched; creating a new record"
    );
    let person = self
      .store
      .add_person(NewPerson {
        forename:       query.forename.clone(),
        surname:        query.surname.clone(),
        surname_prefix: query.surname_prefix.clone(),
        initials:       query.initials.clone(),
        wikidata_id:    None,
        parlement_id:   None,
      })
      .await
      .map_err(Error::store)?;
    Ok(person)
  }

  /// The shared sentinel person for sources that carry no name at all.
  /// Created on first use; every later empty-name query resolves to the same
  /// record.
  pub async fn unknown_person(&self) -> Result<Person> {
    if let Some(existing) = self
      .store
      .person_by_slug(UNKNOWN_SURNAME)
      .await
      .map_err(Error::store)?
    {
      return Ok(existing);
    }
    self
      .store
      .add_person(NewPerson {
        surname: UNKNOWN_SURNAME.to_string(),
        ..NewPerson::default()
      })
      .await
      .map_err(Error::store)
  }

  // ─── Party resolution ──────────────────────────────────────────────────────

  /// Resolve a party by full name or abbreviation, folded on both sides.
  pub async fn resolve_party(
    &self,
    name: &str,
  ) -> Result<Option<PoliticalParty>> {
    let folded = griffier_core::normalize::fold(name);
    let parties = self.store.list_parties().await.map_err(Error::store)?;
    Ok(parties.into_iter().find(|p| {
      griffier_core::normalize::fold(&p.name) == folded
        || griffier_core::normalize::fold(&p.name_short) == folded
    }))
  }

  // ─── Temporal lookups ──────────────────────────────────────────────────────

  /// The person's parliament seat active at `date`, if any.
  pub async fn parliament_membership_at(
    &self,
    person_id: Uuid,
    date: NaiveDate,
  ) -> Result<Option<ParliamentMembership>> {
    let seats = self
      .store
      .parliament_memberships(person_id)
      .await
      .map_err(Error::store)?;
    Ok(temporal::parliament_membership_at(&seats, date).cloned())
  }

  /// The person's party membership active at `date`, overlapping intervals
  /// disambiguated against the parliament seat.
  pub async fn party_membership_at(
    &self,
    person_id: Uuid,
    date: NaiveDate,
  ) -> Result<Option<PartyMembership>> {
    let parties = self
      .store
      .party_memberships(person_id)
      .await
      .map_err(Error::store)?;
    let seats = self
      .store
      .parliament_memberships(person_id)
      .await
      .map_err(Error::store)?;
    Ok(temporal::party_membership_at(&parties, &seats, date).cloned())
  }

  /// The party the person belonged to on `date`. Always re-reads the store;
  /// affiliation is a property of the date, never cached on the person.
  pub async fn party_at(
    &self,
    person_id: Uuid,
    date: NaiveDate,
  ) -> Result<Option<PoliticalParty>> {
    let Some(membership) = self.party_membership_at(person_id, date).await?
    else {
      return Ok(None);
    };
    self
      .store
      .get_party(membership.party_id)
      .await
      .map_err(Error::store)
  }

  /// Recompute every party's cached seat count as of `date`: one seat per
  /// person holding both an active parliament seat and a resolvable party
  /// membership on that date.
  pub async fn recount_seats(&self, date: NaiveDate) -> Result<()> {
    let persons = self.store.list_persons().await.map_err(Error::store)?;
    let mut counts: HashMap<Uuid, u32> = HashMap::new();
    for person in &persons {
      let seats = self
        .store
        .parliament_memberships(person.person_id)
        .await
        .map_err(Error::store)?;
      if temporal::parliament_membership_at(&seats, date).is_none() {
        continue;
      }
      let parties = self
        .store
        .party_memberships(person.person_id)
        .await
        .map_err(Error::store)?;
      if let Some(m) = temporal::party_membership_at(&parties, &seats, date) {
        *counts.entry(m.party_id).or_default() += 1;
      }
    }

    let parties = self.store.list_parties().await.map_err(Error::store)?;
    for party in parties {
      let seats = counts.get(&party.party_id).copied().unwrap_or(0);
      if seats != party.seats {
        info!(party = %party.name_short, seats, "updating cached seat count");
        self
          .store
          .set_party_seats(party.party_id, seats)
          .await
          .map_err(Error::store)?;
      }
    }
    Ok(())
  }
}

/// The query's surname with its particle in front, mirroring
/// [`Person::surname_including_prefix`].
fn surname_with_prefix(query: &NameQuery) -> String {
  if query.surname_prefix.is_empty() {
    query.surname.clone()
  } else {
    format!("{} {}", query.surname_prefix, query.surname)
  }
}

//! [`SqliteStore`] — the SQLite implementation of [`ChamberStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use griffier_core::{
  membership::{
    NewParliamentMembership, NewPartyMembership, ParliamentMembership,
    PartyMembership,
  },
  party::{NewParty, Parliament, PoliticalParty},
  person::{NewPerson, Person},
  store::{ChamberStore, PersonBackfill},
};

use crate::{
  encode::{
    encode_date_opt, encode_dt, encode_uuid, RawParliament,
    RawParliamentMembership, RawParty, RawPartyMembership, RawPerson,
  },
  schema::SCHEMA,
  Error, Result,
};

const PERSON_COLUMNS: &str = "person_id, forename, surname, surname_prefix, \
                              initials, wikidata_id, parlement_id, slug, \
                              created_at";

fn person_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPerson> {
  Ok(RawPerson {
    person_id:      row.get(0)?,
    forename:       row.get(1)?,
    surname:        row.get(2)?,
    surname_prefix: row.get(3)?,
    initials:       row.get(4)?,
    wikidata_id:    row.get(5)?,
    parlement_id:   row.get(6)?,
    slug:           row.get(7)?,
    created_at:     row.get(8)?,
  })
}

fn party_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawParty> {
  Ok(RawParty {
    party_id:    row.get(0)?,
    name:        row.get(1)?,
    name_short:  row.get(2)?,
    wikidata_id: row.get(3)?,
    founded:     row.get(4)?,
    dissolved:   row.get(5)?,
    seats:       row.get(6)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Griffier record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch_person(&self, id: Uuid) -> Result<Option<Person>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PERSON_COLUMNS} FROM persons WHERE person_id = ?1"),
              rusqlite::params![id_str],
              person_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }
}

// ─── ChamberStore impl ───────────────────────────────────────────────────────

impl ChamberStore for SqliteStore {
  type Error = Error;

  // ── Persons ───────────────────────────────────────────────────────────────

  async fn add_person(&self, input: NewPerson) -> Result<Person> {
    let person = Person {
      person_id:      Uuid::new_v4(),
      slug:           input.slug(),
      forename:       input.forename,
      surname:        input.surname,
      surname_prefix: input.surname_prefix,
      initials:       input.initials,
      wikidata_id:    input.wikidata_id,
      parlement_id:   input.parlement_id,
      created_at:     Utc::now(),
    };

    let id_str = encode_uuid(person.person_id);
    let at_str = encode_dt(person.created_at);
    let p = person.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (
             person_id, forename, surname, surname_prefix, initials,
             wikidata_id, parlement_id, slug, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            id_str,
            p.forename,
            p.surname,
            p.surname_prefix,
            p.initials,
            p.wikidata_id,
            p.parlement_id,
            p.slug,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(person)
  }

  async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
    self.fetch_person(id).await
  }

  async fn person_by_slug(&self, slug: &str) -> Result<Option<Person>> {
    let slug = slug.to_owned();

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {PERSON_COLUMNS} FROM persons WHERE slug = ?1
                 ORDER BY seq LIMIT 1"
              ),
              rusqlite::params![slug],
              person_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn list_persons(&self) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PERSON_COLUMNS} FROM persons ORDER BY seq"
        ))?;
        let rows = stmt
          .query_map([], person_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn backfill_person(
    &self,
    id: Uuid,
    backfill: PersonBackfill,
  ) -> Result<Person> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE persons SET
             initials     = COALESCE(?2, initials),
             wikidata_id  = COALESCE(?3, wikidata_id),
             parlement_id = COALESCE(?4, parlement_id)
           WHERE person_id = ?1",
          rusqlite::params![
            id_str,
            backfill.initials,
            backfill.wikidata_id,
            backfill.parlement_id,
          ],
        )?;
        Ok(changed)
      })
      .await?;

    if changed == 0 {
      return Err(Error::PersonNotFound(id));
    }
    self
      .fetch_person(id)
      .await?
      .ok_or(Error::PersonNotFound(id))
  }

  // ── Parties and parliaments ───────────────────────────────────────────────

  async fn add_party(&self, input: NewParty) -> Result<PoliticalParty> {
    let party = PoliticalParty {
      party_id:    Uuid::new_v4(),
      name:        input.name,
      name_short:  input.name_short,
      wikidata_id: input.wikidata_id,
      founded:     input.founded,
      dissolved:   input.dissolved,
      seats:       0,
    };

    let id_str = encode_uuid(party.party_id);
    let founded_str = encode_date_opt(party.founded);
    let dissolved_str = encode_date_opt(party.dissolved);
    let p = party.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO parties (
             party_id, name, name_short, wikidata_id, founded, dissolved, seats
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)",
          rusqlite::params![
            id_str,
            p.name,
            p.name_short,
            p.wikidata_id,
            founded_str,
            dissolved_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(party)
  }

  async fn get_party(&self, id: Uuid) -> Result<Option<PoliticalParty>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawParty> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT party_id, name, name_short, wikidata_id, founded,
                      dissolved, seats
               FROM parties WHERE party_id = ?1",
              rusqlite::params![id_str],
              party_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawParty::into_party).transpose()
  }

  async fn list_parties(&self) -> Result<Vec<PoliticalParty>> {
    let raws: Vec<RawParty> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT party_id, name, name_short, wikidata_id, founded,
                  dissolved, seats
           FROM parties ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map([], party_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawParty::into_party).collect()
  }

  async fn set_party_seats(&self, id: Uuid, seats: u32) -> Result<()> {
    let id_str = encode_uuid(id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE parties SET seats = ?2 WHERE party_id = ?1",
          rusqlite::params![id_str, seats],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn add_parliament(&self, name: &str) -> Result<Parliament> {
    let parliament = Parliament {
      parliament_id: Uuid::new_v4(),
      name:          name.to_owned(),
    };

    let id_str = encode_uuid(parliament.parliament_id);
    let name = parliament.name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO parliaments (parliament_id, name) VALUES (?1, ?2)",
          rusqlite::params![id_str, name],
        )?;
        Ok(())
      })
      .await?;

    Ok(parliament)
  }

  // ── Memberships ───────────────────────────────────────────────────────────

  async fn add_party_membership(
    &self,
    input: NewPartyMembership,
  ) -> Result<PartyMembership> {
    let membership = PartyMembership {
      membership_id: Uuid::new_v4(),
      person_id:     input.person_id,
      party_id:      input.party_id,
      joined:        input.joined,
      left:          input.left,
    };

    let id_str = encode_uuid(membership.membership_id);
    let person_str = encode_uuid(membership.person_id);
    let party_str = encode_uuid(membership.party_id);
    let joined_str = encode_date_opt(membership.joined);
    let left_str = encode_date_opt(membership.left);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO party_memberships (
             membership_id, person_id, party_id, joined_on, left_on
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, person_str, party_str, joined_str, left_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(membership)
  }

  async fn party_memberships(
    &self,
    person_id: Uuid,
  ) -> Result<Vec<PartyMembership>> {
    let person_str = encode_uuid(person_id);

    let raws: Vec<RawPartyMembership> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT membership_id, person_id, party_id, joined_on, left_on
           FROM party_memberships WHERE person_id = ?1 ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![person_str], |row| {
            Ok(RawPartyMembership {
              membership_id: row.get(0)?,
              person_id:     row.get(1)?,
              party_id:      row.get(2)?,
              joined_on:     row.get(3)?,
              left_on:       row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawPartyMembership::into_membership)
      .collect()
  }

  async fn add_parliament_membership(
    &self,
    input: NewParliamentMembership,
  ) -> Result<ParliamentMembership> {
    let membership = ParliamentMembership {
      membership_id: Uuid::new_v4(),
      person_id:     input.person_id,
      parliament_id: input.parliament_id,
      joined:        input.joined,
      left:          input.left,
    };

    let id_str = encode_uuid(membership.membership_id);
    let person_str = encode_uuid(membership.person_id);
    let parliament_str = encode_uuid(membership.parliament_id);
    let joined_str = encode_date_opt(membership.joined);
    let left_str = encode_date_opt(membership.left);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO parliament_memberships (
             membership_id, person_id, parliament_id, joined_on, left_on
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            id_str,
            person_str,
            parliament_str,
            joined_str,
            left_str
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(membership)
  }

  async fn parliament_memberships(
    &self,
    person_id: Uuid,
  ) -> Result<Vec<ParliamentMembership>> {
    let person_str = encode_uuid(person_id);

    let raws: Vec<RawParliamentMembership> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT membership_id, person_id, parliament_id, joined_on, left_on
           FROM parliament_memberships WHERE person_id = ?1 ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![person_str], |row| {
            Ok(RawParliamentMembership {
              membership_id: row.get(0)?,
              person_id:     row.get(1)?,
              parliament_id: row.get(2)?,
              joined_on:     row.get(3)?,
              left_on:       row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawParliamentMembership::into_membership)
      .collect()
  }
}

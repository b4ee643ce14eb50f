//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, dates as ISO `YYYY-MM-DD`.
//! UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use griffier_core::{
  membership::{ParliamentMembership, PartyMembership},
  party::{Parliament, PoliticalParty},
  person::Person,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  s.parse().map_err(|e: chrono::ParseError| Error::DateParse(e.to_string()))
}

pub fn encode_date_opt(d: Option<NaiveDate>) -> Option<String> {
  d.map(encode_date)
}

pub fn decode_date_opt(s: Option<String>) -> Result<Option<NaiveDate>> {
  s.as_deref().map(decode_date).transpose()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `persons` row.
pub struct RawPerson {
  pub person_id:      String,
  pub forename:       String,
  pub surname:        String,
  pub surname_prefix: String,
  pub initials:       String,
  pub wikidata_id:    Option<String>,
  pub parlement_id:   Option<String>,
  pub slug:           String,
  pub created_at:     String,
}

impl RawPerson {
  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      person_id:      decode_uuid(&self.person_id)?,
      forename:       self.forename,
      surname:        self.surname,
      surname_prefix: self.surname_prefix,
      initials:       self.initials,
      wikidata_id:    self.wikidata_id,
      parlement_id:   self.parlement_id,
      slug:           self.slug,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `parties` row.
pub struct RawParty {
  pub party_id:    String,
  pub name:        String,
  pub name_short:  String,
  pub wikidata_id: Option<String>,
  pub founded:     Option<String>,
  pub dissolved:   Option<String>,
  pub seats:       u32,
}

impl RawParty {
  pub fn into_party(self) -> Result<PoliticalParty> {
    Ok(PoliticalParty {
      party_id:    decode_uuid(&self.party_id)?,
      name:        self.name,
      name_short:  self.name_short,
      wikidata_id: self.wikidata_id,
      founded:     decode_date_opt(self.founded)?,
      dissolved:   decode_date_opt(self.dissolved)?,
      seats:       self.seats,
    })
  }
}

/// Raw strings read directly from a `parliaments` row.
pub struct RawParliament {
  pub parliament_id: String,
  pub name:          String,
}

impl RawParliament {
  pub fn into_parliament(self) -> Result<Parliament> {
    Ok(Parliament {
      parliament_id: decode_uuid(&self.parliament_id)?,
      name:          self.name,
    })
  }
}

/// Raw strings read directly from a `party_memberships` row.
pub struct RawPartyMembership {
  pub membership_id: String,
  pub person_id:     String,
  pub party_id:      String,
  pub joined_on:     Option<String>,
  pub left_on:       Option<String>,
}

impl RawPartyMembership {
  pub fn into_membership(self) -> Result<PartyMembership> {
    Ok(PartyMembership {
      membership_id: decode_uuid(&self.membership_id)?,
      person_id:     decode_uuid(&self.person_id)?,
      party_id:      decode_uuid(&self.party_id)?,
      joined:        decode_date_opt(self.joined_on)?,
      left:          decode_date_opt(self.left_on)?,
    })
  }
}

/// Raw strings read directly from a `parliament_memberships` row.
pub struct RawParliamentMembership {
  pub membership_id: String,
  pub person_id:     String,
  pub parliament_id: String,
  pub joined_on:     Option<String>,
  pub left_on:       Option<String>,
}

impl RawParliamentMembership {
  pub fn into_membership(self) -> Result<ParliamentMembership> {
    Ok(ParliamentMembership {
      membership_id: decode_uuid(&self.membership_id)?,
      person_id:     decode_uuid(&self.person_id)?,
      parliament_id: decode_uuid(&self.parliament_id)?,
      joined:        decode_date_opt(self.joined_on)?,
      left:          decode_date_opt(self.left_on)?,
    })
  }
}

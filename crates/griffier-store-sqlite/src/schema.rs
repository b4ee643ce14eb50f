//! SQL schema for the Griffier SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `persons.seq` preserves creation order: the matcher breaks equal-score
/// ties in favour of the earliest record, so `list_persons` must replay
/// insertion order exactly. Slugs are indexed but deliberately not unique;
/// distinct people can share a name, and lookups take the earliest.
///
/// Membership date columns are `joined_on`/`left_on` (LEFT is an SQL
/// keyword). NULL means an open bound.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS persons (
    seq            INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id      TEXT NOT NULL UNIQUE,
    forename       TEXT NOT NULL DEFAULT '',
    surname        TEXT NOT NULL,
    surname_prefix TEXT NOT NULL DEFAULT '',
    initials       TEXT NOT NULL DEFAULT '',
    wikidata_id    TEXT,
    parlement_id   TEXT,
    slug           TEXT NOT NULL,
    created_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS parties (
    party_id    TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    name_short  TEXT NOT NULL,
    wikidata_id TEXT,
    founded     TEXT,
    dissolved   TEXT,
    seats       INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS parliaments (
    parliament_id TEXT PRIMARY KEY,
    name          TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS party_memberships (
    membership_id TEXT PRIMARY KEY,
    person_id     TEXT NOT NULL REFERENCES persons(person_id),
    party_id      TEXT NOT NULL REFERENCES parties(party_id),
    joined_on     TEXT,
    left_on       TEXT
);

CREATE TABLE IF NOT EXISTS parliament_memberships (
    membership_id TEXT PRIMARY KEY,
    person_id     TEXT NOT NULL REFERENCES persons(person_id),
    parliament_id TEXT NOT NULL REFERENCES parliaments(parliament_id),
    joined_on     TEXT,
    left_on       TEXT
);

CREATE INDEX IF NOT EXISTS persons_slug_idx
    ON persons(slug);
CREATE INDEX IF NOT EXISTS party_memberships_person_idx
    ON party_memberships(person_id);
CREATE INDEX IF NOT EXISTS parliament_memberships_person_idx
    ON parliament_memberships(person_id);

PRAGMA user_version = 1;
";

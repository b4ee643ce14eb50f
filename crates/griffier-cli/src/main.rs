//! `griffier` — command-line front end for the parliamentary record store.
//!
//! Reads `griffier.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and exposes parsing, resolution and temporal
//! lookups as subcommands.
//!
//! ```
//! griffier import members.json
//! griffier parse "Steur, A.G. van der"
//! griffier resolve --create "P.A. Dijkstra" --format initials-first
//! griffier member-at pia-dijkstra 2013-06-01
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use griffier_core::{
  membership::{NewParliamentMembership, NewPartyMembership},
  party::NewParty,
  store::ChamberStore,
};
use griffier_resolve::{NameQuery, PrefixTable, Resolver};
use griffier_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Parliamentary record resolver")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "griffier.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Import a JSON seed file of parties and members, then recount seats.
  Import {
    /// Path to the seed file.
    seed: PathBuf,
  },

  /// Parse a free-text name and print its components.
  Parse {
    /// The name to parse.
    name: String,

    #[arg(long, value_enum, default_value_t)]
    format: NameFormat,
  },

  /// Resolve a free-text name to a stored person.
  Resolve {
    /// The name to resolve.
    name: String,

    #[arg(long, value_enum, default_value_t)]
    format: NameFormat,

    /// Create a new person when nothing matches.
    #[arg(long)]
    create: bool,
  },

  /// Show a person's seat and party on a given date.
  MemberAt {
    /// Slug of the person, e.g. "pia-dijkstra".
    person: String,

    /// The date to look up, ISO format.
    date: NaiveDate,
  },

  /// Recount every party's cached seat total.
  Recount {
    /// The date to count at; defaults to today.
    date: Option<NaiveDate>,
  },
}

/// Which of the two source spellings the name uses. There is no reliable way
/// to detect this from the string, so the caller says.
#[derive(ValueEnum, Clone, Copy, Default)]
enum NameFormat {
  /// "Dijkstra, P.A."
  #[default]
  SurnameFirst,
  /// "P.A. Dijkstra"
  InitialsFirst,
}

// ─── Config file ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Settings {
  #[serde(default = "Settings::default_database_path")]
  database_path:  PathBuf,
  /// Surname particles beyond the built-in Dutch set.
  #[serde(default)]
  extra_prefixes: Vec<String>,
}

impl Settings {
  fn default_database_path() -> PathBuf { PathBuf::from("griffier.db") }
}

// ─── Seed file ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SeedFile {
  #[serde(default = "SeedFile::default_parliament")]
  parliament: String,
  #[serde(default)]
  parties:    Vec<NewParty>,
  #[serde(default)]
  members:    Vec<SeedMember>,
}

impl SeedFile {
  fn default_parliament() -> String { "Tweede Kamer".to_string() }
}

/// One member entry: a surname-first name plus optional affiliation dates.
#[derive(Deserialize)]
struct SeedMember {
  name:   String,
  #[serde(default)]
  party:  Option<String>,
  #[serde(default)]
  joined: Option<NaiveDate>,
  #[serde(default)]
  left:   Option<NaiveDate>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("GRIFFIER"))
    .build()
    .context("failed to read config file")?;
  let settings: Settings = settings
    .try_deserialize()
    .context("failed to deserialise settings")?;

  let prefixes = PrefixTable::dutch_with(&settings.extra_prefixes);

  // `parse` needs no database; handle it before opening one.
  if let Commands::Parse { name, format } = &cli.command {
    let query = parse(name, *format, &prefixes);
    println!("{}", serde_json::to_string_pretty(&query)?);
    return Ok(());
  }

  let store = SqliteStore::open(&settings.database_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", settings.database_path)
    })?;
  let resolver = Resolver::with_prefixes(store, prefixes);

  match cli.command {
    Commands::Parse { .. } => unreachable!("handled above"),
    Commands::Import { seed } => import(&resolver, &seed).await,
    Commands::Resolve {
      name,
      format,
      create,
    } => resolve(&resolver, &name, format, create).await,
    Commands::MemberAt { person, date } => {
      member_at(&resolver, &person, date).await
    }
    Commands::Recount { date } => {
      let date = date.unwrap_or_else(|| Utc::now().date_naive());
      resolver.recount_seats(date).await?;
      list_seats(&resolver).await
    }
  }
}

fn parse(name: &str, format: NameFormat, prefixes: &PrefixTable) -> NameQuery {
  match format {
    NameFormat::SurnameFirst => {
      griffier_resolve::parse_name_surname_first(name, prefixes)
    }
    NameFormat::InitialsFirst => {
      griffier_resolve::parse_name_initials_first(name, prefixes)
    }
  }
}

// ─── Subcommands ──────────────────────────────────────────────────────────────

async fn import(
  resolver: &Resolver<SqliteStore>,
  seed: &PathBuf,
) -> anyhow::Result<()> {
  let raw = std::fs::read_to_string(seed)
    .with_context(|| format!("reading seed file {}", seed.display()))?;
  let seed: SeedFile =
    serde_json::from_str(&raw).context("parsing seed file")?;

  let store = resolver.store();
  let parliament = store.add_parliament(&seed.parliament).await?;

  for party in seed.parties {
    let name = party.name.clone();
    if resolver.resolve_party(&name).await?.is_some() {
      tracing::debug!(party = %name, "party already present");
      continue;
    }
    store.add_party(party).await?;
    tracing::info!(party = %name, "added party");
  }

  let mut imported = 0usize;
  for member in seed.members {
    let query = resolver.parse_surname_first(&member.name);
    let person = resolver.resolve_or_create_person(&query).await?;

    store
      .add_parliament_membership(NewParliamentMembership {
        person_id:     person.person_id,
        parliament_id: parliament.parliament_id,
        joined:        member.joined,
        left:          member.left,
      })
      .await?;

    if let Some(party_name) = member.party {
      match resolver.resolve_party(&party_name).await? {
        Some(party) => {
          store
            .add_party_membership(NewPartyMembership {
              person_id: person.person_id,
              party_id:  party.party_id,
              joined:    member.joined,
              left:      member.left,
            })
            .await?;
        }
        None => {
          tracing::warn!(
            member = %member.name,
            party = %party_name,
            "unknown party; membership skipped"
          );
        }
      }
    }
    imported += 1;
  }
  tracing::info!(imported, "seed import finished");

  resolver.recount_seats(Utc::now().date_naive()).await?;
  list_seats(resolver).await
}

async fn resolve(
  resolver: &Resolver<SqliteStore>,
  name: &str,
  format: NameFormat,
  create: bool,
) -> anyhow::Result<()> {
  let query = parse(name, format, resolver.prefixes());

  let person = if create {
    Some(resolver.resolve_or_create_person(&query).await?)
  } else {
    resolver
      .resolve_person(&query.surname, &query.initials)
      .await?
  };

  match person {
    Some(person) => println!("{}", serde_json::to_string_pretty(&person)?),
    None => {
      println!("no match for {name:?}");
      std::process::exit(1);
    }
  }
  Ok(())
}

async fn member_at(
  resolver: &Resolver<SqliteStore>,
  slug: &str,
  date: NaiveDate,
) -> anyhow::Result<()> {
  let person = resolver
    .store()
    .person_by_slug(slug)
    .await?
    .with_context(|| format!("no person with slug {slug:?}"))?;

  println!("{}", person.fullname());

  match resolver
    .parliament_membership_at(person.person_id, date)
    .await?
  {
    Some(seat) => println!(
      "  seat: {} .. {}",
      bound(seat.joined),
      bound(seat.left)
    ),
    None => println!("  seat: none on {date}"),
  }

  match resolver.party_at(person.person_id, date).await? {
    Some(party) => println!("  party: {} ({})", party.name, party.name_short),
    None => println!("  party: none on {date}"),
  }
  Ok(())
}

async fn list_seats(resolver: &Resolver<SqliteStore>) -> anyhow::Result<()> {
  let mut parties = resolver.store().list_parties().await?;
  parties.sort_by(|a, b| b.seats.cmp(&a.seats));
  for party in parties {
    println!("{:>4}  {} ({})", party.seats, party.name, party.name_short);
  }
  Ok(())
}

fn bound(date: Option<NaiveDate>) -> String {
  date.map_or_else(|| "open".to_string(), |d| d.to_string())
}

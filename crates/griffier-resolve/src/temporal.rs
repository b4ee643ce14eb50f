//! Temporal affiliation resolution — which seat and party a person held on
//! a given date.

use chrono::NaiveDate;
use griffier_core::membership::{
  ParliamentMembership, PartyMembership, TemporalMembership,
};
use tracing::warn;

/// The first parliament membership active at `date`, in creation order.
pub fn parliament_membership_at(
  memberships: &[ParliamentMembership],
  date: NaiveDate,
) -> Option<&ParliamentMembership> {
  memberships.iter().find(|m| m.is_active_at(date))
}

/// The party membership active at `date`.
///
/// One active interval is the normal case. Multiple active intervals mean
/// the source data has overlapping memberships — a data-quality anomaly that
/// is disambiguated (not repaired) against the person's parliament seat:
///
/// 1. a single membership fitting entirely within the seat's own bounds
///    wins;
/// 2. failing that, a single open-ended membership already held when the
///    seat began wins — the party at the start of the term, assumed
///    unchanged over the open remainder;
/// 3. anything still ambiguous is logged and left unresolved.
pub fn party_membership_at<'a>(
  party_memberships: &'a [PartyMembership],
  parliament_memberships: &[ParliamentMembership],
  date: NaiveDate,
) -> Option<&'a PartyMembership> {
  let active: Vec<&PartyMembership> = party_memberships
    .iter()
    .filter(|m| m.is_active_at(date))
    .collect();

  match active.len() {
    0 => None,
    1 => Some(active[0]),
    _ => disambiguate(
      &active,
      parliament_membership_at(parliament_memberships, date),
      date,
    ),
  }
}

fn disambiguate<'a>(
  active: &[&'a PartyMembership],
  seat: Option<&ParliamentMembership>,
  date: NaiveDate,
) -> Option<&'a PartyMembership> {
  let Some(seat) = seat else {
    warn!(
      %date,
      candidates = active.len(),
      "overlapping party memberships and no parliament seat to disambiguate"
    );
    return None;
  };

  let within: Vec<&PartyMembership> = active
    .iter()
    .copied()
    .filter(|m| fits_within(m, seat))
    .collect();
  if within.len() == 1 {
    return Some(within[0]);
  }

  if let Some(seat_joined) = seat.joined {
    let at_term_start: Vec<&PartyMembership> = active
      .iter()
      .copied()
      .filter(|m| {
        m.left.is_none() && m.joined.is_none_or(|joined| joined <= seat_joined)
      })
      .collect();
    if at_term_start.len() == 1 {
      return Some(at_term_start[0]);
    }
  }

  warn!(
    %date,
    candidates = active.len(),
    "ambiguous overlapping party memberships left unresolved"
  );
  None
}

/// Whether the party interval fits entirely within the seat interval;
/// bounds are only compared when both sides are known.
fn fits_within(m: &PartyMembership, seat: &ParliamentMembership) -> bool {
  let start_ok = match (m.joined, seat.joined) {
    (Some(m_joined), Some(seat_joined)) => m_joined >= seat_joined,
    _ => true,
  };
  let end_ok = match (m.left, seat.left) {
    (Some(m_left), Some(seat_left)) => m_left <= seat_left,
    _ => true,
  };
  start_ok && end_ok
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;

  fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

  fn party_membership(
    party_id: Uuid,
    joined: Option<&str>,
    left: Option<&str>,
  ) -> PartyMembership {
    PartyMembership {
      membership_id: Uuid::new_v4(),
      person_id: Uuid::new_v4(),
      party_id,
      joined: joined.map(|d| d.parse().unwrap()),
      left: left.map(|d| d.parse().unwrap()),
    }
  }

  fn seat(joined: Option<&str>, left: Option<&str>) -> ParliamentMembership {
    ParliamentMembership {
      membership_id: Uuid::new_v4(),
      person_id:     Uuid::new_v4(),
      parliament_id: Uuid::new_v4(),
      joined:        joined.map(|d| d.parse().unwrap()),
      left:          left.map(|d| d.parse().unwrap()),
    }
  }

  #[test]
  fn consecutive_intervals_resolve_by_date() {
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let memberships = vec![
      party_membership(first, Some("2010-01-01"), Some("2015-03-20")),
      party_membership(second, Some("2015-03-20"), None),
    ];

    let at_2012 =
      party_membership_at(&memberships, &[], date("2012-12-25")).unwrap();
    assert_eq!(at_2012.party_id, first);

    let at_2016 =
      party_membership_at(&memberships, &[], date("2016-01-01")).unwrap();
    assert_eq!(at_2016.party_id, second);
  }

  #[test]
  fn no_membership_active() {
    let memberships =
      vec![party_membership(Uuid::new_v4(), Some("2010-01-01"), Some("2012-01-01"))];
    assert!(party_membership_at(&memberships, &[], date("2013-06-01")).is_none());
  }

  #[test]
  fn overlap_resolved_by_seat_bounds() {
    let inside = Uuid::new_v4();
    let outside = Uuid::new_v4();
    let memberships = vec![
      // Predates the seat; overlaps the other membership.
      party_membership(outside, Some("2008-01-01"), Some("2014-01-01")),
      // Fits entirely within the seat's bounds.
      party_membership(inside, Some("2012-11-01"), Some("2014-01-01")),
    ];
    let seats = [seat(Some("2012-09-20"), Some("2017-03-23"))];

    let found =
      party_membership_at(&memberships, &seats, date("2013-06-01")).unwrap();
    assert_eq!(found.party_id, inside);
  }

  #[test]
  fn overlap_resolved_by_party_at_term_start() {
    let original = Uuid::new_v4();
    let splinter = Uuid::new_v4();
    let memberships = vec![
      // Held since before the term and never left: the term-start party.
      party_membership(original, Some("2008-01-01"), None),
      // Second open-ended membership recorded mid-term; both fit within an
      // open-ended seat, so step 1 cannot separate them.
      party_membership(splinter, Some("2014-06-01"), None),
    ];
    let seats = [seat(Some("2012-09-20"), None)];

    let found =
      party_membership_at(&memberships, &seats, date("2015-01-01")).unwrap();
    assert_eq!(found.party_id, original);
  }

  #[test]
  fn overlap_without_seat_is_unresolved() {
    let memberships = vec![
      party_membership(Uuid::new_v4(), Some("2008-01-01"), None),
      party_membership(Uuid::new_v4(), Some("2014-06-01"), None),
    ];
    assert!(party_membership_at(&memberships, &[], date("2015-01-01")).is_none());
  }

  #[test]
  fn truly_ambiguous_overlap_is_unresolved() {
    // Two open-ended memberships both held before the term started: every
    // ladder step yields two candidates, so the resolver declines to guess.
    let memberships = vec![
      party_membership(Uuid::new_v4(), Some("2008-01-01"), None),
      party_membership(Uuid::new_v4(), Some("2009-01-01"), None),
    ];
    let seats = [seat(Some("2012-09-20"), None)];
    assert!(
      party_membership_at(&memberships, &seats, date("2015-01-01")).is_none()
    );
  }

  #[test]
  fn seat_lookup_prefers_first_active() {
    let seats = [
      seat(Some("2010-06-17"), Some("2012-09-20")),
      seat(Some("2012-09-20"), None),
    ];
    let found = parliament_membership_at(&seats, date("2011-01-01")).unwrap();
    assert_eq!(found.membership_id, seats[0].membership_id);
    let later = parliament_membership_at(&seats, date("2013-01-01")).unwrap();
    assert_eq!(later.membership_id, seats[1].membership_id);
  }
}

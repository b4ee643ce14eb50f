//! Error type for the resolution facade.

use thiserror::Error;

/// Resolution itself never fails — a miss is an `Option::None` — so the only
/// error source is the backing store. The store's error type is erased here
/// so the facade has one concrete error regardless of backend.
#[derive(Debug, Error)]
pub enum Error {
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

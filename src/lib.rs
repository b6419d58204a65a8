//! NOTAM batch curation for VFR flight planning.
//!
//! A [NotamList](notam::list::NotamList) holds one JSON batch as
//! retrieved for a circular query region, filtered down to the valid,
//! VFR-relevant notices. Lists can be narrowed to notices relevant near
//! a given waypoint, ranked for display, and round-trip through a
//! compact binary encoding for on-disk caching between sessions.
use thiserror::Error;

pub(crate) mod constants;

pub mod epoch;

mod storage;

pub mod coord;
pub mod notam;
pub mod read_state;

pub mod prelude {
    pub use crate::coord::{GeoCircle, GeoCoordinate};
    pub use crate::notam::{list::NotamList, Notam};
    pub use crate::read_state::ReadState;
    pub use crate::Error;
    // re-export
    pub use hifitime::{Duration, Epoch};
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("not enough bytes available")]
    NotEnoughBytes,
    #[error("invalid utf-8 content")]
    Utf8Error,
    #[error("i/o error")]
    IoError(#[from] std::io::Error),
}

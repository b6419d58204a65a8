//! Curated NOTAM batches
use hifitime::{Duration, Epoch, Unit};
use itertools::Itertools;
use log::debug;
use std::collections::HashSet;

use crate::constants::Constants;
use crate::coord::{GeoCircle, GeoCoordinate};
use crate::epoch;
use crate::notam::Notam;
use crate::read_state::ReadState;

/// One curated batch of notices, as retrieved for a circular query
/// region. All filtering operations are pure: they leave `self` alone
/// and hand out a new list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotamList {
    /// Curated notices, insertion order preserved
    pub notams: Vec<Notam>,
    /// Region the batch was retrieved for
    pub region: GeoCircle,
    /// Retrieval timestamp (UTC); None for an uninitialized list
    pub retrieved: Option<Epoch>,
}

impl NotamList {
    /// Builds a [NotamList] from one feed document and the region the
    /// feed was queried for. Returns the curated list together with the
    /// numbers of all notices cancelled by cancellation notices found in
    /// the batch. Undecodable, irrelevant and duplicated items are
    /// dropped silently.
    pub fn from_json(
        doc: &serde_json::Value,
        region: GeoCircle,
    ) -> (Self, HashSet<String>) {
        let mut notams = Vec::<Notam>::new();
        let mut cancelled = HashSet::<String>::new();
        let mut numbers_seen = HashSet::<String>::new();

        if let Some(items) = doc.get("items").and_then(|v| v.as_array()) {
            for item in items {
                let notam = match Notam::from_json(item) {
                    Ok(notam) => notam,
                    Err(e) => {
                        debug!("dropping undecodable item: {}", e);
                        continue;
                    },
                };
                if !notam.is_valid() {
                    debug!("dropping incomplete notice {}", notam.number);
                    continue;
                }
                if notam.is_cancellation() {
                    cancelled.insert(notam.cancels.clone());
                    continue;
                }
                if notam.is_outdated() {
                    continue;
                }
                // excludes IFR-only and checklist notices
                if !notam.pertains_to_vfr() {
                    continue;
                }
                // the FAA duplicates NOTAMs, one copy per affected FIR
                if !numbers_seen.insert(notam.number.clone()) {
                    continue;
                }
                notams.push(notam);
            }
        }

        (
            Self {
                notams,
                region,
                retrieved: Some(epoch::now()),
            },
            cancelled,
        )
    }

    /// Number of notices in this batch.
    pub fn len(&self) -> usize {
        self.notams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notams.is_empty()
    }

    /// Returns true if this list was properly retrieved for a
    /// well-formed region.
    pub fn is_valid(&self) -> bool {
        self.region.is_valid() && self.retrieved.is_some()
    }

    /// Returns true once the batch is older than its lifetime and an
    /// update should be requested.
    pub fn is_outdated(&self) -> bool {
        self.age() > Constants::MAX_BATCH_AGE_H * Unit::Hour
    }

    /// Elapsed time since retrieval; zero for an uninitialized list.
    pub fn age(&self) -> Duration {
        match self.retrieved {
            Some(retrieved) => epoch::now() - retrieved,
            None => Duration::ZERO,
        }
    }

    /// Short status line: whether notices are present, and whether an
    /// update should be requested.
    pub fn summary(&self) -> String {
        let mut results = Vec::new();

        if self.notams.is_empty() {
            results.push("No NOTAMs known");
        } else {
            results.push("NOTAMs available");
        }

        if !self.is_valid() || self.is_outdated() {
            results.push("Update requested.");
        }

        results.iter().join(" • ")
    }

    /// New list over the same entries, with notices cancelled by a later
    /// batch removed. Validity and de-duplication are re-applied; region
    /// and retrieval time carry over.
    pub fn cleaned(&self, cancelled_notam_numbers: &HashSet<String>) -> Self {
        let notams = self
            .notams
            .iter()
            .filter(|notam| notam.is_valid())
            .filter(|notam| !notam.is_outdated())
            .filter(|notam| !cancelled_notam_numbers.contains(&notam.number))
            .unique_by(|notam| notam.number.clone())
            .cloned()
            .collect();

        Self {
            notams,
            region: self.region,
            retrieved: self.retrieved,
        }
    }

    /// New list narrowed to notices relevant to flight near `waypoint`,
    /// ranked for display: unread notices first, then by effective start
    /// (already-started notices tie at the current time), then by
    /// effective end. The new region never extends beyond the area the
    /// original batch was retrieved for.
    pub fn restricted<R: ReadState>(&self, waypoint: &GeoCoordinate, read_state: &R) -> Self {
        let radius_m = Constants::RESTRICTION_RADIUS_M.min(
            (self.region.radius_m - self.region.center.distance_m(waypoint)).max(0.0),
        );

        let mut notams = self
            .notams
            .iter()
            .filter(|notam| notam.is_valid())
            .filter(|notam| !notam.is_outdated())
            .filter(|notam| {
                notam.coordinate.distance_m(waypoint) <= Constants::RESTRICTION_RADIUS_M
            })
            .filter(|notam| notam.region().contains(waypoint))
            .unique_by(|notam| notam.number.clone())
            .cloned()
            .collect::<Vec<_>>();

        let now = epoch::now();
        notams.sort_by_key(|notam| {
            (
                read_state.is_read(&notam.number),
                notam.effective_start.max(now),
                notam.effective_end,
            )
        });

        Self {
            notams,
            region: GeoCircle::new(*waypoint, radius_m),
            retrieved: self.retrieved,
        }
    }
}

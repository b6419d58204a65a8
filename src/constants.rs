pub struct Constants {}

impl Constants {
    /// Mean Earth radius of the spherical model, in meters.
    pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

    /// One international nautical mile, in meters.
    pub const NAUTICAL_MILE_M: f64 = 1852.0;

    /// Maximum distance between a waypoint and a notice for the notice
    /// to remain relevant to flight near that waypoint.
    pub const RESTRICTION_RADIUS_M: f64 = 20.0 * Self::NAUTICAL_MILE_M;

    /// Lifetime of one retrieved batch, in hours. Older batches request
    /// an update.
    pub const MAX_BATCH_AGE_H: f64 = 24.0;
}

/// Default co-occurrence window size `K`: the maximum absolute token
/// distance at which a neighbor relationship is recorded.
pub const DEFAULT_WINDOW_SIZE: u32 = 8;

/// Default weight applied to a neighbor's raw co-occurrence count when
/// computing projection magnitudes.
pub const DEFAULT_WEIGHT_COUNT: f64 = 1.0;

/// Default weight applied to a neighbor's externally adjustable rating
/// when computing projection magnitudes.
pub const DEFAULT_WEIGHT_RATING: f64 = 1.0;

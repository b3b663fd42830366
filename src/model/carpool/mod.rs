//! the carpool consolidation heuristic. deterministic in the bucket's taxi
//! and passenger counts and the configured per-vehicle passenger goal.

/// estimated number of shared vehicles needed to carry one bucket's
/// passengers:
/// - no taxis means no carpools;
/// - a single taxi cannot be consolidated further;
/// - otherwise floor(passengers / goal), clamped up to 1 -- even when the
///   pooled passengers fall short of the goal, someone still has to pick
///   them up.
///
/// `goal` must be at least 1 (enforced by configuration validation).
pub fn estimate_carpools(taxi_count: u64, passenger_count: u64, goal: u32) -> u64 {
    if taxi_count == 0 {
        0
    } else if taxi_count == 1 {
        1
    } else {
        (passenger_count / goal as u64).max(1)
    }
}

//! Reward calculator — per-response payout from a survey's frozen budget.
//!
//! Pure arithmetic on the (price, response target) pair captured at publish
//! time. Never fed from a possibly-mutated survey later.

/// Tolerated per-response rounding drift when summing payouts against a
/// survey's total price.
pub const ROUNDING_EPSILON: f64 = 0.005;

/// Per-response payout: price split evenly across the response target,
/// rounded half-up to two decimal places.
pub fn unit_reward(price: f64, total_responses: u32) -> f64 {
    round_half_up(price / f64::from(total_responses.max(1)))
}

fn round_half_up(amount: f64) -> f64 {
    (amount * 100.0 + 0.5).floor() / 100.0
}

use rust_decimal::{Decimal, RoundingStrategy};

/// Half-up rounding (midpoint away from zero) to `dp` decimal places.
///
/// The result always carries exactly `dp` digits of scale, so `3.5` rounded
/// to two places serializes as `3.50`.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded
}

pub fn round_cents(value: Decimal) -> Decimal {
    round_half_up(value, 2)
}

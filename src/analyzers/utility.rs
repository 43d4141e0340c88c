/// Rounds `value` to `dp` decimal places, resolving exact ties to the even
/// neighbour (banker's rounding), e.g. `0.0625 -> 0.062`.
pub fn round_dp(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round_ties_even() / factor
}

use rand::Rng;

use crate::worksheet_engine::{
    helpers::draw,
    models::{Problem, WorksheetConfig},
};

/// The dividend is built as `divisor × quotient`, so every problem has an
/// exact integer answer.
///
/// Without a fixed factor the divisor comes from `1..=high`, never 0.
/// Validation guarantees `high >= 1` in that case and a non-zero fixed factor
/// otherwise.
pub fn generate<R: Rng>(rng: &mut R, config: &WorksheetConfig) -> Problem {
    let divisor = match config.fixed_factor {
        Some(factor) => i64::from(factor),
        None => draw(rng, 1, config.high),
    };
    let quotient = draw(rng, config.low, config.high);
    Problem::new(divisor * quotient, divisor)
}

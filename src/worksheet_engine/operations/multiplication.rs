use rand::Rng;

use crate::worksheet_engine::{
    helpers::draw,
    models::{Problem, WorksheetConfig},
};

/// With a fixed factor the first operand is pinned (a times-table drill);
/// otherwise both factors come from the range.
pub fn generate<R: Rng>(rng: &mut R, config: &WorksheetConfig) -> Problem {
    let a = match config.fixed_factor {
        Some(factor) => i64::from(factor),
        None => draw(rng, config.low, config.high),
    };
    let b = draw(rng, config.low, config.high);
    Problem::new(a, b)
}

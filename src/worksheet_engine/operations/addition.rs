use rand::Rng;

use crate::worksheet_engine::{
    helpers::draw,
    models::{Problem, WorksheetConfig},
};

/// Both addends drawn independently from the configured range.
pub fn generate<R: Rng>(rng: &mut R, config: &WorksheetConfig) -> Problem {
    let a = draw(rng, config.low, config.high);
    let b = draw(rng, config.low, config.high);
    Problem::new(a, b)
}

use rand::Rng;

use crate::worksheet_engine::{
    helpers::draw,
    models::{Problem, WorksheetConfig},
};

/// Larger draw goes on top so the difference is never negative.
pub fn generate<R: Rng>(rng: &mut R, config: &WorksheetConfig) -> Problem {
    let x = draw(rng, config.low, config.high);
    let y = draw(rng, config.low, config.high);
    Problem::new(x.max(y), x.min(y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet_engine::models::Operation;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn minuend_is_never_smaller_than_subtrahend() {
        let config = WorksheetConfig {
            low: 0,
            high: 20,
            operation: Operation::Subtraction,
            problem_count: 1,
            fixed_factor: None,
        };
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let p = generate(&mut rng, &config);
            assert!(p.a >= p.b && p.b >= 0, "{p:?}");
        }
    }
}

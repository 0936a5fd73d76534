use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::Result;
use crate::worksheet_engine::{
    models::{Operation, Problem, WorksheetConfig, WorksheetRequest},
    operations,
};

/// Generate exactly `config.problem_count` problems from `rng`.
///
/// The configuration is validated first; nothing is drawn from `rng` when it
/// is rejected.
pub fn generate<R: Rng>(config: &WorksheetConfig, rng: &mut R) -> Result<Vec<Problem>> {
    config.validate()?;

    if config.fixed_factor.is_some() && !config.operation.accepts_fixed_factor() {
        warn!(operation = %config.operation, "fixed factor ignored for this operation");
    }

    let problems: Vec<Problem> = (0..config.problem_count)
        .map(|_| match config.operation {
            Operation::Addition       => operations::addition::generate(rng, config),
            Operation::Subtraction    => operations::subtraction::generate(rng, config),
            Operation::Multiplication => operations::multiplication::generate(rng, config),
            Operation::Division       => operations::division::generate(rng, config),
        })
        .collect();

    debug!(
        operation = %config.operation,
        count = problems.len(),
        low = config.low,
        high = config.high,
        "generated problems"
    );
    Ok(problems)
}

/// Seeded entry point: builds the RNG from `request.rng_seed` and generates.
pub fn generate_problems(request: &WorksheetRequest) -> Result<Vec<Problem>> {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    generate(&request.config, &mut rng)
}

//! End-to-end demo of `minute_math`.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. **Problem sets**: one seeded set per operation, printed to the terminal,
//!    so the output is reproducible.
//! 2. **Layout**: where the first problems of a 50-problem sheet land.
//! 3. **Batch**: one PDF per student written to `demo_output/`.

use minute_math::{
    generate_problems, run_batch, BatchOptions, GridLayout, Operation, PdfDirectory,
    WorksheetConfig, WorksheetRequest,
};

fn print_set(operation: Operation, fixed_factor: Option<i32>) {
    let config = WorksheetConfig {
        low: 1,
        high: 12,
        operation,
        problem_count: 6,
        fixed_factor,
    };
    let problems = generate_problems(&WorksheetRequest::new(config).with_seed(42))
        .expect("demo configuration is valid");
    let line: Vec<String> = problems
        .iter()
        .map(|p| format!("{} {} {}", p.a, operation.symbol(), p.b))
        .collect();
    println!("  {:<15} {}", operation.to_string(), line.join("   "));
}

fn main() {
    println!();
    println!("══ Problem sets (seed 42) ══");
    print_set(Operation::Addition, None);
    print_set(Operation::Subtraction, None);
    print_set(Operation::Multiplication, Some(7));
    print_set(Operation::Division, None);

    println!();
    println!("══ Layout (default 5 × 5 grid) ══");
    let layout = GridLayout::default();
    for index in [0usize, 4, 5, 24, 25, 49] {
        let slot = layout.locate(index);
        println!(
            "  #{index:<3} page {}  col {}  row {}  at ({:.0}, {:.0}) mm",
            slot.page + 1, slot.column, slot.row, slot.x, slot.y
        );
    }

    println!();
    println!("══ Batch ══");
    let out = std::path::Path::new("demo_output");
    std::fs::create_dir_all(out).expect("create demo_output/");
    let config = WorksheetConfig::new(1, 10, "addition", 30, None).expect("valid config");
    let names = vec!["Henry".to_string(), String::new(), "Ada".to_string()];
    let mut sink = PdfDirectory::new(out);
    let options = BatchOptions { rng_seed: Some(1), ..BatchOptions::default() };
    let report = run_batch(&config, &names, &options, &mut sink).expect("batch runs");
    for path in report.created() {
        println!("  created {}", path.display());
    }
}

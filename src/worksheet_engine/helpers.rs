//! Shared helpers used by the operation generators and the sheet composer.
//!
//! Operand drawing lives here so every operation samples its range the same
//! way; keeping one call site per draw also keeps seeded runs stable.

use rand::Rng;

use crate::worksheet_engine::models::Operation;

/// Draw one operand uniformly from `low..=high`.
pub fn draw<R: Rng>(rng: &mut R, low: i32, high: i32) -> i64 {
    i64::from(rng.gen_range(low..=high))
}

/// Capitalise the first letter of every whitespace-separated word.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Page header, e.g. `"Henry's Addition Minute Math"`.
pub fn header_text(student: Option<&str>, operation: Operation) -> String {
    let title = title_case(&format!("{} minute math", operation.name()));
    match student.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => format!("{}'s {}", name, title),
        None => title,
    }
}

/// Page footer, `n` is 1-based.
pub fn footer_text(page_number: usize) -> String {
    format!("Page {}", page_number)
}

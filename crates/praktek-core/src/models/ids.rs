//! Sequential record identifiers (`P001`, `J014`, ...).

use std::collections::HashSet;

pub const PATIENT_PREFIX: char = 'P';
pub const SCHEDULE_PREFIX: char = 'J';
pub const REGISTRATION_PREFIX: char = 'R';

/// Next identifier for a table holding `existing` ids.
///
/// The number is the table length plus one, zero-padded to three digits.
/// Deleting rows can leave that number already in use; in that case the
/// counter moves forward until it finds a free id.
pub fn next_sequential_id<I, S>(prefix: char, existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let existing: Vec<S> = existing.into_iter().collect();
    let taken: HashSet<&str> = existing.iter().map(|id| id.as_ref()).collect();

    let mut counter = existing.len() + 1;
    loop {
        let candidate = format!("{}{:03}", prefix, counter);
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        counter += 1;
    }
}

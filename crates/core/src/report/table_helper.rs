//! Duplicate folding for report table rows.
//!
//! Overlapping report exports yield the same event more than once. Rows equal
//! by an equality checker are folded with a merger as they are added.

use std::fmt;
use tracing::warn;

/// What to do when two duplicate rows cannot be merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail with the merge error.
    #[default]
    Strict,
    /// Log a warning and keep both rows.
    KeepBoth,
}

impl DuplicatePolicy {
    /// Maps a `strict` configuration flag to a policy.
    #[must_use]
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::KeepBoth }
    }
}

/// Adds `element` to `rows`, merging it with an existing duplicate.
///
/// The first row equal to `element` by `equality` is replaced in place by
/// `merger(existing, element)`; the existing row is the merger's first operand.
/// Without a duplicate, `element` is appended.
///
/// # Errors
///
/// Returns the merger's error. `rows` is left unchanged in that case.
pub fn add_with_equality_checker<E, Q, M, Err>(
    element: E,
    rows: &mut Vec<E>,
    equality: Q,
    merger: M,
) -> Result<(), Err>
where
    Q: Fn(&E, &E) -> bool,
    M: Fn(&E, &E) -> Result<Vec<E>, Err>,
{
    match rows.iter().position(|existing| equality(existing, &element)) {
        Some(index) => {
            let merged = merger(&rows[index], &element)?;
            rows.splice(index..=index, merged);
        }
        None => rows.push(element),
    }
    Ok(())
}

/// Collects rows, folding duplicates according to `policy`.
///
/// # Errors
///
/// Under [`DuplicatePolicy::Strict`], returns the first merge error.
pub fn collect_without_duplicates<I, E, Q, M, Err>(
    rows: I,
    policy: DuplicatePolicy,
    equality: Q,
    merger: M,
) -> Result<Vec<E>, Err>
where
    I: IntoIterator<Item = E>,
    E: Clone,
    Q: Fn(&E, &E) -> bool,
    M: Fn(&E, &E) -> Result<Vec<E>, Err>,
    Err: fmt::Display,
{
    let mut collected = Vec::new();
    for row in rows {
        match policy {
            DuplicatePolicy::Strict => {
                add_with_equality_checker(row, &mut collected, &equality, &merger)?;
            }
            DuplicatePolicy::KeepBoth => {
                if let Err(err) =
                    add_with_equality_checker(row.clone(), &mut collected, &equality, &merger)
                {
                    warn!(error = %err, "Keeping duplicate rows that cannot be merged");
                    collected.push(row);
                }
            }
        }
    }
    Ok(collected)
}

//! Pluralization helpers for log output.

/// Return "s" suffix for plural counts
///
/// # Examples
///
/// - `plural_s(0)` -> `"s"` (0 notes)
/// - `plural_s(1)` -> `""` (1 note)
/// - `plural_s(5)` -> `"s"` (5 notes)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// # Examples
///
/// - `plural_count(0, "note")` -> `"0 notes"`
/// - `plural_count(1, "note")` -> `"1 note"`
/// - `plural_count(5, "note")` -> `"5 notes"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

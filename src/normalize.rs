//! Category key normalization for the emitted mapping.
//!
//! Hosts often want the labels dictionary keyed the way their own data
//! model is: `"Person Name"` and `"PersonName"` both become
//! `"person_name"`. Normalization applies only to the emitted copy — the
//! store keeps the display names the user typed.

use crate::store::LabelMap;

/// Convert a display name to `lowercase_with_underscores`.
///
/// The rule: break before each internal ASCII uppercase letter, trim,
/// replace the word gaps with underscores, lowercase. Runs of spaces in the
/// original name produce matching runs of underscores — the transform is
/// intentionally dumb so the host can invert it by eye.
///
/// ## Example
///
/// ```rust
/// use spanmark::snake_case;
///
/// assert_eq!(snake_case("PersonName"), "person_name");
/// assert_eq!(snake_case("person name"), "person_name");
/// assert_eq!(snake_case("date"), "date");
/// ```
#[must_use]
pub fn snake_case(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 8);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }
    spaced
        .trim()
        .split(' ')
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Rewrite every key of the mapping with [`snake_case`], when enabled.
///
/// Disabled, this is a plain clone. The input is never mutated either way;
/// the store emits a normalized copy and keeps its own keys.
#[must_use]
pub fn normalize_keys(labels: &LabelMap, enabled: bool) -> LabelMap {
    if !enabled {
        return labels.clone();
    }
    labels
        .iter()
        .map(|(key, spans)| (snake_case(key), spans.clone()))
        .collect()
}

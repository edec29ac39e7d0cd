//! Risk-action tag resolution.

/// Closed tag -> display-text table for risk actions.
const ACTION_LABELS: &[(&str, &str)] = &[
    ("trim_to_50", "Trim total position to 50% and wait"),
    ("cut_to_0_30", "Cut position to 0-30%, re-evaluate"),
];

/// Fallback label for tags missing from the table.
pub const GENERIC_ACTION_LABEL: &str = "Risk action";

/// Resolve a risk-action tag to its display text.
/// Unknown tags fall back to [`GENERIC_ACTION_LABEL`].
pub fn action_label(tag: &str) -> &'static str {
    ACTION_LABELS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, label)| *label)
        .unwrap_or(GENERIC_ACTION_LABEL)
}

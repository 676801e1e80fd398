//! Deterministic phase-to-color assignment.

use indexmap::IndexMap;

/// Display palette, cycled when phases outnumber entries.
///
/// The Set1 qualitative palette, matching the dashboard's dark theme.
pub const PHASE_PALETTE: [&str; 9] = [
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];

/// Color used for phases that never received a palette slot (e.g. a phase
/// that only ever appears as a dangling bucket tail and so is never
/// discovered by aggregation).
pub const FALLBACK_COLOR: &str = "blue";

/// Map each phase to `palette[position % palette_len]`.
///
/// Deterministic given the iteration order of `phases`; callers pass the
/// aggregation's first-seen order, which fixes the slot each phase gets.
pub fn assign_colors<'a>(
    phases: impl IntoIterator<Item = &'a str>,
    palette: &[&str],
) -> IndexMap<String, String> {
    phases
        .into_iter()
        .enumerate()
        .map(|(i, phase)| (phase.to_string(), palette[i % palette.len()].to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Scoring module - line points, level and gravity speed
//!
//! Rules are flat: every cleared row is worth the same, regardless of how many
//! rows a single clearing event removes or what level it happens on.

use crate::types::{LINES_PER_LEVEL, POINTS_PER_LINE};

/// Points for one clearing event that removed `rows` rows.
pub fn line_clear_points(rows: usize) -> u32 {
    (rows as u32).saturating_mul(POINTS_PER_LINE)
}

/// Level for a total of `lines` cleared rows. Starts at 1.
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity interval in milliseconds for `level`.
///
/// `max(min_ms, base_ms - (level - 1) * step_ms)`; never increases with level.
pub fn drop_interval_ms(level: u32, base_ms: u32, step_ms: u32, min_ms: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(step_ms);
    base_ms.saturating_sub(reduction).max(min_ms)
}

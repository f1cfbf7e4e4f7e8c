//! Scroll offset arithmetic for the virtualized list.

use std::ops::Range;

/// Largest valid offset for `total` items shown `capacity` at a time.
pub fn max_offset(total: usize, capacity: usize) -> usize {
    total.saturating_sub(capacity)
}

/// Clamp a requested offset into `[0, max(0, total - capacity)]`.
///
/// `requested` is signed so callers can pass `offset - page` directly.
pub fn clamp_offset(requested: isize, total: usize, capacity: usize) -> usize {
    let requested = usize::try_from(requested).unwrap_or(0);
    requested.min(max_offset(total, capacity))
}

/// Indices of the filtered list that are on screen.
pub fn visible_range(offset: usize, total: usize, capacity: usize) -> Range<usize> {
    let start = offset.min(total);
    start..offset.saturating_add(capacity).min(total)
}

/// Offset moved by `delta` rows, clamped.
pub fn scrolled(offset: usize, delta: isize, total: usize, capacity: usize) -> usize {
    let offset = isize::try_from(offset).unwrap_or(isize::MAX);
    clamp_offset(offset.saturating_add(delta), total, capacity)
}

//! Scrollbar thumb geometry and drag-to-offset mapping.
//!
//! All positions are in the same unit as [`Geometry`](super::Geometry):
//! pixels on the desktop layout, cells in the terminal.

use serde::{Deserialize, Serialize};

use super::viewport::{clamp_offset, max_offset};

/// Thumb placement relative to the top of the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumb {
    pub top: i32,
    pub height: i32,
}

/// An in-progress drag. Exists only between press and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    /// Distance from the thumb top to the pointer when the drag began.
    pub anchor: i32,
    /// Offset when the drag began.
    pub start_offset: usize,
}

/// Inputs shared by every thumb computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    /// Absolute y of the track top.
    pub top: i32,
    pub height: i32,
    pub min_thumb: i32,
}

impl Track {
    pub fn new(top: i32, height: i32, min_thumb: i32) -> Self {
        Self {
            top,
            height,
            min_thumb,
        }
    }
}

/// `min(track, max(min_thumb, track * capacity / total))`.
pub fn thumb_height(track: &Track, capacity: usize, total: usize) -> i32 {
    let track_height = track.height.max(0);
    if total == 0 {
        return track_height;
    }
    let proportional = i64::from(track_height) * capacity as i64 / total as i64;
    let proportional = i32::try_from(proportional).unwrap_or(track_height);
    proportional.max(track.min_thumb).min(track_height)
}

/// `(track - thumb) * offset / max(1, total - capacity)`.
pub fn thumb_top(track: &Track, offset: usize, capacity: usize, total: usize) -> i32 {
    let span = i64::from(track.height.max(0) - thumb_height(track, capacity, total));
    let denom = max_offset(total, capacity).max(1) as i64;
    let offset = offset.min(max_offset(total, capacity)) as i64;
    i32::try_from(span * offset / denom).unwrap_or(0)
}

/// Thumb geometry, or `None` when everything fits and no scrollbar is shown.
pub fn thumb(track: &Track, offset: usize, capacity: usize, total: usize) -> Option<Thumb> {
    if total <= capacity {
        return None;
    }
    Some(Thumb {
        top: thumb_top(track, offset, capacity, total),
        height: thumb_height(track, capacity, total),
    })
}

/// Begin a drag for a press at `pointer_y`.
///
/// Returns `None` when the list fits and there is nothing to scroll.
pub fn start_drag(
    pointer_y: i32,
    track: &Track,
    offset: usize,
    capacity: usize,
    total: usize,
) -> Option<DragState> {
    let thumb = thumb(track, offset, capacity, total)?;
    Some(DragState {
        anchor: pointer_y - (track.top + thumb.top),
        start_offset: offset,
    })
}

/// Offset for the pointer at `pointer_y` while dragging.
///
/// Inverts [`thumb_top`], rounding to the nearest row, then clamps.
pub fn drag_to_offset(
    pointer_y: i32,
    drag: &DragState,
    track: &Track,
    capacity: usize,
    total: usize,
) -> usize {
    let max = max_offset(total, capacity);
    let span = i64::from(track.height.max(0) - thumb_height(track, capacity, total));
    if max == 0 {
        return 0;
    }
    if span <= 0 {
        return clamp_offset(drag.start_offset as isize, total, capacity);
    }

    let rel = i64::from(pointer_y) - i64::from(track.top) - i64::from(drag.anchor);
    if rel <= 0 {
        return 0;
    }
    let max = max as i64;
    let nearest = (rel * max + span / 2) / span;
    clamp_offset(isize::try_from(nearest).unwrap_or(isize::MAX), total, capacity)
}

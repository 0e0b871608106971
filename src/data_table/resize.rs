//! Column resize session
//!
//! A drag on a column edge is modeled as a session that mutably borrows the
//! width table for as long as the pointer is held. Dropping the session ends
//! the drag on every exit path, including an abandoned drag.

use ahash::AHashMap;
use tracing::debug;

/// An in-progress column resize
pub struct ResizeSession<'a> {
    widths: &'a mut AHashMap<String, f32>,
    column: String,
    start_x: f32,
    start_width: f32,
    min_width: f32,
    ended: bool,
}

impl<'a> ResizeSession<'a> {
    pub(crate) fn begin(
        widths: &'a mut AHashMap<String, f32>,
        column: String,
        start_x: f32,
        start_width: f32,
        min_width: f32,
    ) -> Self {
        debug!(column = %column, start_x, start_width, "Resize session started");
        Self {
            widths,
            column,
            start_x,
            start_width,
            min_width,
            ended: false,
        }
    }

    /// Column being resized
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Width at the moment the drag started
    pub fn start_width(&self) -> f32 {
        self.start_width
    }

    /// Current width
    pub fn width(&self) -> f32 {
        self.widths
            .get(&self.column)
            .copied()
            .unwrap_or(self.start_width)
    }

    /// Pointer moved to `x`; returns the applied width
    pub fn drag_to(&mut self, x: f32) -> f32 {
        let width = (self.start_width + (x - self.start_x)).max(self.min_width);
        self.widths.insert(self.column.clone(), width);
        width
    }

    /// Pointer released; keeps the current width
    pub fn finish(mut self) -> f32 {
        self.ended = true;
        let width = self.width();
        debug!(column = %self.column, width, "Resize session finished");
        width
    }

    /// Abort the drag and restore the original width
    pub fn cancel(mut self) {
        self.ended = true;
        self.widths.insert(self.column.clone(), self.start_width);
        debug!(column = %self.column, "Resize session cancelled");
    }
}

impl Drop for ResizeSession<'_> {
    fn drop(&mut self) {
        if !self.ended {
            // Pointer left the window mid-drag: keep the last applied width
            debug!(column = %self.column, width = self.width(), "Resize session released");
        }
    }
}

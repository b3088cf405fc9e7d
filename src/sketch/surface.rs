use crate::sketch::history::SnapshotHistory;
use crate::sketch::raster::{Raster, Rgba};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub width: f32,
    pub color: Rgba,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            width: 15.0,
            color: Rgba::WHITE,
        }
    }
}

/// The drawing surface: a raster, its snapshot history, and the stroke that
/// is currently in progress.
///
/// All points are surface-local pixel coordinates; the view layer converts
/// from screen space before calling in. Stroke handlers run synchronously and
/// never block.
#[derive(Debug, Clone, PartialEq)]
pub struct SketchSurface {
    raster: Raster,
    history: SnapshotHistory,
    brush: Brush,
    last_point: Option<(f32, f32)>,
    revision: u64,
}

impl SketchSurface {
    pub fn new(width: u32, height: u32, brush: Brush) -> Self {
        let raster = Raster::new(width, height);
        let history = SnapshotHistory::new(raster.clone());
        Self {
            raster,
            history,
            brush,
            last_point: None,
            revision: 0,
        }
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn is_empty(&self) -> bool {
        self.raster.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn stroke_active(&self) -> bool {
        self.last_point.is_some()
    }

    /// Counter bumped on every pixel mutation. The view re-uploads its
    /// texture only when this moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Open a stroke and stamp its first dot. Silently does nothing when the
    /// surface has no area, mirroring events that race in before the canvas
    /// is sized.
    pub fn begin_stroke(&mut self, point: (f32, f32)) {
        if !self.raster.has_area() {
            return;
        }
        self.raster
            .stamp_circle(point, self.brush.width / 2.0, self.brush.color);
        self.last_point = Some(point);
        self.revision += 1;
    }

    /// Extend the active stroke to `point`. No-op when no stroke is active.
    pub fn extend_stroke(&mut self, point: (f32, f32)) {
        let Some(last) = self.last_point else {
            return;
        };
        self.raster
            .stroke_line(last, point, self.brush.width, self.brush.color);
        self.last_point = Some(point);
        self.revision += 1;
    }

    /// Close the active stroke and commit a snapshot. Returns `true` when
    /// history gained an entry (the raster changed since the cursor entry).
    pub fn end_stroke(&mut self) -> bool {
        if self.last_point.take().is_none() {
            return false;
        }
        self.history.commit(self.raster.clone())
    }

    pub fn undo(&mut self) {
        if let Some(entry) = self.history.undo() {
            self.raster = entry.clone();
            self.revision += 1;
        }
    }

    pub fn redo(&mut self) {
        if let Some(entry) = self.history.redo() {
            self.raster = entry.clone();
            self.revision += 1;
        }
    }

    /// Blank the raster and collapse history to a single blank entry.
    pub fn clear(&mut self) {
        self.last_point = None;
        self.raster.clear();
        self.history.reset(self.raster.clone());
        self.revision += 1;
    }
}

use crate::sketch::raster::Raster;

/// Undo/redo history kept as full raster snapshots plus a cursor.
///
/// `entries[cursor]` is always the state currently painted on the canvas, so
/// the cursor stays within `0..entries.len()` at all times. Truncation on a
/// new commit after an undo is the only structural mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHistory {
    entries: Vec<Raster>,
    cursor: usize,
}

impl SnapshotHistory {
    pub fn new(initial: Raster) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &Raster {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Record a completed stroke. Returns `false` when the snapshot matches
    /// the current entry (a click without movement over identical pixels),
    /// leaving history untouched. Otherwise any redo tail is discarded and
    /// the cursor moves to the new entry.
    pub fn commit(&mut self, snapshot: Raster) -> bool {
        if snapshot == self.entries[self.cursor] {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;
        true
    }

    pub fn undo(&mut self) -> Option<&Raster> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    pub fn redo(&mut self) -> Option<&Raster> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Collapse history back to a single blank entry.
    pub fn reset(&mut self, blank: Raster) {
        self.entries.clear();
        self.entries.push(blank);
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketch::raster::Rgba;

    fn stamped(width: u32, height: u32, x: f32, y: f32) -> Raster {
        let mut raster = Raster::new(width, height);
        raster.stamp_circle((x, y), 2.0, Rgba::WHITE);
        raster
    }

    #[test]
    fn duplicate_commit_is_skipped() {
        let mut history = SnapshotHistory::new(Raster::new(8, 8));
        let snapshot = stamped(8, 8, 4.0, 4.0);
        assert!(history.commit(snapshot.clone()));
        assert!(!history.commit(snapshot));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn commit_after_undo_truncates_redo_tail() {
        let mut history = SnapshotHistory::new(Raster::new(8, 8));
        history.commit(stamped(8, 8, 2.0, 2.0));
        history.commit(stamped(8, 8, 5.0, 5.0));
        assert!(history.undo().is_some());
        assert!(history.can_redo());

        history.commit(stamped(8, 8, 6.0, 2.0));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn undo_at_origin_and_redo_at_tail_are_noops() {
        let mut history = SnapshotHistory::new(Raster::new(8, 8));
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn reset_collapses_to_single_blank_entry() {
        let mut history = SnapshotHistory::new(Raster::new(8, 8));
        history.commit(stamped(8, 8, 3.0, 3.0));
        history.commit(stamped(8, 8, 6.0, 6.0));
        history.reset(Raster::new(8, 8));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(history.current().is_empty());
    }
}

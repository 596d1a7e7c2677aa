use egui::Color32;
use std::fmt;
use std::sync::Arc;

/// How many snapshots the buffer keeps before evicting the oldest.
pub const DEFAULT_CAPACITY: usize = 10;

/// An immutable full-canvas pixel capture taken at one instant.
///
/// Cloning is cheap: the pixel data is shared behind an `Arc` and never
/// mutated after capture.
#[derive(Clone, PartialEq)]
pub struct Snapshot {
    size: [usize; 2],
    pixels: Arc<[Color32]>,
}

impl Snapshot {
    pub(crate) fn new(size: [usize; 2], pixels: Arc<[Color32]>) -> Self {
        debug_assert_eq!(size[0] * size[1], pixels.len());
        Self { size, pixels }
    }

    pub fn size(&self) -> [usize; 2] {
        self.size
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }
}

// The pixel buffer is large; keep assertion output readable.
impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Bounded, linear undo/redo log of full-canvas snapshots.
///
/// The cursor always points at the currently-displayed snapshot. Pushing
/// while the cursor is not at the end discards the abandoned redo branch;
/// pushing past capacity evicts the oldest snapshot and shifts the cursor
/// down so it keeps referring to the same logical entry.
pub struct SnapshotHistory {
    snapshots: Vec<Snapshot>,
    cursor: usize,
    capacity: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be at least 1");
        Self {
            snapshots: Vec::new(),
            cursor: 0,
            capacity,
        }
    }

    /// Append a snapshot and make it current.
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.cursor + 1 < self.snapshots.len() {
            self.snapshots.truncate(self.cursor + 1);
        }
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;

        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(0);
            self.cursor -= 1;
        }
    }

    /// Step back and return the snapshot now current, or `None` at the
    /// start of history.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.snapshots[self.cursor].clone())
    }

    /// Step forward and return the snapshot now current, or `None` at the
    /// end of history.
    pub fn redo(&mut self) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.snapshots[self.cursor].clone())
    }

    /// The snapshot at the cursor. This is the rubber-band preview base
    /// during shape drags.
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_asserts_print_compactly() {
        let snapshot = Snapshot::new([2, 2], vec![Color32::WHITE; 4].into());
        let debug = format!("{snapshot:?}");
        assert!(debug.contains("size: [2, 2]"));
        assert!(!debug.contains("pixels"), "pixel dump would drown assertion diffs");
    }
}

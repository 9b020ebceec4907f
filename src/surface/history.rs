use std::num::NonZeroUsize;

use super::frame::Snapshot;

/// Linear undo/redo history over full-frame snapshots.
///
/// Never empty: index 0 holds the initial (or oldest retained) state and
/// `cursor` always points at the snapshot currently on screen.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: usize,
    limit: Option<NonZeroUsize>,
}

impl History {
    pub fn new(initial: Snapshot, limit: Option<NonZeroUsize>) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            limit,
        }
    }

    /// Record a new state, dropping everything after the cursor.
    pub fn commit(&mut self, snapshot: Snapshot) {
        let discarded = self.snapshots.len() - (self.cursor + 1);
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;

        if let Some(limit) = self.limit {
            let overflow = self.snapshots.len().saturating_sub(limit.get());
            if overflow > 0 {
                self.snapshots.drain(..overflow);
                self.cursor -= overflow;
            }
        }

        if discarded > 0 {
            log::debug!("Discarded {} redo snapshot(s)", discarded);
        }
    }

    /// Step back one snapshot, returning the one now current
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Step forward one snapshot, returning the one now current
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> Option<NonZeroUsize> {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::frame::Frame;
    use egui::{pos2, Color32};

    fn snapshots(count: usize) -> Vec<Snapshot> {
        let mut frame = Frame::new(8, 8, Color32::WHITE).unwrap();
        (0..count)
            .map(|i| {
                frame.stamp_dot(pos2(i as f32, 0.5), 1.0, Color32::BLACK);
                frame.snapshot()
            })
            .collect()
    }

    #[test]
    fn test_commit_advances_cursor() {
        let mut shots = snapshots(4).into_iter();
        let mut history = History::new(shots.next().unwrap(), None);
        for shot in shots {
            history.commit(shot);
        }
        assert_eq!(history.len(), 4);
        assert_eq!(history.cursor(), 3);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_truncates_redo_branch() {
        let shots = snapshots(4);
        let mut history = History::new(shots[0].clone(), None);
        history.commit(shots[1].clone());
        history.commit(shots[2].clone());
        history.undo();
        history.undo();
        history.commit(shots[3].clone());

        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
        assert!(history.current().same_pixels(&shots[3]));
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_undo_redo_bounds_are_no_ops() {
        let shots = snapshots(2);
        let mut history = History::new(shots[0].clone(), None);
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), 0);

        history.commit(shots[1].clone());
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let shots = snapshots(5);
        let mut history = History::new(shots[0].clone(), NonZeroUsize::new(3));
        for shot in &shots[1..] {
            history.commit(shot.clone());
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);

        history.undo();
        history.undo();
        assert!(!history.can_undo());
        assert!(history.current().same_pixels(&shots[2]));
    }
}

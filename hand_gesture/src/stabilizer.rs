//! Temporal smoothing of raw per-frame labels.
//!
//! Raw classifications flicker.  The [`Stabilizer`] keeps the last few labels
//! in a [`GestureHistory`], takes a strict majority, and reports a label only
//! when the majority changes.

use std::collections::VecDeque;

use log::trace;

use crate::classifier::GestureKind;

// ════════════════════════════════════════════════════════════════════════════
// GestureHistory
// ════════════════════════════════════════════════════════════════════════════

/// Fixed-capacity window of raw labels, oldest first.
#[derive(Clone, Debug)]
pub struct GestureHistory {
    labels:   VecDeque<GestureKind>,
    capacity: usize,
}

impl GestureHistory {
    /// A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        GestureHistory { labels: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, label: GestureKind) {
        if self.labels.len() == self.capacity {
            self.labels.pop_front();
        }
        self.labels.push_back(label);
    }

    pub fn len(&self) -> usize { self.labels.len() }

    pub fn is_empty(&self) -> bool { self.labels.is_empty() }

    pub fn capacity(&self) -> usize { self.capacity }

    pub fn iter(&self) -> impl Iterator<Item = GestureKind> + '_ {
        self.labels.iter().copied()
    }

    pub fn clear(&mut self) { self.labels.clear(); }

    /// The label with the highest count.  Ties go to the label that first
    /// appears scanning oldest to newest.  `None` when the window is empty.
    pub fn majority(&self) -> Option<GestureKind> {
        // At most six distinct labels; a small vec keeps first-seen order.
        let mut counts: Vec<(GestureKind, usize)> = Vec::with_capacity(6);
        for label in self.iter() {
            match counts.iter_mut().find(|(k, _)| *k == label) {
                Some((_, n)) => *n += 1,
                None         => counts.push((label, 1)),
            }
        }

        let mut best: Option<(GestureKind, usize)> = None;
        for (kind, n) in counts {
            if best.map_or(true, |(_, m)| n > m) {
                best = Some((kind, n));
            }
        }
        best.map(|(kind, _)| kind)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Stabilizer
// ════════════════════════════════════════════════════════════════════════════

/// Majority vote plus change detection.
#[derive(Clone, Debug)]
pub struct Stabilizer {
    history: GestureHistory,
    emitted: GestureKind,
}

impl Stabilizer {
    pub fn new(history_len: usize) -> Self {
        Stabilizer { history: GestureHistory::new(history_len), emitted: GestureKind::None }
    }

    /// Record a raw label.  Returns the new stable label if it changed.
    pub fn push(&mut self, raw: GestureKind) -> Option<GestureKind> {
        self.history.push(raw);
        let stable = self.history.majority().unwrap_or(GestureKind::None);
        self.transition(stable)
    }

    /// The hand left the frame.  The label drops to `none` without touching
    /// the history; returns `Some(None)` if that is a change.
    pub fn hand_lost(&mut self) -> Option<GestureKind> {
        self.transition(GestureKind::None)
    }

    /// Last emitted stable label.
    pub fn current(&self) -> GestureKind { self.emitted }

    pub fn history(&self) -> &GestureHistory { &self.history }

    /// Forget everything.
    pub fn reset(&mut self) {
        self.history.clear();
        self.emitted = GestureKind::None;
    }

    fn transition(&mut self, stable: GestureKind) -> Option<GestureKind> {
        if stable == self.emitted {
            return None;
        }
        trace!("stable gesture {} -> {}", self.emitted, stable);
        self.emitted = stable;
        Some(stable)
    }
}

//! Oscillation detection over a short position history.
//!
//! An agent bouncing between the same two or three tiles is making no
//! progress no matter what the greedy mover says.  The detector watches the
//! last few positions; when the distinct count collapses the agent is flagged
//! stuck, which flips the movement strategy over to the planner until the
//! agent escapes its recent neighborhood (or enough ticks pass).

use gm_core::{GridPos, NavConfig, Tick};

// ── PositionRing ──────────────────────────────────────────────────────────────

/// Fixed-capacity ring buffer of recently visited positions.
#[derive(Clone, Debug)]
pub struct PositionRing {
    slots: Vec<GridPos>,
    head: usize,
    len: usize,
}

impl PositionRing {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0);
        Self {
            slots: vec![GridPos::default(); capacity],
            head: 0,
            len: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `true` once the window holds `capacity` samples.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Record a position, overwriting the oldest sample when full.
    pub fn push(&mut self, pos: GridPos) {
        self.slots[self.head] = pos;
        self.head = (self.head + 1) % self.slots.len();
        self.len = (self.len + 1).min(self.slots.len());
    }

    /// `true` if `pos` is among the recorded samples.
    pub fn contains(&self, pos: GridPos) -> bool {
        self.iter().any(|p| p == pos)
    }

    /// Number of distinct positions currently recorded.  The window is tiny
    /// (6 by default) so the quadratic scan beats any hashing.
    pub fn distinct(&self) -> usize {
        let mut count = 0;
        for (i, p) in self.iter().enumerate() {
            if !self.iter().take(i).any(|q| q == p) {
                count += 1;
            }
        }
        count
    }

    /// Samples oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = GridPos> + '_ {
        let cap = self.slots.len();
        let start = (self.head + cap - self.len) % cap;
        (0..self.len).map(move |i| self.slots[(start + i) % cap])
    }

    /// The most recently recorded position.
    pub fn last(&self) -> Option<GridPos> {
        if self.len == 0 {
            return None;
        }
        let cap = self.slots.len();
        Some(self.slots[(self.head + cap - 1) % cap])
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}

// ── StuckState / StuckDetector ────────────────────────────────────────────────

/// Per-agent stuck flag with the tick it was raised.
#[derive(Copy, Clone, Debug, Default)]
pub struct StuckState {
    flagged_at: Option<Tick>,
}

impl StuckState {
    #[inline]
    pub fn is_stuck(&self) -> bool {
        self.flagged_at.is_some()
    }

    pub fn clear(&mut self) {
        self.flagged_at = None;
    }
}

/// Shared detection parameters (one per engine; state lives per agent).
#[derive(Copy, Clone, Debug)]
pub struct StuckDetector {
    window: usize,
    distinct_max: usize,
    relief_ticks: u64,
}

impl StuckDetector {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            window: config.stuck_window,
            distinct_max: config.stuck_distinct_max,
            relief_ticks: config.stuck_relief_ticks,
        }
    }

    #[inline]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Record this tick's position and update the stuck flag.
    ///
    /// Raising: the window is full and holds at most `distinct_max` distinct
    /// positions.  Clearing: the agent reaches a position outside the recent
    /// set, or `relief_ticks` have elapsed since the flag was raised.  Either
    /// clear also resets the window, so detection restarts from a fresh
    /// history instead of re-flagging off the old samples next tick.
    pub fn observe(&self, ring: &mut PositionRing, state: &mut StuckState, pos: GridPos, now: Tick) {
        if let Some(raised) = state.flagged_at {
            let escaped = !ring.contains(pos);
            let relieved = now.since(raised) >= self.relief_ticks;
            if escaped || relieved {
                state.clear();
                ring.clear();
            }
        }

        ring.push(pos);

        if state.flagged_at.is_none()
            && ring.is_full()
            && ring.distinct() <= self.distinct_max
        {
            state.flagged_at = Some(now);
        }
    }
}

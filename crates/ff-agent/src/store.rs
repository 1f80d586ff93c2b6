//! `WorkerStore` — per-worker state as parallel arrays indexed by `WorkerId`.

use serde::Serialize;

use ff_core::{HealthStatus, Pos, WorkerId};

// ── HealthCounts ──────────────────────────────────────────────────────────────

/// Population tallies by health status.  Workers dropped from the roster are
/// not counted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HealthCounts {
    pub healthy:   usize,
    pub infected:  usize,
    pub recovered: usize,
    pub dead:      usize,
}

impl HealthCounts {
    pub fn total(&self) -> usize {
        self.healthy + self.infected + self.recovered + self.dead
    }

    fn bump(&mut self, status: HealthStatus) {
        match status {
            HealthStatus::Healthy => self.healthy += 1,
            HealthStatus::Infected => self.infected += 1,
            HealthStatus::Recovered => self.recovered += 1,
            HealthStatus::Dead => self.dead += 1,
        }
    }
}

// ── WorkerStore ───────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all worker state.
///
/// Every `Vec` field has exactly `count` elements; `WorkerId` is the index:
///
/// ```ignore
/// let status = store.health[worker.index()];
/// ```
///
/// A worker is *active* (moves, infects, is eligible for testing and shift
/// reassignment) when it is on the roster, not quarantined and not dead.
pub struct WorkerStore {
    /// Number of workers.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Disease state ─────────────────────────────────────────────────────
    pub health: Vec<HealthStatus>,

    /// Steps spent in the current infected or recovered phase.
    pub infection_time: Vec<u32>,

    /// Set on first infection and never cleared.
    pub had_covid: Vec<bool>,

    // ── Placement state ───────────────────────────────────────────────────
    pub quarantined: Vec<bool>,

    /// `false` once a worker could not be placed during redistribution or a
    /// shift change.  Such a worker stays off the grid for the rest of the
    /// run and is excluded from counts and productivity.
    pub on_roster: Vec<bool>,

    /// Current section index.
    pub section: Vec<usize>,

    /// Shift anchor: movement happens in the 3×3 block around it.
    pub base_position: Vec<Pos>,

    // ── Production ────────────────────────────────────────────────────────
    /// Fixed at creation.
    pub base_production: Vec<f64>,

    /// Recomputed every step.
    pub current_production: Vec<f64>,
}

impl WorkerStore {
    pub(crate) fn new(count: usize, base_production: Vec<f64>) -> Self {
        debug_assert_eq!(base_production.len(), count);
        Self {
            count,
            health: vec![HealthStatus::Healthy; count],
            infection_time: vec![0; count],
            had_covid: vec![false; count],
            quarantined: vec![false; count],
            on_roster: vec![true; count],
            section: vec![0; count],
            base_position: vec![Pos::new(0, 0); count],
            current_production: base_production.clone(),
            base_production,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `WorkerId`s in ascending index order.
    pub fn worker_ids(&self) -> impl Iterator<Item = WorkerId> + '_ {
        (0..self.count as u32).map(WorkerId)
    }

    // ── State queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn status(&self, worker: WorkerId) -> HealthStatus {
        self.health[worker.index()]
    }

    #[inline]
    pub fn is_dead(&self, worker: WorkerId) -> bool {
        self.health[worker.index()].is_dead()
    }

    #[inline]
    pub fn is_quarantined(&self, worker: WorkerId) -> bool {
        self.quarantined[worker.index()]
    }

    #[inline]
    pub fn is_on_roster(&self, worker: WorkerId) -> bool {
        self.on_roster[worker.index()]
    }

    /// On the roster, not quarantined, not dead.
    #[inline]
    pub fn is_active(&self, worker: WorkerId) -> bool {
        let i = worker.index();
        self.on_roster[i] && !self.quarantined[i] && !self.health[i].is_dead()
    }

    /// All active workers in id order.
    pub fn active_ids(&self) -> Vec<WorkerId> {
        self.worker_ids().filter(|&w| self.is_active(w)).collect()
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Healthy → Infected.  Resets the phase timer and marks `had_covid`.
    pub fn infect(&mut self, worker: WorkerId) {
        let i = worker.index();
        self.health[i] = HealthStatus::Infected;
        self.infection_time[i] = 0;
        self.had_covid[i] = true;
    }

    /// Absorbing: production drops to zero permanently.
    pub fn kill(&mut self, worker: WorkerId) {
        let i = worker.index();
        self.health[i] = HealthStatus::Dead;
        self.current_production[i] = 0.0;
    }

    /// Take a worker off the roster for the rest of the run.
    pub fn drop_from_roster(&mut self, worker: WorkerId) {
        let i = worker.index();
        self.on_roster[i] = false;
        self.current_production[i] = 0.0;
    }

    // ── Aggregates ────────────────────────────────────────────────────────

    pub fn health_counts(&self) -> HealthCounts {
        let mut counts = HealthCounts::default();
        for i in 0..self.count {
            if self.on_roster[i] {
                counts.bump(self.health[i]);
            }
        }
        counts
    }

    pub fn count_status(&self, status: HealthStatus) -> usize {
        (0..self.count).filter(|&i| self.on_roster[i] && self.health[i] == status).count()
    }

    pub fn quarantined_count(&self) -> usize {
        self.quarantined.iter().filter(|&&q| q).count()
    }

    /// Roster workers that can still work (i.e. not dead).
    pub fn living_roster_count(&self) -> usize {
        (0..self.count).filter(|&i| self.on_roster[i] && !self.health[i].is_dead()).count()
    }

    /// Sum of `current_production` over the roster.
    pub fn total_production(&self) -> f64 {
        (0..self.count)
            .filter(|&i| self.on_roster[i])
            .map(|i| self.current_production[i])
            .sum()
    }
}

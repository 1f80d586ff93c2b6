//! `QuarantineManager` — isolation of flagged workers off the grid.
//!
//! # Entry
//!
//! A worker enters through [`QuarantineManager::quarantine`] (normally a
//! positive test) or, during [`process`](QuarantineManager::process), when it
//! has been infected for more than `legacy_threshold` steps.  It is removed
//! from the grid and the column and section it left are remembered.
//!
//! # Release
//!
//! ```text
//! status == Recovered                       → release
//! status == Healthy  and dwell ≥ min_steps  → release
//! dwell ≥ max_steps                         → release (failsafe)
//! status == Dead                            → leave the zone, never placed
//! ```
//!
//! A released worker gets a free cell inside its remembered section (bounded
//! retries).  On exhaustion it falls back to `(section start, 0)` with a
//! warning.  The release cell becomes its new shift anchor.

use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use ff_behavior::Floor;
use ff_core::{HealthStatus, Pos, WorkerId};
use ff_spatial::{search_position, SectionPartitioner};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuarantineParams {
    /// Minimum dwell before a healthy worker is released.
    pub min_steps: u32,

    /// Unconditional release after this many steps.
    pub max_steps: u32,

    /// Infected for longer than this ⇒ quarantined without a test.
    pub legacy_threshold: u32,

    /// Random cells tried when returning a worker to its section.
    pub release_attempts: usize,
}

impl Default for QuarantineParams {
    fn default() -> Self {
        Self {
            min_steps:        40,
            max_steps:        80,
            legacy_threshold: 1000,
            release_attempts: 40,
        }
    }
}

#[derive(Clone, Debug)]
struct Stay {
    steps:        u32,
    last_section: usize,
    last_column:  u32,
}

/// Result of one [`QuarantineManager::process`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuarantineReport {
    /// Workers sent in by the legacy infection-time rule.
    pub entered:   Vec<WorkerId>,
    pub released:  Vec<(WorkerId, Pos)>,
    /// Released workers that got the fallback coordinate.
    pub fallbacks: Vec<WorkerId>,
    /// Workers that died while quarantined.
    pub deceased:  Vec<WorkerId>,
}

pub struct QuarantineManager {
    params:        QuarantineParams,
    zone:          Vec<WorkerId>,
    stays:         FxHashMap<WorkerId, Stay>,
    total_entries: u64,
}

impl QuarantineManager {
    pub fn new(params: QuarantineParams) -> Self {
        Self {
            params,
            zone: Vec::new(),
            stays: FxHashMap::default(),
            total_entries: 0,
        }
    }

    #[inline]
    pub fn params(&self) -> &QuarantineParams {
        &self.params
    }

    /// Workers currently isolated, in entry order.
    #[inline]
    pub fn zone(&self) -> &[WorkerId] {
        &self.zone
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.zone.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.zone.is_empty()
    }

    #[inline]
    pub fn contains(&self, worker: WorkerId) -> bool {
        self.stays.contains_key(&worker)
    }

    /// Steps `worker` has spent in the zone.
    pub fn dwell(&self, worker: WorkerId) -> Option<u32> {
        self.stays.get(&worker).map(|s| s.steps)
    }

    /// Section `worker` will be returned to.
    pub fn last_section(&self, worker: WorkerId) -> Option<usize> {
        self.stays.get(&worker).map(|s| s.last_section)
    }

    pub fn total_entries(&self) -> u64 {
        self.total_entries
    }

    /// Isolate `worker`.  Returns `false` (and does nothing) if it is already
    /// quarantined, dead, or off the roster.
    pub fn quarantine(&mut self, worker: WorkerId, floor: &mut Floor<'_>) -> bool {
        let workers = &mut *floor.workers;
        if self.contains(worker) || workers.is_quarantined(worker) || workers.is_dead(worker) || !workers.is_on_roster(worker) {
            return false;
        }
        let last_column = floor
            .grid
            .remove(worker)
            .map(|pos| pos.x)
            .unwrap_or(workers.base_position[worker.index()].x);
        workers.quarantined[worker.index()] = true;
        self.stays.insert(
            worker,
            Stay {
                steps: 0,
                last_section: workers.section[worker.index()],
                last_column,
            },
        );
        self.zone.push(worker);
        self.total_entries += 1;
        debug!("{worker} quarantined ({})", workers.status(worker));
        true
    }

    /// Legacy entries, dwell timers and releases for one step.
    pub fn process(&mut self, floor: &mut Floor<'_>) -> QuarantineReport {
        let mut report = QuarantineReport::default();

        let overdue: Vec<WorkerId> = floor
            .workers
            .worker_ids()
            .filter(|&w| {
                floor.workers.is_active(w)
                    && floor.workers.status(w) == HealthStatus::Infected
                    && floor.workers.infection_time[w.index()] > self.params.legacy_threshold
            })
            .collect();
        for worker in overdue {
            if self.quarantine(worker, floor) {
                report.entered.push(worker);
            }
        }

        let zone = std::mem::take(&mut self.zone);
        for worker in zone {
            let Some(stay) = self.stays.get_mut(&worker) else { continue };
            stay.steps += 1;
            let steps = stay.steps;

            match floor.workers.status(worker) {
                HealthStatus::Dead => {
                    self.stays.remove(&worker);
                    floor.workers.quarantined[worker.index()] = false;
                    report.deceased.push(worker);
                }
                status if self.should_release(status, steps) => {
                    let (pos, fallback) = self.release(worker, floor);
                    report.released.push((worker, pos));
                    if fallback {
                        report.fallbacks.push(worker);
                    }
                }
                _ => self.zone.push(worker),
            }
        }
        report
    }

    /// Re-derive every remembered section after the partition changed.
    pub fn remap_sections(&mut self, sections: &SectionPartitioner) {
        for stay in self.stays.values_mut() {
            stay.last_section = sections.section_index(stay.last_column);
        }
    }

    fn should_release(&self, status: HealthStatus, steps: u32) -> bool {
        match status {
            HealthStatus::Recovered => true,
            HealthStatus::Healthy if steps >= self.params.min_steps => true,
            _ => steps >= self.params.max_steps,
        }
    }

    /// Put `worker` back on the grid.  Returns its cell and whether the
    /// fallback coordinate was used.
    fn release(&mut self, worker: WorkerId, floor: &mut Floor<'_>) -> (Pos, bool) {
        let last_section = self
            .stays
            .remove(&worker)
            .map(|s| s.last_section)
            .unwrap_or(0)
            .min(floor.sections.section_count() - 1);
        let height = floor.grid.height();
        let columns = floor
            .sections
            .section_bounds(last_section)
            .unwrap_or(0..floor.grid.width());

        let grid = &*floor.grid;
        let found = search_position(&columns, height, self.params.release_attempts, floor.rng, |p| {
            grid.is_cell_empty(p)
        });
        let (pos, fallback) = match found {
            Some(pos) => (pos, false),
            None => {
                let pos = Pos::new(columns.start, 0);
                warn!(
                    "no free cell for {worker} in section {last_section} after {} attempts, releasing at {pos}",
                    self.params.release_attempts
                );
                (pos, true)
            }
        };

        // `pos` is inside the section, and the worker was off the grid.
        let _ = floor.grid.place(worker, pos);
        let i = worker.index();
        floor.workers.quarantined[i] = false;
        floor.workers.base_position[i] = pos;
        floor.workers.section[i] = floor.sections.section_index(pos.x);
        debug!("{worker} released from quarantine to {pos}");
        (pos, fallback)
    }
}

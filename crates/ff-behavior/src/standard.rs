//! `StandardBehavior` — the default worker dynamics.
//!
//! # Movement
//!
//! Candidates are the cells of the 3×3 block centred on the worker's shift
//! anchor (`base_position`) that lie inside the grid and inside the worker's
//! section.  Without distancing a candidate is picked uniformly.  With
//! distancing, candidates with no other worker within Chebyshev distance 1
//! are preferred; if none exists the least crowded candidates are used.
//!
//! # Transmission
//!
//! An infected worker scans every cell within Manhattan distance `radius`
//! (non-wrapping, across section boundaries) and tries to infect each
//! healthy occupant with [`TransmissionParams::probability`].  Every success
//! raises the infection pressure of the source section and, if different,
//! the target's section.
//!
//! # Disease
//!
//! ```text
//! Infected,  time == 0   → death draw
//! Infected,  time ≥ 40   → Recovered (time reset)
//! Recovered, time ≥ 80   → Healthy   (time reset, had_covid kept)
//! ```

use std::ops::Range;

use ff_agent::WorkerStore;
use ff_core::{HealthStatus, Pos, WorkerId};
use ff_spatial::{SectionPartitioner, SpatialGrid};

use crate::params::Exposure;
use crate::{BehaviorParams, Floor, HealthTransition, StepContext, WorkerBehavior};

#[derive(Clone, Debug, Default)]
pub struct StandardBehavior {
    pub params: BehaviorParams,
}

impl StandardBehavior {
    pub fn new(params: BehaviorParams) -> Self {
        Self { params }
    }
}

impl WorkerBehavior for StandardBehavior {
    fn distancing_nudge(&self, worker: WorkerId, floor: &mut Floor<'_>, _ctx: &StepContext<'_>) {
        let Some(pos) = floor.grid.position(worker) else { return };
        if crowding(floor.grid, pos, worker) == 0 {
            return;
        }
        let columns = section_columns(floor.sections, floor.grid, floor.workers.section[worker.index()]);
        let clear: Vec<Pos> = block_around(pos, floor.grid, &columns)
            .into_iter()
            .filter(|&c| c != pos && crowding(floor.grid, c, worker) == 0)
            .collect();
        if let Some(&target) = floor.rng.choose(&clear) {
            // `target` comes from in-bounds offsets.
            let _ = floor.grid.move_to(worker, target);
        }
    }

    fn move_worker(&self, worker: WorkerId, floor: &mut Floor<'_>, ctx: &StepContext<'_>) {
        let i = worker.index();
        let columns = section_columns(floor.sections, floor.grid, floor.workers.section[i]);
        let candidates = block_around(floor.workers.base_position[i], floor.grid, &columns);
        if candidates.is_empty() {
            return;
        }

        let target = if ctx.policy.social_distancing {
            let scored: Vec<(Pos, usize)> = candidates
                .iter()
                .map(|&c| (c, crowding(floor.grid, c, worker)))
                .collect();
            let least = scored.iter().map(|&(_, n)| n).min().unwrap_or(0);
            let best: Vec<Pos> = scored.into_iter().filter(|&(_, n)| n == least).map(|(c, _)| c).collect();
            floor.rng.choose(&best).copied()
        } else {
            floor.rng.choose(&candidates).copied()
        };

        if let Some(target) = target {
            let _ = floor.grid.move_to(worker, target);
        }
    }

    fn attempt_infection(
        &self,
        worker: WorkerId,
        floor:  &mut Floor<'_>,
        ctx:    &StepContext<'_>,
    ) -> Vec<WorkerId> {
        let mut infected = Vec::new();
        if floor.workers.status(worker) != HealthStatus::Infected {
            return infected;
        }
        let Some(pos) = floor.grid.position(worker) else { return infected };

        let transmission = &self.params.transmission;
        let source_section = floor.workers.section[worker.index()];
        let r = transmission.radius as i64;
        let (width, height) = (floor.grid.width(), floor.grid.height());

        for dy in -r..=r {
            for dx in -r..=r {
                if dx.abs() + dy.abs() > r {
                    continue;
                }
                let Some(cell) = pos.offset_within(dx, dy, width, height) else { continue };
                let occupants: Vec<WorkerId> = floor.grid.cell(cell).to_vec();
                for target in occupants {
                    if target == worker || floor.workers.status(target) != HealthStatus::Healthy {
                        continue;
                    }
                    let target_section = floor.workers.section[target.index()];
                    let exposure = Exposure {
                        distance:          pos.manhattan(cell),
                        target_had_covid:  floor.workers.had_covid[target.index()],
                        mask_mandate:      ctx.policy.mask_mandate,
                        social_distancing: ctx.policy.social_distancing,
                        cross_section:     target_section != source_section,
                        pressure:          floor.sections.infection_pressure(target_section),
                    };
                    if floor.rng.gen_bool(transmission.probability(&exposure)) {
                        floor.workers.infect(target);
                        floor.sections.record_infection(source_section);
                        if target_section != source_section {
                            floor.sections.record_infection(target_section);
                        }
                        infected.push(target);
                    }
                }
            }
        }
        infected
    }

    fn progress_disease(
        &self,
        worker: WorkerId,
        floor:  &mut Floor<'_>,
        _ctx:   &StepContext<'_>,
    ) -> Option<HealthTransition> {
        let disease = &self.params.disease;
        let i = worker.index();
        match floor.workers.health[i] {
            HealthStatus::Infected => {
                if floor.workers.infection_time[i] == 0 && floor.rng.gen_bool(disease.death_probability) {
                    floor.workers.kill(worker);
                    return Some(HealthTransition::Died);
                }
                floor.workers.infection_time[i] += 1;
                if floor.workers.infection_time[i] >= disease.infected_steps {
                    floor.workers.health[i] = HealthStatus::Recovered;
                    floor.workers.infection_time[i] = 0;
                    return Some(HealthTransition::Recovered);
                }
                None
            }
            HealthStatus::Recovered => {
                floor.workers.infection_time[i] += 1;
                if floor.workers.infection_time[i] >= disease.recovered_steps {
                    floor.workers.health[i] = HealthStatus::Healthy;
                    floor.workers.infection_time[i] = 0;
                    return Some(HealthTransition::Waned);
                }
                None
            }
            HealthStatus::Healthy | HealthStatus::Dead => None,
        }
    }

    fn production(&self, worker: WorkerId, workers: &WorkerStore, ctx: &StepContext<'_>) -> f64 {
        let i = worker.index();
        if workers.quarantined[i] || workers.health[i].is_dead() {
            return 0.0;
        }
        let production = &self.params.production;
        workers.base_production[i] * production.health_factor(workers.health[i]) * production.policy_factor(ctx.policy)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Column range of `section`, or the whole width if the index is stale.
fn section_columns(sections: &SectionPartitioner, grid: &SpatialGrid, section: usize) -> Range<u32> {
    sections.section_bounds(section).unwrap_or(0..grid.width())
}

/// In-bounds cells of the 3×3 block centred on `center`, restricted to
/// `columns`.
fn block_around(center: Pos, grid: &SpatialGrid, columns: &Range<u32>) -> Vec<Pos> {
    let mut out = Vec::with_capacity(9);
    for dy in -1..=1 {
        for dx in -1..=1 {
            if let Some(cell) = center.offset_within(dx, dy, grid.width(), grid.height()) {
                if columns.contains(&cell.x) {
                    out.push(cell);
                }
            }
        }
    }
    out
}

/// Workers other than `me` within Chebyshev distance 1 of `pos`.
fn crowding(grid: &SpatialGrid, pos: Pos, me: WorkerId) -> usize {
    let mut n = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if let Some(cell) = pos.offset_within(dx, dy, grid.width(), grid.height()) {
                n += grid.cell(cell).iter().filter(|&&w| w != me).count();
            }
        }
    }
    n
}

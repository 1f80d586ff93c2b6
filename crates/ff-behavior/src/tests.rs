//! Unit tests for ff-behavior.

use ff_agent::{WorkerStore, WorkerStoreBuilder};
use ff_core::{HealthStatus, PolicyConfig, Pos, SimRng, SplittingLevel, WorkerId};
use ff_spatial::{SectionPartitioner, SpatialGrid};

use crate::{
    BehaviorParams, Exposure, Floor, HealthTransition, NoopBehavior, StandardBehavior, StepContext,
    TransmissionParams, WorkerBehavior,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

struct World {
    grid:     SpatialGrid,
    sections: SectionPartitioner,
    workers:  WorkerStore,
    rng:      SimRng,
    policy:   PolicyConfig,
}

impl World {
    /// `positions[i]` is worker i's start cell and shift anchor.
    fn new(width: u32, height: u32, level: u8, positions: &[Pos]) -> Self {
        let mut rng = SimRng::new(7);
        let mut workers = WorkerStoreBuilder::new(positions.len())
            .production_variance(false)
            .build(&mut rng);
        let sections = SectionPartitioner::new(width, SplittingLevel::new(level).unwrap()).unwrap();
        let mut grid = SpatialGrid::new(width, height, positions.len());
        for (i, &pos) in positions.iter().enumerate() {
            grid.place(WorkerId(i as u32), pos).unwrap();
            workers.base_position[i] = pos;
            workers.section[i] = sections.section_index(pos.x);
        }
        let mut policy = PolicyConfig::default();
        policy.splitting_level = SplittingLevel::new(level).unwrap();
        Self { grid, sections, workers, rng, policy }
    }

    fn step(&mut self, behavior: &impl WorkerBehavior, worker: WorkerId) -> crate::WorkerOutcome {
        let ctx = StepContext::new(&self.policy, 1, 1);
        let mut floor = Floor::new(&mut self.grid, &mut self.sections, &mut self.workers, &mut self.rng);
        behavior.step_worker(worker, &mut floor, &ctx)
    }
}

/// Every transmission attempt within the radius succeeds.
fn certain_transmission() -> BehaviorParams {
    let mut params = BehaviorParams::default();
    params.transmission = TransmissionParams {
        distance_probabilities: vec![1.0; 4],
        prior_infection_factor: 1.0,
        mask_factor:            1.0,
        distancing_factor:      1.0,
        cross_section_factor:   1.0,
        ..TransmissionParams::default()
    };
    params.disease.death_probability = 0.0;
    params
}

fn no_death() -> BehaviorParams {
    let mut params = BehaviorParams::default();
    params.disease.death_probability = 0.0;
    params
}

// ── Parameters ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod params {
    use super::*;

    #[test]
    fn defaults_validate() {
        BehaviorParams::default().validate().unwrap();
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut p = BehaviorParams::default();
        p.disease.death_probability = 1.5;
        assert!(p.validate().is_err());

        let mut p = BehaviorParams::default();
        p.transmission.distance_probabilities = vec![0.2, 0.1];
        assert!(p.validate().is_err());
    }

    #[test]
    fn probability_decreases_with_distance() {
        let t = TransmissionParams::default();
        let probs: Vec<f64> = (0..=4)
            .map(|d| t.probability(&Exposure { distance: d, pressure: 1.0, ..Exposure::default() }))
            .collect();
        assert_eq!(probs, vec![0.2, 0.1, 0.05, 0.01, 0.0]);
        for pair in probs.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn mitigation_factors_multiply() {
        let t = TransmissionParams::default();
        let all = Exposure {
            distance:          0,
            target_had_covid:  true,
            mask_mandate:      true,
            social_distancing: true,
            cross_section:     true,
            pressure:          2.0,
        };
        let expected = 0.2 * 0.5 * 0.7 * 0.8 * 0.15 * 2.0;
        assert!((t.probability(&all) - expected).abs() < 1e-12);
    }

    #[test]
    fn production_policy_factor() {
        let p = BehaviorParams::default().production;
        let mut policy = PolicyConfig::default();
        assert!((p.policy_factor(&policy) - 0.97).abs() < 1e-12);

        policy.shifts_per_day = ff_core::ShiftsPerDay::new(1).unwrap();
        policy.mask_mandate = true;
        policy.social_distancing = true;
        let expected = 0.85 * 0.97 * 0.95 * 0.90;
        assert!((p.policy_factor(&policy) - expected).abs() < 1e-12);
    }
}

// ── Disease progression ───────────────────────────────────────────────────────

#[cfg(test)]
mod disease {
    use super::*;

    #[test]
    fn full_cycle_back_to_healthy() {
        let behavior = StandardBehavior::new(no_death());
        let mut world = World::new(5, 5, 0, &[Pos::new(2, 2)]);
        world.workers.infect(WorkerId(0));

        let mut transitions = Vec::new();
        for _ in 0..120 {
            if let Some(t) = world.step(&behavior, WorkerId(0)).transition {
                transitions.push(t);
            }
        }
        assert_eq!(transitions, vec![HealthTransition::Recovered, HealthTransition::Waned]);
        assert_eq!(world.workers.status(WorkerId(0)), HealthStatus::Healthy);
        assert_eq!(world.workers.infection_time[0], 0);
        assert!(world.workers.had_covid[0]);
    }

    #[test]
    fn recovery_after_forty_steps() {
        let behavior = StandardBehavior::new(no_death());
        let mut world = World::new(5, 5, 0, &[Pos::new(2, 2)]);
        world.workers.infect(WorkerId(0));
        for _ in 0..39 {
            world.step(&behavior, WorkerId(0));
        }
        assert_eq!(world.workers.status(WorkerId(0)), HealthStatus::Infected);
        world.step(&behavior, WorkerId(0));
        assert_eq!(world.workers.status(WorkerId(0)), HealthStatus::Recovered);
    }

    #[test]
    fn death_is_absorbing_and_leaves_grid() {
        let mut params = BehaviorParams::default();
        params.disease.death_probability = 1.0;
        let behavior = StandardBehavior::new(params);
        let mut world = World::new(5, 5, 0, &[Pos::new(2, 2)]);
        world.workers.infect(WorkerId(0));

        let outcome = world.step(&behavior, WorkerId(0));
        assert_eq!(outcome.transition, Some(HealthTransition::Died));
        assert_eq!(world.grid.position(WorkerId(0)), None);
        assert_eq!(world.workers.current_production[0], 0.0);

        for _ in 0..10 {
            assert_eq!(world.step(&behavior, WorkerId(0)), crate::WorkerOutcome::default());
        }
        assert_eq!(world.workers.status(WorkerId(0)), HealthStatus::Dead);
        assert_eq!(world.grid.position(WorkerId(0)), None);
    }

    #[test]
    fn quarantined_worker_still_progresses() {
        let behavior = StandardBehavior::new(no_death());
        let mut world = World::new(5, 5, 0, &[Pos::new(2, 2)]);
        world.workers.infect(WorkerId(0));
        world.grid.remove(WorkerId(0)).unwrap();
        world.workers.quarantined[0] = true;

        for _ in 0..40 {
            world.step(&behavior, WorkerId(0));
        }
        assert_eq!(world.workers.status(WorkerId(0)), HealthStatus::Recovered);
        assert_eq!(world.workers.current_production[0], 0.0);
        assert_eq!(world.grid.position(WorkerId(0)), None);
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement {
    use super::*;

    #[test]
    fn stays_near_anchor_and_in_section() {
        let behavior = StandardBehavior::new(no_death());
        // Anchor on the left edge of section 1 (columns 5..10).
        let mut world = World::new(10, 10, 1, &[Pos::new(5, 5)]);
        for _ in 0..200 {
            world.step(&behavior, WorkerId(0));
            let pos = world.grid.position(WorkerId(0)).unwrap();
            assert!(pos.chebyshev(Pos::new(5, 5)) <= 1);
            assert!((5..10).contains(&pos.x));
        }
    }

    #[test]
    fn distancing_prefers_clear_cells() {
        let behavior = StandardBehavior::new(no_death());
        // Worker 0 anchored at (1, 1); workers 1 and 2 crowd its left side.
        let mut world = World::new(10, 10, 0, &[Pos::new(1, 1), Pos::new(0, 0), Pos::new(0, 2)]);
        world.policy.social_distancing = true;
        for _ in 0..50 {
            world.step(&behavior, WorkerId(0));
            let pos = world.grid.position(WorkerId(0)).unwrap();
            assert_eq!(pos.x, 2, "only column 2 is out of reach of the other workers");
        }
    }

    #[test]
    fn noop_never_moves() {
        let mut world = World::new(5, 5, 0, &[Pos::new(3, 3)]);
        world.workers.infect(WorkerId(0));
        for _ in 0..10 {
            world.step(&NoopBehavior, WorkerId(0));
        }
        assert_eq!(world.grid.position(WorkerId(0)), Some(Pos::new(3, 3)));
        assert_eq!(world.workers.status(WorkerId(0)), HealthStatus::Infected);
    }
}

// ── Transmission ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod transmission {
    use super::*;

    /// Worker 1 never steps, so it stays nine or more cells away.
    #[test]
    fn infects_within_radius_only() {
        let behavior = StandardBehavior::new(certain_transmission());
        let mut world = World::new(20, 1, 0, &[Pos::new(0, 0), Pos::new(10, 0)]);
        world.workers.infect(WorkerId(0));
        world.workers.infection_time[0] = 1;

        let outcome = world.step(&behavior, WorkerId(0));
        assert!(outcome.infected.is_empty());
        assert_eq!(world.workers.status(WorkerId(1)), HealthStatus::Healthy);
    }

    #[test]
    fn infection_marks_target_and_raises_pressure() {
        let behavior = StandardBehavior::new(certain_transmission());
        // Worker 0 in section 0 (0..5), worker 1 in section 1 (5..10),
        // at most Manhattan 3 apart after any move.
        let mut world = World::new(10, 1, 1, &[Pos::new(4, 0), Pos::new(5, 0)]);
        world.workers.infect(WorkerId(0));
        world.workers.infection_time[0] = 1;

        let outcome = world.step(&behavior, WorkerId(0));
        assert_eq!(outcome.infected, vec![WorkerId(1)]);
        assert_eq!(world.workers.status(WorkerId(1)), HealthStatus::Infected);
        assert!(world.workers.had_covid[1]);
        assert_eq!(world.sections.pressure_levels(), &[1.0, 1.0]);
    }

    #[test]
    fn only_healthy_targets() {
        let behavior = StandardBehavior::new(certain_transmission());
        let mut world = World::new(5, 1, 0, &[Pos::new(1, 0), Pos::new(2, 0)]);
        world.workers.infect(WorkerId(0));
        world.workers.infection_time[0] = 1;
        world.workers.health[1] = HealthStatus::Recovered;

        let outcome = world.step(&behavior, WorkerId(0));
        assert!(outcome.infected.is_empty());
        assert_eq!(world.workers.status(WorkerId(1)), HealthStatus::Recovered);
    }
}

// ── Production ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod production {
    use super::*;

    #[test]
    fn standard_production_by_status() {
        let behavior = StandardBehavior::new(no_death());
        let mut world = World::new(5, 5, 0, &[Pos::new(0, 0), Pos::new(4, 4)]);
        world.workers.infect(WorkerId(1));
        world.step(&behavior, WorkerId(0));
        world.step(&behavior, WorkerId(1));
        // Level 0, four shifts, no masks or distancing: policy factor 1.
        assert!((world.workers.current_production[0] - 1.0).abs() < 1e-12);
        assert!((world.workers.current_production[1] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn dropped_worker_is_skipped() {
        let behavior = StandardBehavior::new(no_death());
        let mut world = World::new(5, 5, 0, &[Pos::new(0, 0)]);
        world.grid.remove(WorkerId(0)).unwrap();
        world.workers.drop_from_roster(WorkerId(0));
        world.workers.infect(WorkerId(0));
        world.step(&behavior, WorkerId(0));
        assert_eq!(world.workers.infection_time[0], 0);
        assert_eq!(world.workers.current_production[0], 0.0);
    }
}

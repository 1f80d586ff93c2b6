//! Unit tests for ff-control.

use ff_agent::{WorkerStore, WorkerStoreBuilder};
use ff_behavior::Floor;
use ff_core::{HealthStatus, Pos, SimRng, SplittingLevel, WorkerId};
use ff_spatial::{shuffled_cells, SectionPartitioner, SpatialGrid};

use crate::{QuarantineManager, QuarantineParams};

// ── Helpers ───────────────────────────────────────────────────────────────────

struct World {
    grid:     SpatialGrid,
    sections: SectionPartitioner,
    workers:  WorkerStore,
    rng:      SimRng,
}

impl World {
    /// `n` workers on distinct random cells, sections derived from their x.
    fn new(width: u32, height: u32, level: u8, n: usize) -> Self {
        let mut rng = SimRng::new(11);
        let mut workers = WorkerStoreBuilder::new(n).production_variance(false).build(&mut rng);
        let sections = SectionPartitioner::new(width, SplittingLevel::new(level).unwrap()).unwrap();
        let mut grid = SpatialGrid::new(width, height, n);
        let cells = shuffled_cells(width, height, &mut rng);
        for (i, &pos) in cells.iter().take(n).enumerate() {
            grid.place(WorkerId(i as u32), pos).unwrap();
            workers.base_position[i] = pos;
            workers.section[i] = sections.section_index(pos.x);
        }
        Self { grid, sections, workers, rng }
    }

    fn floor(&mut self) -> Floor<'_> {
        Floor::new(&mut self.grid, &mut self.sections, &mut self.workers, &mut self.rng)
    }

    /// Every active worker is on the grid inside its section; everyone else
    /// is off the grid.
    fn assert_consistent(&self) {
        for w in self.workers.worker_ids() {
            match self.grid.position(w) {
                Some(pos) => {
                    assert!(self.workers.is_active(w), "{w} is on the grid but inactive");
                    let bounds = self.sections.section_bounds(self.workers.section[w.index()]).unwrap();
                    assert!(bounds.contains(&pos.x), "{w} at {pos} outside {bounds:?}");
                }
                None => assert!(!self.workers.is_active(w), "{w} is active but off the grid"),
            }
        }
    }
}

// ── CleaningScheduler ─────────────────────────────────────────────────────────

#[cfg(test)]
mod cleaning {
    use ff_core::CleaningType;

    use super::*;
    use crate::{CleaningOutcome, CleaningScheduler, CleaningTier};

    #[test]
    fn initial_schedule_is_frequency() {
        let c = CleaningScheduler::new(CleaningTier::defaults(), CleaningType::Light, 24);
        assert_eq!(c.next_step(CleaningType::Light), 8);
        assert_eq!(c.next_step(CleaningType::Medium), 16);
        assert_eq!(c.next_step(CleaningType::Heavy), 16);
        assert_eq!(c.productivity_modifier(), 1.0);
    }

    #[test]
    fn heavy_cycle_cuts_pressure_to_a_fifth() {
        let mut sections = SectionPartitioner::new(40, SplittingLevel::new(2).unwrap()).unwrap();
        for i in 0..4 {
            for _ in 0..=i * 2 {
                sections.record_infection(i);
            }
        }
        let before: Vec<f64> = sections.pressure_levels().to_vec();

        let mut c = CleaningScheduler::new(CleaningTier::defaults(), CleaningType::Heavy, 24);
        assert_eq!(c.process(15, 24, &mut sections), CleaningOutcome::Idle);
        assert_eq!(c.process(16, 24, &mut sections), CleaningOutcome::Started(CleaningType::Heavy));
        assert_eq!(c.cleaned_sections(), &[0usize, 1, 2, 3]);
        assert!((c.productivity_modifier() - 0.75).abs() < 1e-12);
        for (after, before) in sections.pressure_levels().iter().zip(&before) {
            assert!(*after <= 0.2 * before + 1e-12);
        }

        assert_eq!(c.process(17, 24, &mut sections), CleaningOutcome::Continued(CleaningType::Heavy));
        assert!(c.cleaned_sections().is_empty());
        for (after, before) in sections.pressure_levels().iter().zip(&before) {
            assert!(*after <= 0.04 * before + 1e-12);
        }

        assert_eq!(c.process(18, 24, &mut sections), CleaningOutcome::Idle);
        assert_eq!(c.productivity_modifier(), 1.0);
        assert_eq!(c.next_step(CleaningType::Heavy), 8);
        assert_eq!(c.cycles(), 1);
    }

    #[test]
    fn light_cycle_lasts_one_step() {
        let mut sections = SectionPartitioner::new(10, SplittingLevel::new(0).unwrap()).unwrap();
        sections.record_infection(0);
        let mut c = CleaningScheduler::new(CleaningTier::defaults(), CleaningType::Light, 24);
        assert_eq!(c.process(8, 24, &mut sections), CleaningOutcome::Started(CleaningType::Light));
        assert!((sections.pressure(0) - 0.65).abs() < 1e-12);
        assert_eq!(c.productivity_modifier(), 1.0);
        assert_eq!(c.process(9, 24, &mut sections), CleaningOutcome::Idle);
        assert_eq!(c.next_step(CleaningType::Light), 16);
    }

    #[test]
    fn switching_tier_abandons_running_cycle() {
        let mut sections = SectionPartitioner::new(10, SplittingLevel::new(0).unwrap()).unwrap();
        let mut c = CleaningScheduler::new(CleaningTier::defaults(), CleaningType::Medium, 24);
        c.process(16, 24, &mut sections);
        c.set_cleaning_type(CleaningType::Light);
        assert_eq!(c.current(), CleaningType::Light);
        assert_eq!(c.process(17, 24, &mut sections), CleaningOutcome::Idle);
    }
}

// ── TestingManager ────────────────────────────────────────────────────────────

#[cfg(test)]
mod testing {
    use ff_core::TestingLevel;

    use super::*;
    use crate::{TestingManager, TestingParams, TestingTier};

    fn perfect_full_sampling() -> TestingParams {
        let mut params = TestingParams::default();
        params.tiers[0] = TestingTier::new(1.0, 0.0, 1, 8);
        params.false_positive_rate = 0.0;
        params.false_negative_rate = 0.0;
        params
    }

    #[test]
    fn perfect_test_quarantines_exactly_the_infected() {
        let mut world = World::new(10, 10, 0, 20);
        world.workers.infect(WorkerId(13));
        let mut quarantine = QuarantineManager::new(QuarantineParams::default());
        let mut testing = TestingManager::new(perfect_full_sampling(), TestingLevel::Light, 24);

        let report = testing.process_testing(TestingLevel::Light, &mut world.floor(), &mut quarantine);
        assert_eq!(report.tested, 20);
        assert_eq!(report.positives, vec![WorkerId(13)]);
        assert_eq!(report.true_positives, 1);
        assert_eq!(quarantine.zone(), &[WorkerId(13)]);
        assert!(world.workers.is_quarantined(WorkerId(13)));
        assert_eq!(world.grid.position(WorkerId(13)), None);
        world.assert_consistent();
    }

    #[test]
    fn sample_size_is_truncated_share_of_active() {
        let mut world = World::new(10, 10, 0, 25);
        world.grid.remove(WorkerId(0)).unwrap();
        world.workers.quarantined[0] = true;
        let mut quarantine = QuarantineManager::new(QuarantineParams::default());
        let mut testing = TestingManager::new(TestingParams::default(), TestingLevel::Medium, 24);
        let report = testing.process_testing(TestingLevel::Medium, &mut world.floor(), &mut quarantine);
        // 24 active × 0.5.
        assert_eq!(report.tested, 12);
    }

    #[test]
    fn false_negative_rate_is_monotone() {
        let mut rng = SimRng::new(99);
        let trials = 20_000;
        let mut previous = -1.0;
        for fnr in [0.0, 0.1, 0.3, 0.6, 0.9] {
            let params = TestingParams { false_negative_rate: fnr, ..TestingParams::default() };
            let testing = TestingManager::new(params, TestingLevel::Light, 24);
            let missed = (0..trials)
                .filter(|_| !testing.test_worker(HealthStatus::Infected, &mut rng))
                .count();
            let fraction = missed as f64 / trials as f64;
            assert!(fraction > previous, "fnr {fnr}: {fraction} not above {previous}");
            assert!((fraction - fnr).abs() < 0.02);
            previous = fraction;
        }
    }

    #[test]
    fn healthy_flagged_at_false_positive_rate() {
        let mut rng = SimRng::new(5);
        let testing = TestingManager::new(TestingParams::default(), TestingLevel::Light, 24);
        let flagged = (0..20_000)
            .filter(|_| testing.test_worker(HealthStatus::Healthy, &mut rng))
            .count();
        assert!(((flagged as f64 / 20_000.0) - 0.05).abs() < 0.01);
        assert!(!testing.test_worker(HealthStatus::Dead, &mut rng));
    }

    #[test]
    fn schedule_fires_once_per_occurrence() {
        let mut testing = TestingManager::new(TestingParams::default(), TestingLevel::Light, 24);
        assert!(!testing.should_run_testing(TestingLevel::Light, 7, 7));
        assert!(testing.should_run_testing(TestingLevel::Light, 8, 8));
        assert!(!testing.should_run_testing(TestingLevel::Light, 8, 8));
        assert_eq!(testing.next_step(TestingLevel::Light), Some(16));
        assert!(!testing.should_run_testing(TestingLevel::Medium, 16, 16), "medium is disabled");
        assert!(!testing.should_run_testing(TestingLevel::None, 8, 8));
    }

    #[test]
    fn set_level_enables_exactly_one() {
        let mut testing = TestingManager::new(TestingParams::default(), TestingLevel::Light, 24);
        testing.set_testing_level(TestingLevel::Heavy);
        let enabled: Vec<_> = TestingLevel::TIERS.into_iter().filter(|&l| testing.is_enabled(l)).collect();
        assert_eq!(enabled, vec![TestingLevel::Heavy]);

        testing.set_testing_level(TestingLevel::None);
        assert!(TestingLevel::TIERS.iter().all(|&l| !testing.is_enabled(l)));
    }

    #[test]
    fn heavy_impact_lasts_two_steps() {
        let mut world = World::new(10, 10, 0, 10);
        let mut quarantine = QuarantineManager::new(QuarantineParams::default());
        let mut testing = TestingManager::new(TestingParams::default(), TestingLevel::Heavy, 24);

        // Heavy fires at step-of-day 24 mod 24 = 0.
        let reports = testing.run_scheduled(&mut world.floor(), &mut quarantine, 24, 0);
        assert_eq!(reports.len(), 1);
        assert!((testing.productivity_modifier() - 0.8).abs() < 1e-12);

        testing.run_scheduled(&mut world.floor(), &mut quarantine, 25, 1);
        assert!((testing.productivity_modifier() - 0.8).abs() < 1e-12);

        testing.run_scheduled(&mut world.floor(), &mut quarantine, 26, 2);
        assert_eq!(testing.productivity_modifier(), 1.0);
    }
}

// ── QuarantineManager ─────────────────────────────────────────────────────────

#[cfg(test)]
mod quarantine {
    use super::*;

    #[test]
    fn round_trip_returns_to_section() {
        let mut world = World::new(20, 10, 2, 30);
        let worker = WorkerId(4);
        world.workers.infect(worker);
        let section = world.workers.section[worker.index()];
        let mut q = QuarantineManager::new(QuarantineParams::default());

        assert!(q.quarantine(worker, &mut world.floor()));
        assert!(!q.quarantine(worker, &mut world.floor()), "second entry is refused");
        assert_eq!(q.last_section(worker), Some(section));
        world.assert_consistent();

        let report = q.process(&mut world.floor());
        assert!(report.released.is_empty());
        assert_eq!(q.dwell(worker), Some(1));

        world.workers.health[worker.index()] = HealthStatus::Recovered;
        let report = q.process(&mut world.floor());
        assert_eq!(report.released.len(), 1);
        let (released, pos) = report.released[0];
        assert_eq!(released, worker);

        assert!(!world.workers.is_quarantined(worker));
        assert_eq!(world.grid.position(worker), Some(pos));
        assert_eq!(world.workers.base_position[worker.index()], pos);
        assert!(world.sections.section_bounds(section).unwrap().contains(&pos.x));
        assert!(q.is_empty());
        world.assert_consistent();
    }

    #[test]
    fn healthy_waits_for_minimum_dwell() {
        let mut world = World::new(10, 10, 0, 5);
        let mut q = QuarantineManager::new(QuarantineParams::default());
        q.quarantine(WorkerId(0), &mut world.floor());
        for _ in 0..39 {
            assert!(q.process(&mut world.floor()).released.is_empty());
        }
        assert_eq!(q.process(&mut world.floor()).released.len(), 1);
    }

    #[test]
    fn infected_released_at_maximum_dwell() {
        let mut world = World::new(10, 10, 0, 5);
        world.workers.infect(WorkerId(2));
        let mut q = QuarantineManager::new(QuarantineParams::default());
        q.quarantine(WorkerId(2), &mut world.floor());
        for _ in 0..79 {
            assert!(q.process(&mut world.floor()).released.is_empty());
        }
        assert_eq!(q.process(&mut world.floor()).released.len(), 1);
        assert!(world.grid.position(WorkerId(2)).is_some());
    }

    #[test]
    fn dead_worker_leaves_zone_without_placement() {
        let mut world = World::new(10, 10, 0, 5);
        let mut q = QuarantineManager::new(QuarantineParams::default());
        q.quarantine(WorkerId(1), &mut world.floor());
        world.workers.kill(WorkerId(1));

        let report = q.process(&mut world.floor());
        assert_eq!(report.deceased, vec![WorkerId(1)]);
        assert!(q.is_empty());
        assert_eq!(world.grid.position(WorkerId(1)), None);
        assert!(!q.quarantine(WorkerId(1), &mut world.floor()));
    }

    #[test]
    fn exhausted_release_falls_back_to_section_origin() {
        let mut world = World::new(10, 10, 1, 5);
        let params = QuarantineParams { release_attempts: 0, ..QuarantineParams::default() };
        let mut q = QuarantineManager::new(params);
        let worker = WorkerId(0);
        let section = world.workers.section[0];
        q.quarantine(worker, &mut world.floor());
        world.workers.health[0] = HealthStatus::Recovered;

        let report = q.process(&mut world.floor());
        let origin = Pos::new(world.sections.section_bounds(section).unwrap().start, 0);
        assert_eq!(report.fallbacks, vec![worker]);
        assert_eq!(report.released, vec![(worker, origin)]);
        assert_eq!(world.grid.position(worker), Some(origin));
        world.assert_consistent();
    }

    #[test]
    fn legacy_threshold_quarantines_long_infections() {
        let mut world = World::new(10, 10, 0, 5);
        world.workers.infect(WorkerId(3));
        world.workers.infection_time[3] = 1001;
        let mut q = QuarantineManager::new(QuarantineParams::default());
        let report = q.process(&mut world.floor());
        assert_eq!(report.entered, vec![WorkerId(3)]);
        assert!(world.workers.is_quarantined(WorkerId(3)));
    }
}

// ── ShiftScheduler ────────────────────────────────────────────────────────────

#[cfg(test)]
mod shifts {
    use ff_core::{PolicyConfig, ShiftsPerDay};

    use super::*;
    use crate::{ShiftParams, ShiftScheduler};

    fn policy_with_shifts(n: u8) -> PolicyConfig {
        PolicyConfig { shifts_per_day: ShiftsPerDay::new(n).unwrap(), ..PolicyConfig::default() }
    }

    #[test]
    fn initial_schedule() {
        let s = ShiftScheduler::new(ShiftParams::default(), &policy_with_shifts(4)).unwrap();
        assert_eq!(s.steps_per_shift(), 6);
        assert_eq!(s.next_shift_change(), 6);
        assert!(s.is_due(6));
        assert!(!s.is_due(5));

        let single = ShiftScheduler::new(ShiftParams::default(), &policy_with_shifts(1)).unwrap();
        assert_eq!(single.next_shift_change(), 0);
    }

    #[test]
    fn changing_shift_count_forces_next_check() {
        let mut world = World::new(10, 10, 0, 10);
        let mut s = ShiftScheduler::new(ShiftParams::default(), &policy_with_shifts(3)).unwrap();
        assert_eq!(s.steps_per_shift(), 8);

        s.set_shifts_per_day(ShiftsPerDay::new(1).unwrap()).unwrap();
        assert_eq!(s.steps_per_shift(), 24);
        assert!(s.is_due(3), "pending change fires at any step-of-day");

        s.change_shift(&mut world.floor(), false, 3);
        assert!(!s.is_pending());
        assert_eq!(s.next_shift_change(), 3);
        assert_eq!(s.changes(), 1);
    }

    #[test]
    fn indivisible_day_rejected_without_side_effects() {
        let mut policy = policy_with_shifts(2);
        policy.steps_per_day = 10;
        let mut s = ShiftScheduler::new(ShiftParams::default(), &policy).unwrap();
        assert!(s.set_shifts_per_day(ShiftsPerDay::new(4).unwrap()).is_err());
        assert_eq!(s.steps_per_shift(), 5);
        assert!(!s.is_pending());
    }

    #[test]
    fn new_anchors_respect_sections_and_spacing() {
        let mut world = World::new(30, 30, 2, 40);
        let mut s = ShiftScheduler::new(ShiftParams::default(), &policy_with_shifts(4)).unwrap();
        let report = s.change_shift(&mut world.floor(), true, 6);
        assert_eq!(report.placed, 40);
        assert!(report.dropped.is_empty());
        world.assert_consistent();

        let spaced: Vec<Pos> = world
            .workers
            .worker_ids()
            .filter(|w| !report.best_effort.contains(w))
            .map(|w| world.workers.base_position[w.index()])
            .collect();
        for (i, a) in spaced.iter().enumerate() {
            for b in &spaced[i + 1..] {
                assert!(a.manhattan(*b) >= 2, "{a} and {b} too close");
            }
        }
        for w in world.workers.worker_ids() {
            assert_eq!(world.grid.position(w), Some(world.workers.base_position[w.index()]));
        }
    }

    #[test]
    fn exhausted_placement_drops_worker() {
        // Three workers share a 2×1 floor; only two cells exist.
        let mut world = World::new(2, 1, 0, 2);
        world.workers = WorkerStoreBuilder::new(3).production_variance(false).build(&mut SimRng::new(0));
        world.grid.place(WorkerId(2), Pos::new(0, 0)).unwrap();

        let mut s = ShiftScheduler::new(ShiftParams::default(), &policy_with_shifts(4)).unwrap();
        let report = s.change_shift(&mut world.floor(), false, 6);
        assert_eq!(report.placed, 2);
        assert_eq!(report.dropped.len(), 1);

        let dropped = report.dropped[0];
        assert!(!world.workers.is_on_roster(dropped));
        assert_eq!(world.grid.position(dropped), None);
        world.assert_consistent();
    }
}

// ── Redistribution ────────────────────────────────────────────────────────────

#[cfg(test)]
mod redistribute {
    use super::*;
    use crate::redistribute;

    #[test]
    fn workers_land_in_four_equal_bands() {
        let mut world = World::new(40, 20, 1, 60);
        let mut q = QuarantineManager::new(QuarantineParams::default());
        let report = redistribute(SplittingLevel::new(2).unwrap(), &mut world.floor(), &mut q, 50)
            .unwrap()
            .unwrap();
        assert_eq!(report.placed, 60);
        assert_eq!(world.sections.section_count(), 4);
        assert_eq!(world.sections.pressure_levels(), &[0.0; 4]);
        for w in world.workers.worker_ids() {
            let pos = world.grid.position(w).unwrap();
            let band = world.workers.section[w.index()];
            assert_eq!(band, (pos.x / 10) as usize);
        }
        world.assert_consistent();
    }

    #[test]
    fn unchanged_level_is_a_no_op() {
        let mut world = World::new(40, 20, 1, 10);
        let before: Vec<_> = world.grid.iter_placed().collect();
        let mut q = QuarantineManager::new(QuarantineParams::default());
        assert!(redistribute(SplittingLevel::new(1).unwrap(), &mut world.floor(), &mut q, 50).unwrap().is_none());
        assert_eq!(world.grid.iter_placed().collect::<Vec<_>>(), before);
    }

    #[test]
    fn too_narrow_grid_is_rejected() {
        let mut world = World::new(6, 6, 1, 10);
        let mut q = QuarantineManager::new(QuarantineParams::default());
        assert!(redistribute(SplittingLevel::new(3).unwrap(), &mut world.floor(), &mut q, 50).is_err());
        assert_eq!(world.sections.section_count(), 2);
    }

    #[test]
    fn quarantined_section_is_remapped() {
        let mut world = World::new(40, 20, 0, 10);
        let worker = WorkerId(5);
        let x = world.grid.position(worker).unwrap().x;
        let mut q = QuarantineManager::new(QuarantineParams::default());
        q.quarantine(worker, &mut world.floor());
        assert_eq!(q.last_section(worker), Some(0));

        redistribute(SplittingLevel::new(3).unwrap(), &mut world.floor(), &mut q, 50).unwrap();
        assert_eq!(q.last_section(worker), Some((x / 5) as usize));
    }
}

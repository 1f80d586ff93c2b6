//! Fluent builder for `WorkerStore`.
//!
//! # Usage
//!
//! ```rust
//! use ff_agent::WorkerStoreBuilder;
//! use ff_core::SimRng;
//!
//! let mut rng = SimRng::new(42);
//! let store = WorkerStoreBuilder::new(100)
//!     .production_variance(true)
//!     .build(&mut rng);
//!
//! assert_eq!(store.count, 100);
//! assert!(store.base_production.iter().all(|p| (0.9..=1.1).contains(p)));
//! ```

use ff_core::{SimRng, WorkerId};

use crate::WorkerStore;

/// Lower / upper bound of per-worker base production when variance is on.
const PRODUCTION_RANGE: (f64, f64) = (0.9, 1.1);

/// Fluent builder for [`WorkerStore`].
///
/// Sections and base positions start at zero; the environment writes them
/// when it lays the workers out on the grid.
pub struct WorkerStoreBuilder {
    count:               usize,
    production_variance: bool,
    infected:            Vec<WorkerId>,
}

impl WorkerStoreBuilder {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            production_variance: true,
            infected: Vec::new(),
        }
    }

    /// Sample base production uniformly from `[0.9, 1.1]` (`true`, the
    /// default) or fix it at 1.0.
    pub fn production_variance(mut self, enabled: bool) -> Self {
        self.production_variance = enabled;
        self
    }

    /// Start `worker` in the infected state.  Ids past `count` are ignored.
    pub fn infected(mut self, worker: WorkerId) -> Self {
        self.infected.push(worker);
        self
    }

    /// Allocate every array.  Draws `count` values from `rng` when
    /// production variance is on and nothing otherwise.
    pub fn build(self, rng: &mut SimRng) -> WorkerStore {
        let base_production = if self.production_variance {
            (0..self.count)
                .map(|_| rng.gen_range(PRODUCTION_RANGE.0..=PRODUCTION_RANGE.1))
                .collect()
        } else {
            vec![1.0; self.count]
        };

        let mut store = WorkerStore::new(self.count, base_production);
        for worker in self.infected {
            if worker.index() < store.count {
                store.infect(worker);
            }
        }
        store
    }
}

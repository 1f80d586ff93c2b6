//! Bounded re-placement of every active worker inside its own section.
//!
//! Used by shift changes (new anchors) and by splitting-level changes
//! (redistribution into the new bands).  All active workers are lifted off
//! the grid first, then placed one by one in id order, so "free" always
//! means "not taken by a worker placed earlier in this pass".
//!
//! With a spacing requirement the search runs in two phases:
//!
//! ```text
//! phase 1: free cell, no placed worker within Manhattan < spacing   (attempts)
//! phase 2: free cell                                                (attempts)
//! else   : worker dropped from the roster, warn!
//! ```

use log::warn;

use ff_behavior::Floor;
use ff_core::{Pos, WorkerId};
use ff_spatial::{search_position, SpatialGrid};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelocationReport {
    pub placed:      usize,
    /// Placed in phase 2, without the spacing guarantee.
    pub best_effort: Vec<WorkerId>,
    /// Could not be placed and left the roster.
    pub dropped:     Vec<WorkerId>,
}

pub(crate) fn relocate_active(
    floor:    &mut Floor<'_>,
    attempts: usize,
    spacing:  Option<u32>,
    purpose:  &str,
) -> RelocationReport {
    let movers: Vec<(WorkerId, u32)> = floor
        .grid
        .iter_placed()
        .filter(|&(w, _)| floor.workers.is_active(w))
        .map(|(w, pos)| (w, pos.x))
        .collect();
    for &(worker, _) in &movers {
        // Every mover came from `iter_placed`.
        let _ = floor.grid.remove(worker);
    }

    let height = floor.grid.height();
    let mut report = RelocationReport::default();
    for (worker, x) in movers {
        let section = floor.sections.section_index(x);
        let columns = floor.sections.section_bounds(section).unwrap_or(0..floor.grid.width());
        let grid = &*floor.grid;

        let spaced = spacing.and_then(|min| {
            search_position(&columns, height, attempts, floor.rng, |p| {
                grid.is_cell_empty(p) && clear_within(grid, p, min.saturating_sub(1))
            })
        });
        let pos = match spaced {
            Some(pos) => Some(pos),
            None => {
                let any = search_position(&columns, height, attempts, floor.rng, |p| grid.is_cell_empty(p));
                if any.is_some() && spacing.is_some() {
                    report.best_effort.push(worker);
                }
                any
            }
        };

        match pos {
            Some(pos) => {
                let _ = floor.grid.place(worker, pos);
                let i = worker.index();
                floor.workers.base_position[i] = pos;
                floor.workers.section[i] = section;
                report.placed += 1;
            }
            None => {
                warn!("{purpose}: no free cell for {worker} in section {section}, dropping it from the roster");
                floor.workers.drop_from_roster(worker);
                report.dropped.push(worker);
            }
        }
    }
    report
}

/// No worker within Manhattan distance `radius` of `pos`.
fn clear_within(grid: &SpatialGrid, pos: Pos, radius: u32) -> bool {
    let r = radius as i64;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx.abs() + dy.abs() > r {
                continue;
            }
            if let Some(cell) = pos.offset_within(dx, dy, grid.width(), grid.height()) {
                if !grid.is_cell_empty(cell) {
                    return false;
                }
            }
        }
    }
    true
}

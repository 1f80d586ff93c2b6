//! Random placement helpers shared by initial layout, redistribution, shift
//! changes and quarantine release.
//!
//! All searches are bounded: the caller decides what to do when
//! [`search_position`] gives up (fall back to a default cell, or drop the
//! worker from the roster).

use std::ops::Range;

use ff_core::{Pos, SimRng};

/// Uniform random cell with `x ∈ columns`, `y ∈ [0, height)`.
#[inline]
pub fn random_pos_in(columns: &Range<u32>, height: u32, rng: &mut SimRng) -> Pos {
    Pos::new(rng.gen_range(columns.clone()), rng.gen_range(0..height))
}

/// Draw up to `attempts` random cells inside `columns × [0, height)` and
/// return the first one `accept` approves.
pub fn search_position<F>(
    columns:  &Range<u32>,
    height:   u32,
    attempts: usize,
    rng:      &mut SimRng,
    mut accept: F,
) -> Option<Pos>
where
    F: FnMut(Pos) -> bool,
{
    if columns.is_empty() || height == 0 {
        return None;
    }
    for _ in 0..attempts {
        let pos = random_pos_in(columns, height, rng);
        if accept(pos) {
            return Some(pos);
        }
    }
    None
}

/// Every cell of a `width × height` grid in random order.  Taking the first
/// `n` gives `n` distinct, uniformly spread positions.
pub fn shuffled_cells(width: u32, height: u32, rng: &mut SimRng) -> Vec<Pos> {
    let mut cells: Vec<Pos> = (0..width)
        .flat_map(|x| (0..height).map(move |y| Pos::new(x, y)))
        .collect();
    rng.shuffle(&mut cells);
    cells
}

//! `SpatialGrid` — toroidal lattice with multiple workers per cell.
//!
//! # Storage
//!
//! Cells are a flat `Vec<Vec<WorkerId>>` indexed `y * width + x`, and the
//! reverse mapping `positions[worker]` gives each worker's cell.  Both sides
//! are updated together by `place` / `remove` / `move_to`, so the two views
//! never disagree.
//!
//! Neighborhood queries wrap around both axes.  Movement and infection scans
//! in `ff-behavior` stay inside section bounds and use non-wrapping offsets
//! (`Pos::offset_within`) instead.

use ff_core::{Pos, WorkerId};

use crate::{SpatialError, SpatialResult};

pub struct SpatialGrid {
    width:     u32,
    height:    u32,
    cells:     Vec<Vec<WorkerId>>,
    positions: Vec<Option<Pos>>,
    placed:    usize,
}

impl SpatialGrid {
    /// An empty `width × height` grid with room for `worker_capacity` ids.
    pub fn new(width: u32, height: u32, worker_capacity: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Vec::new(); width as usize * height as usize],
            positions: vec![None; worker_capacity],
            placed: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of workers currently on the grid.
    #[inline]
    pub fn placed_count(&self) -> usize {
        self.placed
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// The cell `worker` occupies, or `None` if it is off the grid.
    #[inline]
    pub fn position(&self, worker: WorkerId) -> Option<Pos> {
        self.positions.get(worker.index()).copied().flatten()
    }

    /// Workers in the cell at `pos`.  Empty for out-of-bounds positions.
    pub fn cell(&self, pos: Pos) -> &[WorkerId] {
        if !self.contains(pos) {
            return &[];
        }
        &self.cells[self.cell_index(pos)]
    }

    #[inline]
    pub fn occupancy(&self, pos: Pos) -> usize {
        self.cell(pos).len()
    }

    #[inline]
    pub fn is_cell_empty(&self, pos: Pos) -> bool {
        self.cell(pos).is_empty()
    }

    /// All placed workers with their positions, ascending by id.
    pub fn iter_placed(&self) -> impl Iterator<Item = (WorkerId, Pos)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|pos| (WorkerId(i as u32), pos)))
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    pub fn place(&mut self, worker: WorkerId, pos: Pos) -> SpatialResult<()> {
        self.check_bounds(pos)?;
        if self.position(worker).is_some() {
            return Err(SpatialError::AlreadyPlaced(worker));
        }
        if worker.index() >= self.positions.len() {
            self.positions.resize(worker.index() + 1, None);
        }
        let idx = self.cell_index(pos);
        self.cells[idx].push(worker);
        self.positions[worker.index()] = Some(pos);
        self.placed += 1;
        Ok(())
    }

    /// Take `worker` off the grid, returning the cell it left.
    pub fn remove(&mut self, worker: WorkerId) -> SpatialResult<Pos> {
        let pos = self.position(worker).ok_or(SpatialError::NotPlaced(worker))?;
        let idx = self.cell_index(pos);
        self.cells[idx].retain(|&w| w != worker);
        self.positions[worker.index()] = None;
        self.placed -= 1;
        Ok(pos)
    }

    pub fn move_to(&mut self, worker: WorkerId, to: Pos) -> SpatialResult<()> {
        self.check_bounds(to)?;
        let from = self.position(worker).ok_or(SpatialError::NotPlaced(worker))?;
        if from == to {
            return Ok(());
        }
        let from_idx = self.cell_index(from);
        self.cells[from_idx].retain(|&w| w != worker);
        let to_idx = self.cell_index(to);
        self.cells[to_idx].push(worker);
        self.positions[worker.index()] = Some(to);
        Ok(())
    }

    // ── Toroidal neighborhood queries ─────────────────────────────────────

    /// Wrap signed coordinates onto the torus.
    #[inline]
    pub fn wrap(&self, x: i64, y: i64) -> Pos {
        Pos::new(
            x.rem_euclid(self.width as i64) as u32,
            y.rem_euclid(self.height as i64) as u32,
        )
    }

    /// Cells within `radius` of `pos` on the torus.
    ///
    /// `moore = true` uses the square (Chebyshev) neighborhood, `false` the
    /// diamond (Manhattan) one.  Cells are deduplicated, so on grids smaller
    /// than the neighborhood a wrapped cell is reported once.
    pub fn neighborhood(&self, pos: Pos, radius: u32, moore: bool, include_center: bool) -> Vec<Pos> {
        let r = radius as i64;
        let mut out = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
        for dy in -r..=r {
            for dx in -r..=r {
                if !moore && dx.abs() + dy.abs() > r {
                    continue;
                }
                let cell = self.wrap(pos.x as i64 + dx, pos.y as i64 + dy);
                if !include_center && cell == pos {
                    continue;
                }
                if !out.contains(&cell) {
                    out.push(cell);
                }
            }
        }
        out
    }

    /// Workers in the cells returned by [`neighborhood`](Self::neighborhood).
    pub fn neighbors(&self, pos: Pos, radius: u32, moore: bool, include_center: bool) -> Vec<WorkerId> {
        self.neighborhood(pos, radius, moore, include_center)
            .into_iter()
            .flat_map(|cell| self.cell(cell).iter().copied())
            .collect()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    #[inline]
    fn cell_index(&self, pos: Pos) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    fn check_bounds(&self, pos: Pos) -> SpatialResult<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(SpatialError::OutOfBounds { pos, width: self.width, height: self.height })
        }
    }
}

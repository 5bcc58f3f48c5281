use std::collections::HashMap;

/// Integer cell coordinates of a position.
pub type CellKey = (i64, i64, i64);

/// Uniform spatial hash over indices into an external target list.
pub struct SpatialGrid {
    cell_size: f64,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub fn cell_of(&self, position: [f64; 3]) -> CellKey {
        (
            (position[0] / self.cell_size).floor() as i64,
            (position[1] / self.cell_size).floor() as i64,
            (position[2] / self.cell_size).floor() as i64,
        )
    }

    pub fn insert(&mut self, position: [f64; 3], index: usize) {
        let key = self.cell_of(position);
        self.cells.entry(key).or_default().push(index);
    }

    /// Indices stored in the 3×3×3 block around `position`'s cell, scanned
    /// `dx`, `dy`, `dz` from -1 to 1 and in insertion order within a cell.
    pub fn neighbors(&self, position: [f64; 3]) -> impl Iterator<Item = usize> + '_ {
        let (cx, cy, cz) = self.cell_of(position);
        (-1..=1_i64)
            .flat_map(move |dx| {
                (-1..=1_i64).flat_map(move |dy| (-1..=1_i64).map(move |dz| (dx, dy, dz)))
            })
            .filter_map(move |(dx, dy, dz)| {
                self.cells.get(&(
                    cx.saturating_add(dx),
                    cy.saturating_add(dy),
                    cz.saturating_add(dz),
                ))
            })
            .flat_map(|indices| indices.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

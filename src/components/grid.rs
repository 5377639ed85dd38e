//! Toroidal Grid
//!
//! Multi-occupancy 2D grid with wrap-around on both axes. The grid is a
//! pure lookup/placement structure; it never owns person lifetimes.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Component: a person's current cell on the grid
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Resource: toroidal grid holding zero or more entities per cell
#[derive(Resource, Debug)]
pub struct ToroidalGrid {
    width: u32,
    height: u32,
    cells: Vec<Vec<Entity>>,
}

impl ToroidalGrid {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![Vec::new(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, pos: GridPos) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Wrap raw coordinates onto the torus
    pub fn wrap(&self, x: i64, y: i64) -> GridPos {
        GridPos {
            x: x.rem_euclid(self.width as i64) as u32,
            y: y.rem_euclid(self.height as i64) as u32,
        }
    }

    /// The cells reachable from `pos` in one move, in a fixed scan order.
    /// With `diagonals` this is the 8-cell Moore neighborhood, otherwise
    /// the 4-cell von Neumann neighborhood. The center cell is excluded.
    /// On small grids the wrapped cells may coincide.
    pub fn neighborhood(&self, pos: GridPos, diagonals: bool) -> Vec<GridPos> {
        let mut cells = Vec::with_capacity(if diagonals { 8 } else { 4 });
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if !diagonals && dx != 0 && dy != 0 {
                    continue;
                }
                cells.push(self.wrap(pos.x as i64 + dx, pos.y as i64 + dy));
            }
        }
        cells
    }

    /// Place an entity on a cell
    pub fn place(&mut self, entity: Entity, pos: GridPos) {
        let idx = self.index(pos);
        self.cells[idx].push(entity);
    }

    /// Move an entity between cells. Arrival order within a cell is
    /// preserved so occupant listings stay deterministic.
    pub fn relocate(&mut self, entity: Entity, from: GridPos, to: GridPos) {
        let from_idx = self.index(from);
        if let Some(i) = self.cells[from_idx].iter().position(|e| *e == entity) {
            self.cells[from_idx].remove(i);
        }
        let to_idx = self.index(to);
        self.cells[to_idx].push(entity);
    }

    /// All entities currently on a cell
    pub fn occupants(&self, pos: GridPos) -> &[Entity] {
        let idx = self.index(pos);
        &self.cells[idx]
    }
}

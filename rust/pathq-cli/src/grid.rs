use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use pathq_core::engine::heuristics::{chebyshev, manhattan, octile};
use pathq_core::SearchSpace;

pub type Cell = (i64, i64);

// Fixed neighbor order for determinism: N, E, S, W, then NE, SE, SW, NW
const MOVES: [(i64, i64); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Which steps a grid search may take and what a diagonal step costs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Movement {
    /// N/E/S/W only, unit cost.
    #[default]
    Orthogonal,
    /// Eight directions, diagonals cost `sqrt(2)`.
    Octile,
    /// Eight directions, diagonals cost 1.
    Chebyshev,
}

impl Movement {
    fn directions(self) -> &'static [(i64, i64)] {
        match self {
            Movement::Orthogonal => &MOVES[..4],
            Movement::Octile | Movement::Chebyshev => &MOVES,
        }
    }
}

/// ASCII maze: `S` start, `G` goal, `#` wall, anything else walkable.
///
/// Rows may have different lengths; cells past the end of a row are walls.
/// A diagonal step needs both cells it squeezes between to be open.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: Vec<Vec<bool>>,
    pub start: Cell,
    pub goal: Cell,
    movement: Movement,
}

impl Grid {
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        let mut start = None;
        let mut goal = None;
        for (y, line) in text.lines().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (x, ch) in line.chars().enumerate() {
                let here = (x as i64, y as i64);
                match ch {
                    'S' if start.is_some() => bail!("second start marker at {:?}", here),
                    'G' if goal.is_some() => bail!("second goal marker at {:?}", here),
                    'S' => start = Some(here),
                    'G' => goal = Some(here),
                    _ => {}
                }
                row.push(ch != '#');
            }
            rows.push(row);
        }
        let start = start.context("grid has no start marker `S`")?;
        let goal = goal.context("grid has no goal marker `G`")?;
        Ok(Self {
            rows,
            start,
            goal,
            movement: Movement::default(),
        })
    }

    pub fn with_movement(mut self, movement: Movement) -> Self {
        self.movement = movement;
        self
    }

    pub fn movement(&self) -> Movement {
        self.movement
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parse grid {}", path.display()))
    }

    pub fn is_open(&self, (x, y): Cell) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(false)
    }

    /// The maze with `path` cells drawn as `*`, keeping `S` and `G`.
    pub fn render(&self, path: &[Cell]) -> String {
        let mut canvas: Vec<Vec<char>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|open| if *open { '.' } else { '#' }).collect())
            .collect();
        for &(x, y) in path {
            canvas[y as usize][x as usize] = '*';
        }
        canvas[self.start.1 as usize][self.start.0 as usize] = 'S';
        canvas[self.goal.1 as usize][self.goal.0 as usize] = 'G';
        let mut out = String::new();
        for row in canvas {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl SearchSpace for Grid {
    type Node = Cell;
    type Key = Cell;

    fn is_end(&self, node: &Cell) -> bool {
        *node == self.goal
    }

    fn neighbors(&self, &(x, y): &Cell) -> Vec<Cell> {
        self.movement
            .directions()
            .iter()
            .filter(|(dx, dy)| {
                *dx == 0 || *dy == 0 || (self.is_open((x + dx, y)) && self.is_open((x, y + dy)))
            })
            .map(|(dx, dy)| (x + dx, y + dy))
            .filter(|c| self.is_open(*c))
            .collect()
    }

    fn distance(&self, from: &Cell, to: &Cell) -> f64 {
        let diagonal = from.0 != to.0 && from.1 != to.1;
        match self.movement {
            Movement::Octile if diagonal => std::f64::consts::SQRT_2,
            _ => 1.0,
        }
    }

    fn heuristic(&self, node: &Cell) -> f64 {
        match self.movement {
            Movement::Orthogonal => manhattan(*node, self.goal, 1.0),
            Movement::Octile => octile(*node, self.goal, 1.0),
            Movement::Chebyshev => chebyshev(*node, self.goal, 1.0),
        }
    }

    fn key(&self, node: &Cell) -> Cell {
        *node
    }
}

//! Obstacle pair data structures.

use serde::Serialize;

/// Top-left anchored position in field pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Which end of an obstacle pair a pipe sprite forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipeHalf {
    /// Hangs from the ceiling; `y` is its bottom edge.
    Upper,
    /// Rises from the floor; `y` is its top edge.
    Lower,
}

impl PipeHalf {
    pub const BOTH: [PipeHalf; 2] = [PipeHalf::Upper, PipeHalf::Lower];
}

/// Upper and lower pipe forming one gap. Pairs are moved, never destroyed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstaclePair {
    pub id: usize,
    pub upper: Position,
    pub lower: Position,
    /// Set on first placement and never cleared.
    pub active: bool,
}

impl ObstaclePair {
    /// Unplaced pair parked at `start_x`.
    pub fn new(id: usize, start_x: f32) -> Self {
        Self {
            id,
            upper: Position::new(start_x, 0.0),
            lower: Position::new(start_x, 0.0),
            active: false,
        }
    }

    pub fn half(&self, half: PipeHalf) -> Position {
        match half {
            PipeHalf::Upper => self.upper,
            PipeHalf::Lower => self.lower,
        }
    }

    /// Shared left edge of both pipes.
    pub fn x(&self) -> f32 {
        self.upper.x
    }

    /// Height of the opening between the two pipes.
    pub fn gap(&self) -> f32 {
        self.lower.y - self.upper.y
    }

    pub fn right_edge(&self, half: PipeHalf, pipe_width: f32) -> f32 {
        self.half(half).x + pipe_width
    }

    pub fn translate(&mut self, dx: f32) {
        self.upper.x += dx;
        self.lower.x += dx;
    }
}

/// Values drawn for one placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub vertical_gap: u32,
    pub vertical_position: u32,
    pub horizontal_spacing: u32,
    /// The drawn gap did not fit between the margins and was shrunk.
    pub clamped: bool,
}

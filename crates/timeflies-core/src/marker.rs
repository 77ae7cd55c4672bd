//! Positioned letter markers.
//!
//! A [`Marker`] is one character of the display string pinned to the
//! position the pointer had when that character's delay elapsed.

use serde::{Deserialize, Serialize};

/// Point in view units.
///
/// View units are independent of the frontend. The terminal frontend maps one
/// cell to [`Position::CELL_WIDTH`] × [`Position::CELL_HEIGHT`] units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: u32,
    /// Vertical coordinate.
    pub y: u32,
}

impl Position {
    /// Width of one terminal cell in view units.
    pub const CELL_WIDTH: u32 = 10;
    /// Height of one terminal cell in view units.
    pub const CELL_HEIGHT: u32 = 20;

    /// Create a position from view units.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Position of the top-left corner of a terminal cell.
    pub fn from_cell(column: u16, row: u16) -> Self {
        Self { x: u32::from(column) * Self::CELL_WIDTH, y: u32::from(row) * Self::CELL_HEIGHT }
    }

    /// Terminal cell containing this position. Saturates at `u16::MAX`.
    pub fn to_cell(self) -> (u16, u16) {
        let column = (self.x / Self::CELL_WIDTH).min(u32::from(u16::MAX));
        let row = (self.y / Self::CELL_HEIGHT).min(u32::from(u16::MAX));
        (column as u16, row as u16)
    }
}

/// A tracked character and its sampled position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// The tracked character.
    pub ch: char,
    /// Pointer position sampled for this character.
    pub position: Position,
}

impl Marker {
    /// Create a marker.
    pub const fn new(ch: char, position: Position) -> Self {
        Self { ch, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_conversion_is_lossless_for_cell_origins() {
        let position = Position::from_cell(7, 3);
        assert_eq!(position, Position::new(70, 60));
        assert_eq!(position.to_cell(), (7, 3));
    }

    #[test]
    fn to_cell_truncates_inside_cell() {
        assert_eq!(Position::new(79, 59).to_cell(), (7, 2));
    }

    #[test]
    fn to_cell_saturates() {
        assert_eq!(Position::new(u32::MAX, u32::MAX).to_cell(), (u16::MAX, u16::MAX));
    }
}

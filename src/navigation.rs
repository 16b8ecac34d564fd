//! Keyboard focus movement over the month grid and between picker fields.

use std::str::FromStr;

use crate::types::{GridPos, MonthGrid, NavKey, PickerField};

impl FromStr for NavKey {
    type Err = String;

    /// Parse a DOM-style key code (`ArrowRight`, `Space`, ...) or a short alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "arrowright" | "right" => Ok(NavKey::ArrowRight),
            "arrowleft" | "left" => Ok(NavKey::ArrowLeft),
            "arrowup" | "up" => Ok(NavKey::ArrowUp),
            "arrowdown" | "down" => Ok(NavKey::ArrowDown),
            "space" | " " => Ok(NavKey::Space),
            "enter" | "return" => Ok(NavKey::Enter),
            _ => Err(format!("Unknown key: {}", s)),
        }
    }
}

impl NavKey {
    /// Space and Enter activate the focused cell instead of moving focus.
    pub fn is_activation(self) -> bool {
        matches!(self, NavKey::Space | NavKey::Enter)
    }
}

/// Where focus goes from `pos` when `key` is pressed.
///
/// - Right/Left walk along the row and wrap into the neighbouring row.
/// - Up/Down keep the column.
/// - Moves into an empty row, off the grid, or from a cell that is not
///   shown return `None`; activation keys never move focus.
pub fn move_focus(grid: &MonthGrid, pos: GridPos, key: NavKey) -> Option<GridPos> {
    grid.cell(pos)?;

    let target = match key {
        NavKey::ArrowRight => {
            if pos.col + 1 < grid.row(pos.row).len() {
                GridPos::new(pos.row, pos.col + 1)
            } else {
                GridPos::new(pos.row + 1, 0)
            }
        }
        NavKey::ArrowLeft => {
            if pos.col > 0 {
                GridPos::new(pos.row, pos.col - 1)
            } else {
                let prev = pos.row.checked_sub(1)?;
                GridPos::new(prev, grid.row(prev).len().checked_sub(1)?)
            }
        }
        NavKey::ArrowUp => GridPos::new(pos.row.checked_sub(1)?, pos.col),
        NavKey::ArrowDown => GridPos::new(pos.row + 1, pos.col),
        NavKey::Space | NavKey::Enter => return None,
    };

    grid.cell(target).map(|_| target)
}

/// Which picker part receives focus when `key` is pressed on `field`.
///
/// Focus moves left/right along Month, Day, Year, Button and stops at either end.
pub fn move_field_focus(field: PickerField, key: NavKey) -> Option<PickerField> {
    match (field, key) {
        (PickerField::Month, NavKey::ArrowRight) => Some(PickerField::Day),
        (PickerField::Day, NavKey::ArrowRight) => Some(PickerField::Year),
        (PickerField::Year, NavKey::ArrowRight) => Some(PickerField::Button),
        (PickerField::Day, NavKey::ArrowLeft) => Some(PickerField::Month),
        (PickerField::Year, NavKey::ArrowLeft) => Some(PickerField::Day),
        (PickerField::Button, NavKey::ArrowLeft) => Some(PickerField::Year),
        _ => None,
    }
}

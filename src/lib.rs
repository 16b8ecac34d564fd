//! Calendar and date picker logic for UI front-ends.
//!
//! Features:
//! - Six-week month grid with in-month and before/after-selection flags
//! - Bounded year window around today
//! - Clamped year/month/day field editing with debounced text input
//! - Keyboard focus movement over the grid and between picker fields
//! - Terminal rendering of the grid

pub mod args;
pub mod calendar;
pub mod debounce;
pub mod fields;
pub mod formatter;
pub mod navigation;
pub mod picker;
pub mod types;
pub mod years;

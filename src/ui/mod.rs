pub mod diff;
pub mod theme;

#![allow(dead_code)] // not every test file uses every helper

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;

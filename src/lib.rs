//! An Intcode computer and the companion pieces its puzzles lean on:
//! grid coordinates, an n-body simulation, and input plumbing.

pub mod computer;
pub mod coord;
pub mod moons;
pub mod puzzle;

pub use computer::Computer;

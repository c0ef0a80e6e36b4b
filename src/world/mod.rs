//! World module - declarative floorplans
//!
//! - Stacked floors, each with its own ceiling height
//! - Floor slabs and walls described by size and endpoints
//! - Horizontal-plane math shared with the generators

mod demo;
mod floorplan;
mod math;

pub use demo::*;
pub use floorplan::*;
pub use math::*;

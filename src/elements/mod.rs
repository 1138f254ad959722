//! Laminate building blocks: materials, plies and ply stacks

mod laminate;
mod material;
mod ply;

pub use laminate::Laminate;
pub use material::{Material, MaterialLibrary, DEFAULT_DENSITY};
pub use ply::Ply;

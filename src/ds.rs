/// Square matrix indexed by grid position
mod matrix;

pub use matrix::{Matrix, Pos};

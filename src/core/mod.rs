pub mod error;
pub mod geometry;
pub mod index;
pub mod model;
pub mod ordering;

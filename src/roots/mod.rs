mod polish;
mod solver;
mod trig;

pub use solver::{real_roots_cubic, real_roots_quadratic, real_roots_quartic};

mod proportional;

pub use proportional::ProportionalGenerator;

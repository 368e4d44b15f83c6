pub mod generators;
mod measurement;
mod measurement_stream;

pub use measurement::Measurement;
pub use measurement_stream::MeasurementStream;

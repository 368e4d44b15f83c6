use std::io::Error;

use crate::streams::Measurement;

/// An ordered, possibly unbounded source of measurement pairs.
pub trait MeasurementStream {
    fn has_more_measurements(&self) -> bool;

    fn next_measurement(&mut self) -> Option<Measurement>;

    /// Rewinds the stream to its beginning. Seeded generators replay the
    /// exact same sequence after a restart.
    fn restart(&mut self) -> Result<(), Error>;
}

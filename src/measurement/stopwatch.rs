//! Wall-clock timing of single probe executions.

use std::time::Instant;

use crate::error::Error;

use super::catch_probe;

/// Time one probe execution, returning elapsed milliseconds.
///
/// Synchronous wall-clock timing; the probe may block for as long as it
/// likes and may use parallelism internally, both are opaque here.
pub fn elapsed_ms(probe: &mut impl FnMut()) -> f64 {
    let start = Instant::now();
    probe();
    start.elapsed().as_secs_f64() * 1e3
}

/// Run the probe exactly once and return its elapsed milliseconds.
///
/// # Errors
///
/// [`Error::ProbeExecution`] when the probe panics.
pub fn measure_once(mut probe: impl FnMut()) -> Result<f64, Error> {
    catch_probe(|| elapsed_ms(&mut probe))
}

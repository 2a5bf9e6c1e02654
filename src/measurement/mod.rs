//! Probe execution: timing, the steady-state inner loop, and the memory
//! sensor.
//!
//! A probe is any `FnMut()` closure executed purely for its timing or memory
//! side effects. A panic inside a probe is caught here at the measurement
//! boundary and converted into an error, so it can abort a run cleanly
//! instead of unwinding through the caller.

mod memory;
mod steady;
mod stopwatch;

pub use memory::peak_working_set_bytes;
pub use steady::run_until_steady;
pub use stopwatch::{elapsed_ms, measure_once};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::Error;

/// Run a closure, converting a panic into [`Error::ProbeExecution`].
pub(crate) fn catch_probe<T>(f: impl FnOnce() -> T) -> Result<T, Error> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .map_err(|payload| Error::ProbeExecution(panic_message(payload.as_ref())))
}

/// Best-effort extraction of a panic payload message.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "probe panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catch_probe_passes_value_through() {
        assert_eq!(catch_probe(|| 41 + 1).unwrap(), 42);
    }

    #[test]
    fn test_catch_probe_reports_str_payload() {
        let err = catch_probe(|| panic!("broken pipe")).unwrap_err();
        assert_eq!(err, Error::ProbeExecution("broken pipe".into()));
    }

    #[test]
    fn test_catch_probe_reports_formatted_payload() {
        let code = 7;
        let err = catch_probe(|| panic!("exit code {code}")).unwrap_err();
        assert_eq!(err, Error::ProbeExecution("exit code 7".into()));
    }
}

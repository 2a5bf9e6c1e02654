//! Peak working-set sensor.
//!
//! Reads the process-wide resident-set high-water mark, which is
//! monotonically non-decreasing over the life of the process. Linux exposes
//! it as the `VmHWM` line of `/proc/self/status`; on other platforms the
//! sensor reports an error and the Memory methodology fails the run.

use crate::error::Error;

/// Peak resident/working-set size of the current process, in bytes.
///
/// # Errors
///
/// [`Error::ProbeExecution`] when the sensor cannot be read or parsed, or
/// on platforms without a supported sensor.
#[cfg(target_os = "linux")]
pub fn peak_working_set_bytes() -> Result<u64, Error> {
    let status = std::fs::read_to_string("/proc/self/status")
        .map_err(|err| Error::ProbeExecution(format!("cannot read /proc/self/status: {err}")))?;
    parse_vm_hwm(&status)
}

/// Unsupported-platform fallback; always errors so a Memory run fails
/// cleanly instead of reporting zeros.
#[cfg(not(target_os = "linux"))]
pub fn peak_working_set_bytes() -> Result<u64, Error> {
    Err(Error::ProbeExecution(
        "peak working-set sensor is only supported on Linux".into(),
    ))
}

#[cfg(target_os = "linux")]
fn parse_vm_hwm(status: &str) -> Result<u64, Error> {
    for line in status.lines() {
        if let Some(rest) = line.strip_prefix("VmHWM:") {
            // Format: "VmHWM:      1234 kB"
            let kb: u64 = rest
                .split_whitespace()
                .next()
                .and_then(|v| v.parse().ok())
                .ok_or_else(|| {
                    Error::ProbeExecution(format!("malformed VmHWM line: {line:?}"))
                })?;
            return Ok(kb * 1024);
        }
    }
    Err(Error::ProbeExecution(
        "VmHWM not present in /proc/self/status".into(),
    ))
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vm_hwm() {
        let status = "Name:\tsettle\nVmPeak:\t  200000 kB\nVmHWM:\t   12345 kB\nThreads:\t1\n";
        assert_eq!(parse_vm_hwm(status).unwrap(), 12345 * 1024);
    }

    #[test]
    fn test_parse_missing_line_fails() {
        assert!(parse_vm_hwm("Name:\tsettle\n").is_err());
    }

    #[test]
    fn test_sensor_reads_positive_and_monotonic() {
        let before = peak_working_set_bytes().unwrap();
        assert!(before > 0);

        // Touch a buffer large enough to move the high-water mark, then
        // confirm the sensor never goes backwards.
        let buf = vec![1u8; 8 * 1024 * 1024];
        std::hint::black_box(&buf);
        drop(buf);

        let after = peak_working_set_bytes().unwrap();
        assert!(after >= before);
    }
}

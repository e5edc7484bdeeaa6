use std::path::Path;

use crate::types::Probe;

/// Check whether `path` exists.
///
/// A missing path is a normal outcome ([`Probe::Absent`]). Only genuine I/O
/// failures (permissions, broken mounts) are returned as errors.
pub fn probe(path: &Path) -> std::io::Result<Probe> {
    match std::fs::metadata(path) {
        Ok(_) => Ok(Probe::Present),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Probe::Absent),
        Err(e) => Err(e),
    }
}

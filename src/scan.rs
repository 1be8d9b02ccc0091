//! Directory scanning for an entry-point-bearing assembly.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::formats::pe::verdict::InspectionVerdict;
use crate::inspect_file;
use crate::io::error::IoError;

/// Scan the top level of `dir` (no recursion) for `.dll`/`.exe` files and
/// return the first verdict that declares an entry point; if none does, the
/// first verdict produced. Candidates are visited in name order so the
/// result is stable across runs. Files that fail inspection are logged and
/// skipped; if nothing could be inspected the scan fails with
/// [`Error::NoAssemblyFound`].
pub fn scan_directory<P: AsRef<Path>>(dir: P) -> Result<InspectionVerdict> {
    let dir = dir.as_ref();

    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(IoError::from)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_assembly_extension(path))
        .collect();
    candidates.sort();

    info!(
        directory = %dir.display(),
        count = candidates.len(),
        "scanning for assemblies"
    );

    let mut first: Option<InspectionVerdict> = None;
    for candidate in &candidates {
        match inspect_file(candidate) {
            Ok(verdict) => {
                if verdict.has_entry_point {
                    info!(path = %candidate.display(), "found assembly with entry point");
                    return Ok(verdict);
                }
                first.get_or_insert(verdict);
            }
            Err(err) => {
                warn!(path = %candidate.display(), %err, "skipping candidate");
            }
        }
    }

    first.ok_or_else(|| Error::NoAssemblyFound {
        dir: dir.to_path_buf(),
    })
}

fn has_assembly_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("dll") || ext.eq_ignore_ascii_case("exe"))
}

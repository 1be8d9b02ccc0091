//! Determine whether a managed (.NET) assembly declares a program entry
//! point.
//!
//! The inspector walks a PE/COFF image's fixed header chain, from the DOS
//! stub through the optional header to the first section, and parses the
//! 24-byte ECMA-335 CLI header there to read the entry-point token and
//! image flags. The result is a structured [`InspectionVerdict`]; images
//! whose CLI header cannot be read fall back to the optional header's
//! `AddressOfEntryPoint` field, with the degraded provenance recorded on the
//! verdict.
//!
//! ```no_run
//! let verdict = clrprobe::inspect_file("Game.dll")?;
//! if verdict.has_entry_point {
//!     println!("{:?}", verdict.entry_point_token);
//! }
//! # Ok::<(), clrprobe::Error>(())
//! ```

pub mod error;
pub mod formats;
pub mod io;
pub mod logging;
pub mod scan;

pub use error::Error;
pub use formats::pe::types::PeError;
pub use formats::pe::verdict::InspectionVerdict;
pub use formats::pe::{inspect, Inspector};

use std::path::Path;

/// Inspect the image at `path`, loading it through the bounded reader.
pub fn inspect_file<P: AsRef<Path>>(path: P) -> error::Result<InspectionVerdict> {
    let reader = io::BoundedReader::open(path)?;
    let verdict = formats::pe::inspect(reader.data())?;
    Ok(verdict)
}

//! Managed-assembly entry-point inspection over PE/COFF images.
//!
//! The pipeline walks the fixed header chain (DOS stub, PE signature,
//! optional-header magic, CLI data directory, first section, CLI header) and
//! reports whether the image declares a managed entry point. Data flows
//! strictly forward; one inspection call owns all of its state.

pub mod cli;
pub mod headers;
pub mod reader;
pub mod types;
pub mod verdict;

use tracing::{debug, warn};

use cli::parse_cli_header;
use headers::*;
use types::*;
use verdict::InspectionVerdict;

/// Single-image inspector over an immutable byte buffer.
///
/// The buffer is never mutated, so concurrent inspections of the same bytes
/// are safe without coordination.
pub struct Inspector<'data> {
    data: &'data [u8],
}

impl<'data> Inspector<'data> {
    pub fn new(data: &'data [u8]) -> Self {
        Self { data }
    }

    /// Run the full inspection pipeline.
    ///
    /// Terminal classifications ([`PeError::NotAPeFile`],
    /// [`PeError::NotManagedAssembly`], [`PeError::UnsupportedMagic`])
    /// propagate as errors. A structural failure while reading CLI-specific
    /// structures selects the legacy `AddressOfEntryPoint` strategy instead,
    /// producing a verdict tagged `used_fallback`.
    pub fn inspect(&self) -> Result<InspectionVerdict> {
        let optional_offset = self.validate_pe()?;

        if !self.has_cli_header()? {
            return Err(PeError::NotManagedAssembly);
        }

        match self.extract_cli_header() {
            Ok(header) => {
                debug!(
                    token = header.entry_point_token,
                    flags = header.flags,
                    runtime_major = header.major_runtime_version,
                    runtime_minor = header.minor_runtime_version,
                    "CLI header parsed"
                );
                Ok(InspectionVerdict::from_cli_header(&header))
            }
            Err(err @ (PeError::Truncated { .. } | PeError::RvaOutOfSection { .. })) => {
                warn!(%err, "CLI header unreadable, falling back to AddressOfEntryPoint");
                Ok(self.fallback_verdict(optional_offset))
            }
            Err(err) => Err(err),
        }
    }

    /// DOS and PE signature validation. Every failure in this stage, short
    /// input included, is the "not a PE file" classification. Returns the
    /// optional-header offset.
    fn validate_pe(&self) -> Result<usize> {
        let dos = parse_dos_header(self.data).map_err(|_| PeError::NotAPeFile)?;
        locate_optional_header(self.data, dos.e_lfanew).map_err(|_| PeError::NotAPeFile)
    }

    /// Lightweight managed-image probe: re-walks DOS → PE → magic → CLI
    /// directory and answers only whether the directory RVA is non-zero.
    fn has_cli_header(&self) -> Result<bool> {
        let dos = parse_dos_header(self.data)?;
        let optional_offset = locate_optional_header(self.data, dos.e_lfanew)?;
        let magic = read_optional_magic(self.data, optional_offset)?;
        let directory = read_cli_directory(self.data, optional_offset, magic)?;
        Ok(directory.virtual_address != 0)
    }

    /// The primary strategy: locate and parse the 24-byte CLI header.
    fn extract_cli_header(&self) -> Result<CliHeader> {
        let dos = parse_dos_header(self.data)?;
        let optional_offset = locate_optional_header(self.data, dos.e_lfanew)?;
        let magic = read_optional_magic(self.data, optional_offset)?;
        let directory = read_cli_directory(self.data, optional_offset, magic)?;

        let section = read_first_section(self.data, optional_offset, magic)?;
        let file_offset = section
            .rva_to_offset(directory.virtual_address)
            .ok_or(PeError::RvaOutOfSection {
                rva: directory.virtual_address,
            })?;
        debug!(
            rva = directory.virtual_address,
            file_offset,
            section = %section.name(),
            "CLI header located"
        );

        parse_cli_header(self.data, file_offset)
    }

    /// The degraded strategy: the optional header's `AddressOfEntryPoint`
    /// alone. An unreadable field reports no entry point rather than failing
    /// the inspection a second time.
    fn fallback_verdict(&self, optional_offset: usize) -> InspectionVerdict {
        match read_entry_point_rva(self.data, optional_offset) {
            Ok(rva) => InspectionVerdict::from_native_entry_point(rva),
            Err(err) => {
                warn!(%err, "AddressOfEntryPoint unreadable");
                InspectionVerdict::from_native_entry_point(0)
            }
        }
    }
}

/// Inspect one in-memory image.
pub fn inspect(data: &[u8]) -> Result<InspectionVerdict> {
    Inspector::new(data).inspect()
}

//! Core PE/CLI data types and the inspection error taxonomy.

use thiserror::Error;

// PE constants
pub const DOS_SIGNATURE: [u8; 2] = *b"MZ";
pub const PE_SIGNATURE: [u8; 4] = *b"PE\0\0";
pub const PE32_MAGIC: u16 = 0x10B;
pub const PE32PLUS_MAGIC: u16 = 0x20B;

/// Size of the legacy DOS header; `e_lfanew` occupies its last four bytes.
pub const DOS_HEADER_SIZE: usize = 64;
pub const E_LFANEW_OFFSET: usize = 60;
/// Size of the COFF file header, skipped whole: none of its fields are used.
pub const COFF_HEADER_SIZE: usize = 20;

/// Offset of `AddressOfEntryPoint` from the optional-header start.
pub const ENTRY_POINT_FIELD_OFFSET: usize = 16;

// Fixed offsets from the optional-header start, per magic. PE32+ widens the
// address-sized fields by four bytes each, shifting everything after them.
pub const CLI_DIRECTORY_OFFSET_PE32: usize = 208;
pub const CLI_DIRECTORY_OFFSET_PE32PLUS: usize = 224;
pub const FIRST_SECTION_OFFSET_PE32: usize = 240;
pub const FIRST_SECTION_OFFSET_PE32PLUS: usize = 272;

/// Section header record size.
pub const SECTION_HEADER_SIZE: usize = 40;

/// Number of CLI header bytes consumed; `cb` usually reports 72 but only the
/// fixed prefix up to the entry-point token is read.
pub const CLI_HEADER_SIZE: usize = 24;

/// CLI flags bit 0: the image contains IL code only.
pub const COMIMAGE_FLAGS_ILONLY: u32 = 0x0000_0001;

/// Inspection error taxonomy.
///
/// The first three variants are terminal classifications: they describe the
/// input, not a parsing accident, and are surfaced to callers as-is.
/// `Truncated` and `RvaOutOfSection` are structural failures; when they occur
/// after the managed-image probe has succeeded, the inspector switches to the
/// legacy `AddressOfEntryPoint` strategy instead of giving up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeError {
    #[error("not a PE file")]
    NotAPeFile,
    #[error("not a managed assembly")]
    NotManagedAssembly,
    #[error("unsupported optional header magic: {0:#06x}")]
    UnsupportedMagic(u16),
    #[error("truncated image: {wanted} bytes at offset {offset:#x} exceed the input")]
    Truncated { offset: usize, wanted: usize },
    #[error("RVA {rva:#x} lies outside the first section")]
    RvaOutOfSection { rva: u32 },
}

pub type Result<T> = std::result::Result<T, PeError>;

/// Optional-header format variant. A closed enumeration: the magic selects
/// fixed byte offsets, nothing more, so no dispatch beyond these two methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalMagic {
    Pe32,
    Pe32Plus,
}

impl OptionalMagic {
    pub fn from_u16(value: u16) -> Result<Self> {
        match value {
            PE32_MAGIC => Ok(Self::Pe32),
            PE32PLUS_MAGIC => Ok(Self::Pe32Plus),
            other => Err(PeError::UnsupportedMagic(other)),
        }
    }

    /// Offset of the CLI (COM descriptor) data-directory entry from the
    /// optional-header start.
    pub fn cli_directory_offset(self) -> usize {
        match self {
            Self::Pe32 => CLI_DIRECTORY_OFFSET_PE32,
            Self::Pe32Plus => CLI_DIRECTORY_OFFSET_PE32PLUS,
        }
    }

    /// Offset of the first section-header record from the optional-header
    /// start.
    pub fn first_section_offset(self) -> usize {
        match self {
            Self::Pe32 => FIRST_SECTION_OFFSET_PE32,
            Self::Pe32Plus => FIRST_SECTION_OFFSET_PE32PLUS,
        }
    }
}

/// The two DOS-header fields the inspector consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DosHeader {
    pub e_magic: [u8; 2],
    /// File offset of the PE signature.
    pub e_lfanew: u32,
}

/// A data-directory entry. An all-zero CLI entry means the image carries no
/// managed metadata; that is a classification, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataDirectory {
    pub virtual_address: u32,
    pub size: u32,
}

/// The first section header's translation-relevant fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    pub name: [u8; 8],
    pub virtual_size: u32,
    pub virtual_address: u32,
    pub size_of_raw_data: u32,
    pub pointer_to_raw_data: u32,
}

impl SectionHeader {
    pub fn name(&self) -> String {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(8);
        String::from_utf8_lossy(&self.name[..end]).to_string()
    }

    pub fn contains_rva(&self, rva: u32) -> bool {
        let size = self.virtual_size.max(self.size_of_raw_data);
        rva >= self.virtual_address && rva - self.virtual_address < size
    }

    /// Linear RVA → file-offset translation, valid only inside this section's
    /// virtual range. Out-of-range RVAs yield `None` rather than an offset
    /// into unrelated bytes.
    pub fn rva_to_offset(&self, rva: u32) -> Option<usize> {
        if !self.contains_rva(rva) {
            return None;
        }
        let delta = rva - self.virtual_address;
        Some(self.pointer_to_raw_data as usize + delta as usize)
    }
}

/// The fixed 24-byte prefix of the ECMA-335 CLI header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliHeader {
    /// Declared header size; accepted unvalidated.
    pub cb: u32,
    pub major_runtime_version: u16,
    pub minor_runtime_version: u16,
    pub metadata_rva: u32,
    pub metadata_size: u32,
    pub flags: u32,
    /// Opaque metadata-table token; zero means no entry point is declared.
    pub entry_point_token: u32,
}

impl CliHeader {
    pub fn has_entry_point(&self) -> bool {
        self.entry_point_token != 0
    }

    pub fn is_il_only(&self) -> bool {
        (self.flags & COMIMAGE_FLAGS_ILONLY) != 0
    }
}

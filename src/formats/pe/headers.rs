//! PE header-chain parsing: DOS stub, PE signature, optional-header magic,
//! CLI data directory, first section header.
//!
//! Each function consumes the offset produced by its predecessor and yields
//! the next one; nothing here keeps state between calls.

use tracing::trace;

use crate::formats::pe::reader::ImageReader;
use crate::formats::pe::types::*;

/// Parse the legacy DOS header: require the `MZ` signature and extract
/// `e_lfanew`, the file offset of the PE signature.
///
/// Short input and a mismatched signature are distinct errors here; callers
/// collapse both into the "not a PE file" classification.
pub fn parse_dos_header(data: &[u8]) -> Result<DosHeader> {
    if data.len() < DOS_HEADER_SIZE {
        return Err(PeError::Truncated {
            offset: 0,
            wanted: DOS_HEADER_SIZE,
        });
    }
    if data[..2] != DOS_SIGNATURE {
        return Err(PeError::NotAPeFile);
    }

    let mut reader = ImageReader::new(data);
    let e_lfanew = reader.read_u32_le_at(E_LFANEW_OFFSET)?;
    trace!(e_lfanew, "DOS header parsed");

    Ok(DosHeader {
        e_magic: DOS_SIGNATURE,
        e_lfanew,
    })
}

/// Require the literal `PE\0\0` at `e_lfanew`, skip the 20-byte COFF file
/// header whole, and return the optional-header offset.
pub fn locate_optional_header(data: &[u8], e_lfanew: u32) -> Result<usize> {
    let mut reader = ImageReader::new(data);
    reader.seek(e_lfanew as usize)?;

    let signature = reader.read_exact(4)?;
    if signature != PE_SIGNATURE {
        return Err(PeError::NotAPeFile);
    }

    reader.skip(COFF_HEADER_SIZE)?;
    Ok(reader.position())
}

/// Read the 2-byte magic that distinguishes the PE32 and PE32+ layouts. The
/// value fixes every subsequent field offset.
pub fn read_optional_magic(data: &[u8], optional_offset: usize) -> Result<OptionalMagic> {
    let mut reader = ImageReader::new(data);
    reader.seek(optional_offset)?;
    OptionalMagic::from_u16(reader.read_u16_le()?)
}

/// Read the CLI data-directory entry at its magic-selected offset. A zero
/// RVA is returned as-is: it means the image carries no managed metadata.
pub fn read_cli_directory(
    data: &[u8],
    optional_offset: usize,
    magic: OptionalMagic,
) -> Result<DataDirectory> {
    let mut reader = ImageReader::new(data);
    reader.seek(optional_offset + magic.cli_directory_offset())?;

    let directory = DataDirectory {
        virtual_address: reader.read_u32_le()?,
        size: reader.read_u32_le()?,
    };
    trace!(
        rva = directory.virtual_address,
        size = directory.size,
        "CLI data directory read"
    );
    Ok(directory)
}

/// Read the first section-header record: name, virtual size, virtual
/// address, raw size, raw offset, in declared order. Only the first section
/// is consulted for RVA translation.
pub fn read_first_section(
    data: &[u8],
    optional_offset: usize,
    magic: OptionalMagic,
) -> Result<SectionHeader> {
    let mut reader = ImageReader::new(data);
    reader.seek(optional_offset + magic.first_section_offset())?;

    let mut name = [0u8; 8];
    name.copy_from_slice(reader.read_exact(8)?);

    Ok(SectionHeader {
        name,
        virtual_size: reader.read_u32_le()?,
        virtual_address: reader.read_u32_le()?,
        size_of_raw_data: reader.read_u32_le()?,
        pointer_to_raw_data: reader.read_u32_le()?,
    })
}

/// Read the optional header's `AddressOfEntryPoint` field, the legacy
/// native-entry-point signal used when the CLI header is unreadable.
pub fn read_entry_point_rva(data: &[u8], optional_offset: usize) -> Result<u32> {
    let mut reader = ImageReader::new(data);
    reader.read_u32_le_at(optional_offset + ENTRY_POINT_FIELD_OFFSET)
}

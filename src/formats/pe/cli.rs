//! The fixed 24-byte CLI (ECMA-335) header.

use crate::formats::pe::reader::ImageReader;
use crate::formats::pe::types::{CliHeader, Result};

/// Parse the CLI header at a translated file offset.
///
/// Reads exactly the fixed prefix up to the entry-point token. `cb` is not
/// validated; a non-standard declared size is accepted and ignored, matching
/// the fixed-offset read strategy used for the rest of the header chain.
pub fn parse_cli_header(data: &[u8], file_offset: usize) -> Result<CliHeader> {
    let mut reader = ImageReader::new(data);
    reader.seek(file_offset)?;

    Ok(CliHeader {
        cb: reader.read_u32_le()?,
        major_runtime_version: reader.read_u16_le()?,
        minor_runtime_version: reader.read_u16_le()?,
        metadata_rva: reader.read_u32_le()?,
        metadata_size: reader.read_u32_le()?,
        flags: reader.read_u32_le()?,
        entry_point_token: reader.read_u32_le()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::pe::types::PeError;

    fn put_u16(data: &mut [u8], offset: usize, value: u16) {
        data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    fn put_u32(data: &mut [u8], offset: usize, value: u32) {
        data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    #[test]
    fn test_parse_cli_header() {
        let mut data = vec![0u8; 0x80];
        let offset = 0x40;
        put_u32(&mut data, offset, 72);
        put_u16(&mut data, offset + 4, 2);
        put_u16(&mut data, offset + 6, 5);
        put_u32(&mut data, offset + 8, 0x2050);
        put_u32(&mut data, offset + 12, 0x0400);
        put_u32(&mut data, offset + 16, 0x0000_0003);
        put_u32(&mut data, offset + 20, 0x0600_0001);

        let header = parse_cli_header(&data, offset).unwrap();
        assert_eq!(header.cb, 72);
        assert_eq!(header.major_runtime_version, 2);
        assert_eq!(header.minor_runtime_version, 5);
        assert_eq!(header.metadata_rva, 0x2050);
        assert_eq!(header.metadata_size, 0x0400);
        assert_eq!(header.flags, 3);
        assert_eq!(header.entry_point_token, 0x0600_0001);
        assert!(header.has_entry_point());
        assert!(header.is_il_only());
    }

    #[test]
    fn test_nonstandard_cb_is_accepted() {
        let mut data = vec![0u8; 0x40];
        put_u32(&mut data, 0, 16); // smaller than the real structure
        put_u32(&mut data, 20, 0x0600_0002);

        let header = parse_cli_header(&data, 0).unwrap();
        assert_eq!(header.cb, 16);
        assert_eq!(header.entry_point_token, 0x0600_0002);
    }

    #[test]
    fn test_truncated_header() {
        let data = vec![0u8; 0x50];
        // 20 of the 24 bytes available
        assert!(matches!(
            parse_cli_header(&data, 0x40),
            Err(PeError::Truncated { .. })
        ));
    }
}

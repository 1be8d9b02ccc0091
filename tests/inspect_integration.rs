//! End-to-end inspection behavior over synthetic images.

mod common;

use clrprobe::{inspect, PeError};
use common::*;

#[test]
fn rejects_buffers_without_mz() {
    assert_eq!(inspect(b"ELF is not PE"), Err(PeError::NotAPeFile));
    assert_eq!(inspect(b""), Err(PeError::NotAPeFile));
    assert_eq!(inspect(b"M"), Err(PeError::NotAPeFile));
    // 64+ bytes of non-PE content
    assert_eq!(inspect(&[0x7F; 512]), Err(PeError::NotAPeFile));
}

#[test]
fn classifies_native_image_as_not_managed() {
    let verdict = inspect(&native_image(PE32));
    assert_eq!(verdict, Err(PeError::NotManagedAssembly));
}

#[test]
fn reports_entry_point_token() {
    let data = managed_image(PE32, 0x0600_0001, 0x1);
    let verdict = inspect(&data).unwrap();

    assert!(verdict.has_entry_point);
    assert_eq!(verdict.entry_point_token.as_deref(), Some("0x6000001"));
    assert_eq!(verdict.flags.as_deref(), Some("0x1"));
    assert_eq!(verdict.is_il_only, Some(true));
    assert!(!verdict.used_fallback);
}

#[test]
fn reports_library_without_entry_point() {
    let data = managed_image(PE32, 0, 0x1);
    let verdict = inspect(&data).unwrap();

    assert!(!verdict.has_entry_point);
    assert_eq!(verdict.entry_point_token.as_deref(), Some("0x0"));
    assert!(!verdict.used_fallback);
}

#[test]
fn inspection_is_idempotent() {
    let data = managed_image(PE32, 0x0600_002A, 0x3);

    let first = inspect(&data).unwrap();
    let second = inspect(&data).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn truncation_at_pe_signature_is_not_a_pe_file() {
    let full = native_image(PE32);
    // Signature present, nothing after it
    let cut = &full[..E_LFANEW + 4];
    assert_eq!(inspect(cut), Err(PeError::NotAPeFile));
}

#[test]
fn pe32_and_pe32plus_yield_equivalent_verdicts() {
    let pe32 = managed_image(PE32, 0x0600_0007, 0x1);
    let pe32plus = managed_image(PE32PLUS, 0x0600_0007, 0x1);

    let v32 = inspect(&pe32).unwrap();
    let v64 = inspect(&pe32plus).unwrap();
    assert_eq!(v32, v64);
    assert_eq!(v32.entry_point_token.as_deref(), Some("0x6000007"));
}

#[test]
fn stray_cli_rva_uses_fallback() {
    let data = managed_image_with_stray_rva(PE32);
    let verdict = inspect(&data).unwrap();

    assert!(verdict.used_fallback);
    assert!(verdict.has_entry_point); // AddressOfEntryPoint is nonzero
    assert_eq!(verdict.entry_point_token, None);
    assert_eq!(verdict.flags, None);
    assert_eq!(verdict.is_il_only, None);
}

#[test]
fn stray_cli_rva_with_zero_native_entry_point() {
    let mut data = managed_image_with_stray_rva(PE32);
    put_u32(&mut data, OPTIONAL_OFFSET + 16, 0);

    let verdict = inspect(&data).unwrap();
    assert!(verdict.used_fallback);
    assert!(!verdict.has_entry_point);
}

#[test]
fn truncated_cli_header_uses_fallback() {
    let full = managed_image(PE32, 0x0600_0001, 0x1);
    // Keep the headers and the CLI directory but cut the buffer before the
    // section's raw data, so the CLI header read runs out of input.
    let cut = &full[..SECTION_RAW_OFFSET as usize + 8];

    let verdict = inspect(cut).unwrap();
    assert!(verdict.used_fallback);
    assert!(verdict.has_entry_point);
}

#[test]
fn unsupported_magic_is_terminal() {
    let mut data = managed_image(PE32, 0x0600_0001, 0x1);
    put_u16(&mut data, OPTIONAL_OFFSET, 0x107); // ROM image magic
    assert_eq!(inspect(&data), Err(PeError::UnsupportedMagic(0x107)));
}

#[test]
fn verdict_json_shape() {
    let data = managed_image(PE32, 0x0600_0001, 0x1);
    let verdict = inspect(&data).unwrap();
    let json: serde_json::Value = serde_json::to_value(&verdict).unwrap();

    assert_eq!(json["has_entry_point"], true);
    assert_eq!(json["entry_point_token"], "0x6000001");
    assert_eq!(json["is_il_only"], true);
    assert_eq!(json["used_fallback"], false);
}

//! The inspection result record, the only value that leaves the pipeline.

use serde::{Deserialize, Serialize};

use crate::formats::pe::types::CliHeader;

/// Structured verdict for one image.
///
/// `used_fallback` records provenance: `false` means the CLI header itself
/// was parsed, `true` means only the optional header's `AddressOfEntryPoint`
/// could be consulted, which cannot distinguish a managed entry point from a
/// native loader stub. Callers can weight confidence accordingly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionVerdict {
    pub has_entry_point: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_il_only: Option<bool>,
    #[serde(default)]
    pub used_fallback: bool,
}

impl InspectionVerdict {
    /// Verdict from a fully parsed CLI header.
    pub fn from_cli_header(header: &CliHeader) -> Self {
        Self {
            has_entry_point: header.has_entry_point(),
            entry_point_token: Some(format!("{:#x}", header.entry_point_token)),
            flags: Some(format!("{:#x}", header.flags)),
            is_il_only: Some(header.is_il_only()),
            used_fallback: false,
        }
    }

    /// Degraded-mode verdict from the optional header's
    /// `AddressOfEntryPoint` field alone.
    pub fn from_native_entry_point(address_of_entry_point: u32) -> Self {
        Self {
            has_entry_point: address_of_entry_point != 0,
            entry_point_token: None,
            flags: None,
            is_il_only: None,
            used_fallback: true,
        }
    }
}

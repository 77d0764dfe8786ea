//! Ordered value tables used by the sampler
//!
//! Every table is 0-indexed and ordered. Sampling "below K" always means a
//! uniform pick among the first K entries, so the order of each table is part
//! of the output contract.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Burst lengths (contiguous accesses per transaction)
pub const BURST_LENS: [u32; 6] = [4, 8, 16, 32, 64, 128];

/// Compute-bound factors
pub const CB_FACTORS: [u32; 6] = [1, 2, 4, 8, 16, 32];

/// Reuse factors
///
/// Single-valued on purpose: the harness parser expects the column.
pub const REUSE_FACTORS: [u32; 1] = [1];

/// Load/store ratios
pub const LD_ST_RATIOS: [u32; 3] = [1, 2, 4];

/// Stride lengths for strided access
pub const STRIDE_LENS: [u32; 5] = [32, 64, 128, 256, 512];

/// In-place flag values
pub const IN_PLACE_FLAGS: [u32; 2] = [0, 1];

/// Lookup of a value that is not a member of its table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{value} is not a member of the {table} table")]
pub struct UnknownValue {
    /// Name of the table that was searched
    pub table: &'static str,
    /// Offending value, rendered as text
    pub value: String,
}

/// Position of `value` in `table`
///
/// Fails with [`UnknownValue`] when the value is absent.
pub fn index_of(table_name: &'static str, table: &[u32], value: u32) -> Result<usize, UnknownValue> {
    table
        .iter()
        .position(|&v| v == value)
        .ok_or_else(|| UnknownValue {
            table: table_name,
            value: value.to_string(),
        })
}

/// Block size label of a thread group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SizeLabel {
    K1,
    K2,
    K4,
    K8,
    K16,
    K32,
    K64,
    K128,
    K256,
    K512,
    M1,
    M2,
    M4,
    M8,
}

impl SizeLabel {
    /// All labels in table order (1 KiB .. 8 MiB)
    pub const ALL: [SizeLabel; 14] = [
        SizeLabel::K1,
        SizeLabel::K2,
        SizeLabel::K4,
        SizeLabel::K8,
        SizeLabel::K16,
        SizeLabel::K32,
        SizeLabel::K64,
        SizeLabel::K128,
        SizeLabel::K256,
        SizeLabel::K512,
        SizeLabel::M1,
        SizeLabel::M2,
        SizeLabel::M4,
        SizeLabel::M8,
    ];

    /// Position in [`SizeLabel::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// log2 of the block size in bytes (K1 = 10, M8 = 23)
    pub fn log2_bytes(self) -> i64 {
        10 + self.index() as i64
    }

    /// Token written to the workload file
    pub fn as_str(self) -> &'static str {
        match self {
            SizeLabel::K1 => "K1",
            SizeLabel::K2 => "K2",
            SizeLabel::K4 => "K4",
            SizeLabel::K8 => "K8",
            SizeLabel::K16 => "K16",
            SizeLabel::K32 => "K32",
            SizeLabel::K64 => "K64",
            SizeLabel::K128 => "K128",
            SizeLabel::K256 => "K256",
            SizeLabel::K512 => "K512",
            SizeLabel::M1 => "M1",
            SizeLabel::M2 => "M2",
            SizeLabel::M4 => "M4",
            SizeLabel::M8 => "M8",
        }
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device access pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessPattern {
    /// Sequential accesses
    Streaming,
    /// Fixed-offset jumps
    Strided,
    /// Scattered accesses, limited by the log-size budget
    Irregular,
}

impl AccessPattern {
    /// All patterns in table order
    pub const ALL: [AccessPattern; 3] = [
        AccessPattern::Streaming,
        AccessPattern::Strided,
        AccessPattern::Irregular,
    ];

    /// Token written to the workload file
    pub fn as_str(self) -> &'static str {
        match self {
            AccessPattern::Streaming => "STREAMING",
            AccessPattern::Strided => "STRIDED",
            AccessPattern::Irregular => "IRREGULAR",
        }
    }
}

impl fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_of_member() {
        assert_eq!(index_of("burst_len", &BURST_LENS, 4), Ok(0));
        assert_eq!(index_of("burst_len", &BURST_LENS, 128), Ok(5));
        assert_eq!(index_of("ld_st_ratio", &LD_ST_RATIOS, 4), Ok(2));
    }

    #[test]
    fn test_index_of_non_member() {
        let err = index_of("burst_len", &BURST_LENS, 12).unwrap_err();
        assert_eq!(err.table, "burst_len");
        assert_eq!(err.value, "12");
        assert_eq!(err.to_string(), "12 is not a member of the burst_len table");
    }

    #[test]
    fn test_size_label_order() {
        for (i, label) in SizeLabel::ALL.iter().enumerate() {
            assert_eq!(label.index(), i);
        }
        assert_eq!(SizeLabel::K1.log2_bytes(), 10);
        assert_eq!(SizeLabel::M1.log2_bytes(), 20);
        assert_eq!(SizeLabel::M8.log2_bytes(), 23);
    }

    #[test]
    fn test_size_label_tokens() {
        assert_eq!(SizeLabel::K128.to_string(), "K128");
        assert_eq!(SizeLabel::M4.as_str(), "M4");
    }

    #[test]
    fn test_pattern_tokens() {
        assert_eq!(AccessPattern::Irregular.to_string(), "IRREGULAR");
        let tokens: Vec<&str> = AccessPattern::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(tokens, ["STREAMING", "STRIDED", "IRREGULAR"]);
    }

    #[test]
    fn test_size_label_serializes_as_token() {
        let json = serde_json::to_string(&SizeLabel::K512).unwrap();
        assert_eq!(json, "\"K512\"");
        let json = serde_json::to_string(&AccessPattern::Streaming).unwrap();
        assert_eq!(json, "\"STREAMING\"");
    }
}

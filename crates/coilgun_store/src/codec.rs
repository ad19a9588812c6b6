//! Report encoding.
//!
//! Reports and records travel as JSON for people and MessagePack for
//! compact storage. Thin wrappers around `serde_json` and `rmp-serde`.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Output encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// MessagePack with named fields.
    MessagePack,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "msgpack" | "messagepack" => Ok(Self::MessagePack),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

/// Encode a value in the given format.
///
/// # Errors
///
/// Returns [`StoreError::Json`] or [`StoreError::Encode`] if serialisation fails.
pub fn encode<T: Serialize>(value: &T, format: ReportFormat) -> Result<Vec<u8>, StoreError> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_vec_pretty(value)?),
        ReportFormat::MessagePack => Ok(rmp_serde::to_vec_named(value)?),
    }
}

/// Decode a value from bytes in the given format.
///
/// # Errors
///
/// Returns [`StoreError::Json`] or [`StoreError::Decode`] if deserialisation fails.
pub fn decode<'a, T: Deserialize<'a>>(
    bytes: &'a [u8],
    format: ReportFormat,
) -> Result<T, StoreError> {
    match format {
        ReportFormat::Json => Ok(serde_json::from_slice(bytes)?),
        ReportFormat::MessagePack => Ok(rmp_serde::from_slice(bytes)?),
    }
}

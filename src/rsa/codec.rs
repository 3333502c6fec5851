// Signature sequence <-> delimited text
// Used between the signing and encryption stages of the combined protocol

use std::str::FromStr;

use super::bigint::RsaBigInt;
use crate::error::{Result, RsaError};

/// Field separator between serialized integers
pub const DELIMITER: char = ',';

/// Join integers as decimal text separated by [`DELIMITER`], no padding
pub fn serialize_sequence(values: &[RsaBigInt]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

/// Split on [`DELIMITER`] and parse every field as a decimal integer
///
/// Fields must be non-empty runs of ASCII digits, the only form
/// [`serialize_sequence`] emits; signs and separators are rejected.
/// The empty string decodes to the empty sequence.
pub fn parse_sequence(text: &str) -> Result<Vec<RsaBigInt>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    text.split(DELIMITER)
        .enumerate()
        .map(|(field, raw)| {
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(RsaError::ProtocolParse {
                    field,
                    reason: format!("{:?} is not a decimal integer", raw),
                });
            }
            RsaBigInt::from_str(raw).map_err(|e| RsaError::ProtocolParse {
                field,
                reason: format!("{:?}: {}", raw, e),
            })
        })
        .collect()
}

// Display and input helpers for the interactive front end

use std::num::ParseIntError;

use crate::rsa::bigint::RsaBigInt;

/// Format a ciphertext or signature as a bracketed, comma separated list
pub fn format_sequence(values: &[RsaBigInt]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// Parse a key size typed by the user
pub fn parse_key_size(input: &str) -> Result<u32, ParseIntError> {
    input.trim().parse::<u32>()
}

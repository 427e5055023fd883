//! Wallet address normalization.
//!
//! Candidate addresses arrive as free-form text from the ticket form. This
//! module canonicalizes them to the EIP-55 checksummed form before anything
//! touches the network: uniform-case hex is accepted as-is, mixed-case hex
//! must carry a correct checksum, and everything else is rejected.

use alloy::primitives::Address;
use thiserror::Error;

/// Rejection reasons for a candidate wallet address.
///
/// The `Display` strings double as the user-facing copy shown in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Please enter a wallet address")]
    Empty,

    #[error("Invalid wallet address format")]
    Malformed,

    /// Mixed-case input whose casing does not match the EIP-55 checksum.
    /// Same user-facing copy as `Malformed`; the distinction matters for
    /// logs and tests.
    #[error("Invalid wallet address format")]
    ChecksumMismatch,
}

/// Parse a candidate wallet address into its canonical form.
///
/// Accepts the address with or without the `0x` prefix. Input that mixes
/// upper- and lowercase hex letters is treated as checksummed and must
/// verify; all-lowercase or all-uppercase input carries no checksum
/// information and is canonicalized directly.
pub fn normalize(input: &str) -> Result<Address, AddressError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AddressError::Empty);
    }

    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AddressError::Malformed);
    }

    let prefixed = format!("0x{digits}");
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());

    if has_upper && has_lower {
        Address::parse_checksummed(&prefixed, None).map_err(|_| AddressError::ChecksumMismatch)
    } else {
        prefixed.parse().map_err(|_| AddressError::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test vectors from the EIP-55 specification.
    const CHECKSUMMED: [&str; 4] = [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(normalize(""), Err(AddressError::Empty));
        assert_eq!(normalize("   "), Err(AddressError::Empty));
    }

    #[test]
    fn test_short_input_rejected() {
        assert_eq!(normalize("0x123"), Err(AddressError::Malformed));
    }

    #[test]
    fn test_wrong_length_rejected() {
        // 39 and 41 hex digits
        let short = format!("0x{}", "a".repeat(39));
        let long = format!("0x{}", "a".repeat(41));
        assert_eq!(normalize(&short), Err(AddressError::Malformed));
        assert_eq!(normalize(&long), Err(AddressError::Malformed));
    }

    #[test]
    fn test_non_hex_rejected() {
        let input = format!("0x{}g", "a".repeat(39));
        assert_eq!(normalize(&input), Err(AddressError::Malformed));
    }

    #[test]
    fn test_checksummed_vectors_roundtrip() {
        for vector in CHECKSUMMED {
            let address = normalize(vector).unwrap();
            assert_eq!(address.to_checksum(None), *vector);
        }
    }

    #[test]
    fn test_lowercase_is_canonicalized() {
        for vector in CHECKSUMMED {
            let address = normalize(&vector.to_lowercase()).unwrap();
            assert_eq!(address.to_checksum(None), *vector);
        }
    }

    #[test]
    fn test_uppercase_is_canonicalized() {
        for vector in CHECKSUMMED {
            let digits = vector.trim_start_matches("0x").to_ascii_uppercase();
            let address = normalize(&format!("0x{digits}")).unwrap();
            assert_eq!(address.to_checksum(None), *vector);
        }
    }

    #[test]
    fn test_missing_prefix_accepted() {
        for vector in CHECKSUMMED {
            let bare = vector.trim_start_matches("0x");
            let address = normalize(bare).unwrap();
            assert_eq!(address.to_checksum(None), *vector);
        }
    }

    #[test]
    fn test_bad_checksum_rejected() {
        // Flip the case of the first lowercase hex letter; the input stays
        // mixed-case but no longer matches its checksum.
        let vector = CHECKSUMMED[0];
        let broken: String = {
            let mut flipped = false;
            vector
                .chars()
                .map(|c| {
                    if !flipped && c.is_ascii_lowercase() && c.is_ascii_hexdigit() {
                        flipped = true;
                        c.to_ascii_uppercase()
                    } else {
                        c
                    }
                })
                .collect()
        };
        assert_ne!(broken, *vector);
        assert_eq!(normalize(&broken), Err(AddressError::ChecksumMismatch));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let input = format!("  {}\n", CHECKSUMMED[1]);
        let address = normalize(&input).unwrap();
        assert_eq!(address.to_checksum(None), CHECKSUMMED[1]);
    }
}

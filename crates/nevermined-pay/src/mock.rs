//! Agreement ids for mock-mode payments.

use std::fmt::Write;

use crate::constants::MOCK_AGREEMENT_ID_BYTES;

/// Length of a mock agreement id: `0x` followed by two hex digits per byte.
pub const MOCK_AGREEMENT_ID_LEN: usize = 2 + 2 * MOCK_AGREEMENT_ID_BYTES;

/// Synthesize a fresh agreement id: `0x` + 64 lowercase hex digits.
///
/// Every call draws new random bytes, so two mock payments never share an id.
pub fn mock_agreement_id() -> String {
    let mut bytes = [0u8; MOCK_AGREEMENT_ID_BYTES];
    rand::fill(&mut bytes);

    let mut id = String::with_capacity(MOCK_AGREEMENT_ID_LEN);
    id.push_str("0x");
    for b in bytes {
        // Writing to a String cannot fail.
        let _ = write!(id, "{b:02x}");
    }
    id
}

/// Whether `id` has the shape produced by [`mock_agreement_id`].
pub fn is_mock_agreement_id(id: &str) -> bool {
    id.len() == MOCK_AGREEMENT_ID_LEN
        && id.starts_with("0x")
        && id[2..]
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_id_shape() {
        let id = mock_agreement_id();
        assert_eq!(id.len(), 66);
        assert!(is_mock_agreement_id(&id), "{id}");
    }

    #[test]
    fn test_mock_ids_differ() {
        assert_ne!(mock_agreement_id(), mock_agreement_id());
    }

    #[test]
    fn test_shape_check_rejects_others() {
        assert!(!is_mock_agreement_id("unknown"));
        assert!(!is_mock_agreement_id(&format!("0x{}", "G".repeat(64))));
        assert!(!is_mock_agreement_id(&"0".repeat(66)));
    }
}

// src/codec.rs
use crate::error::CodecResult;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encodes a plaintext password for storage in the backing file.
///
/// This is the reversible transform the on-disk format has always used:
/// standard-alphabet base64 with padding. It keeps passwords out of casual
/// view in the file and nothing more; it is not encryption.
pub fn encode_password(plaintext: &str) -> String {
    STANDARD.encode(plaintext.as_bytes())
}

/// Decodes a password field read from the backing file back to plaintext.
pub fn decode_password(encoded: &str) -> CodecResult<String> {
    let bytes = STANDARD.decode(encoded)?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_encode_decode_round_trip() {
        let passwords = ["Secret1!", "with spaces and ünïcode", "", "a"];
        for password in passwords {
            let encoded = encode_password(password);
            assert_eq!(decode_password(&encoded).unwrap(), password);
        }
    }

    #[test]
    fn test_encoding_matches_existing_data_files() {
        // Values produced by the tool that originally wrote these files.
        assert_eq!(encode_password("Secret1!"), "U2VjcmV0MSE=");
        assert_eq!(decode_password("U2VjcmV0MSE=").unwrap(), "Secret1!");
        assert_eq!(decode_password("dGVzdA==").unwrap(), "test");
    }

    #[test]
    fn test_encoded_output_hides_plaintext() {
        let encoded = encode_password("hunter2");
        assert!(!encoded.contains("hunter2"));
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let result = decode_password("%%% not base64 %%%");
        assert!(matches!(result, Err(CodecError::Base64(_))));
    }

    #[test]
    fn test_decode_rejects_non_utf8_payload() {
        let encoded = STANDARD.encode([0xff_u8, 0xfe, 0xfd]);
        let result = decode_password(&encoded);
        assert!(matches!(result, Err(CodecError::Utf8(_))));
    }
}

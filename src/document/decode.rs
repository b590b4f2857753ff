//! Upload decoding
//!
//! Browsers hand files over as data URLs (`data:application/pdf;base64,...`).
//! A bare base64 string is accepted as well.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::error::DecodeError;

/// Decoded upload payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedUpload {
    /// MIME type declared in the data URL header, if any
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Decode a data URL or bare base64 string into bytes
pub fn decode_upload(encoded: &str) -> Result<DecodedUpload, DecodeError> {
    let encoded = encoded.trim();
    if encoded.is_empty() {
        return Err(DecodeError::Empty);
    }

    let (mime_type, payload) = match encoded.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| DecodeError::MalformedDataUrl("missing ',' separator".into()))?;
            let mime = header
                .strip_suffix(";base64")
                .ok_or_else(|| DecodeError::UnsupportedEncoding(header.to_string()))?;
            let mime = (!mime.is_empty()).then(|| mime.to_string());
            (mime, payload)
        }
        None => (None, encoded),
    };

    // Line-wrapped base64 is common when the payload was pasted
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(DecodeError::Empty);
    }

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;

    Ok(DecodedUpload { mime_type, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_data_url() {
        let decoded = decode_upload("data:application/pdf;base64,JVBERi0xLjQ=").unwrap();
        assert_eq!(decoded.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(decoded.bytes, b"%PDF-1.4");
    }

    #[test]
    fn test_decode_bare_base64() {
        let decoded = decode_upload("JVBERi0xLjQ=").unwrap();
        assert_eq!(decoded.mime_type, None);
        assert_eq!(decoded.bytes, b"%PDF-1.4");
    }

    #[test]
    fn test_decode_wrapped_payload() {
        let decoded = decode_upload("data:application/pdf;base64,JVBE\nRi0x\r\nLjQ=").unwrap();
        assert_eq!(decoded.bytes, b"%PDF-1.4");
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode_upload("   "), Err(DecodeError::Empty));
        assert_eq!(decode_upload("data:application/pdf;base64,"), Err(DecodeError::Empty));
        assert!(matches!(
            decode_upload("data:application/pdf;base64"),
            Err(DecodeError::MalformedDataUrl(_))
        ));
        assert!(matches!(
            decode_upload("data:text/plain,hello"),
            Err(DecodeError::UnsupportedEncoding(_))
        ));
        assert!(matches!(
            decode_upload("data:application/pdf;base64,@@not base64@@"),
            Err(DecodeError::InvalidBase64(_))
        ));
    }
}

//! Form-style percent-decoding of the echoed query

use crate::error::ResponseError;

/// Decode a query string the way HTML forms encode it
///
/// `+` becomes a space and `%XX` becomes the byte `XX`. A `%` without two
/// hex digits after it, or bytes that are not UTF-8 once decoded, are
/// rejected.
///
/// # Examples
///
/// ```
/// use tweetscan_extractor::decode_query;
///
/// assert_eq!(decode_query("%23rust+lang").unwrap(), "#rust lang");
/// assert!(decode_query("100%").is_err());
/// ```
pub fn decode_query(raw: &str) -> Result<String, ResponseError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escaped = bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit);
            if !escaped {
                return Err(ResponseError::Encoding(format!(
                    "Malformed escape at position {} in '{}'",
                    i, raw
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| ResponseError::Encoding(format!("Decoded query is not UTF-8: {}", e)))
}

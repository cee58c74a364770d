use encoding_rs::WINDOWS_1252;
use tracing::debug;

/// Decode export bytes into text.
///
/// Timing software on Windows still emits Windows-1252; valid UTF-8
/// passes through untouched, everything else goes through the 1252
/// table so accented driver names survive.
pub fn decode_export_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            debug!("export is not valid UTF-8, decoding as Windows-1252");
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}

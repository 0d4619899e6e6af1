//! Code page lookup and the byte escapes used by the serializer.
//!
//! Encoding and decoding is delegated to `encoding_rs`; this module only maps
//! the `\ansicpg` numbers RTF writers emit onto encodings and writes `\'xx`
//! escapes.

use crate::error::{RtfError, RtfResult};
use encoding_rs::Encoding;

/// Encoding used when a document names no code page (`\ansicpg1252`).
pub fn default_encoding() -> &'static Encoding {
    encoding_rs::WINDOWS_1252
}

/// Map a Windows/Mac code page number onto an encoding.
pub fn encoding_for_codepage(codepage: i32) -> Option<&'static Encoding> {
    let encoding = match codepage {
        866 => encoding_rs::IBM866,
        874 => encoding_rs::WINDOWS_874,
        932 => encoding_rs::SHIFT_JIS,
        936 => encoding_rs::GBK,
        949 => encoding_rs::EUC_KR,
        950 => encoding_rs::BIG5,
        1250 => encoding_rs::WINDOWS_1250,
        1251 => encoding_rs::WINDOWS_1251,
        1252 => encoding_rs::WINDOWS_1252,
        1253 => encoding_rs::WINDOWS_1253,
        1254 => encoding_rs::WINDOWS_1254,
        1255 => encoding_rs::WINDOWS_1255,
        1256 => encoding_rs::WINDOWS_1256,
        1257 => encoding_rs::WINDOWS_1257,
        1258 => encoding_rs::WINDOWS_1258,
        10000 => encoding_rs::MACINTOSH,
        10007 => encoding_rs::X_MAC_CYRILLIC,
        20866 => encoding_rs::KOI8_R,
        28592 => encoding_rs::ISO_8859_2,
        28595 => encoding_rs::ISO_8859_5,
        28597 => encoding_rs::ISO_8859_7,
        65001 => encoding_rs::UTF_8,
        _ => return None,
    };
    Some(encoding)
}

/// Append `text` to `out`, replacing every character outside `[32, 128)`
/// with `\'xx` escapes of its bytes under `encoding`.
pub(crate) fn escape_into(
    out: &mut String,
    text: &str,
    encoding: &'static Encoding,
) -> RtfResult<()> {
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        if (32..128).contains(&u32::from(ch)) {
            out.push(ch);
            continue;
        }

        let (bytes, _, had_errors) = encoding.encode(ch.encode_utf8(&mut buf));
        if had_errors {
            return Err(RtfError::Unencodable {
                ch,
                encoding: encoding.name(),
            });
        }
        for byte in bytes.iter() {
            out.push_str("\\'");
            push_hex(out, *byte);
        }
    }
    Ok(())
}

/// Append a byte as exactly two lowercase hex digits.
pub(crate) fn push_hex(out: &mut String, value: u8) {
    out.push_str(&format!("{value:02x}"));
}

/// Decode a run of `\'xx` bytes, or `None` if the run is malformed under
/// `encoding`.
pub(crate) fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

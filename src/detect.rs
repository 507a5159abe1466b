//! PDF header sniffing.

use crate::error::{Error, Result};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Readers accept the header anywhere in the first 1024 bytes.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Information read from a PDF header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// PDF version (e.g., "1.7", "2.0"), empty if unreadable
    pub version: String,
    /// Byte offset of the `%PDF-` marker
    pub offset: usize,
}

/// Locate the PDF header in the leading bytes of a file.
///
/// Returns [`Error::UnknownFormat`] when no `%PDF-` marker appears in the
/// first 1024 bytes.
pub fn sniff(data: &[u8]) -> Result<PdfHeader> {
    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    let offset = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let start = offset + PDF_MAGIC.len();
    let version = data
        .get(start..start + VERSION_LEN)
        .map(|v| String::from_utf8_lossy(v).to_string())
        .filter(|v| is_valid_version(v))
        .unwrap_or_default();

    Ok(PdfHeader { version, offset })
}

/// Check if bytes start like a PDF file.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    sniff(data).is_ok()
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_plain_header() {
        let header = sniff(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").unwrap();
        assert_eq!(header.version, "1.7");
        assert_eq!(header.offset, 0);
    }

    #[test]
    fn test_sniff_header_after_junk() {
        let mut data = vec![b' '; 200];
        data.extend_from_slice(b"%PDF-1.4\n");
        let header = sniff(&data).unwrap();
        assert_eq!(header.offset, 200);
        assert_eq!(header.version, "1.4");
    }

    #[test]
    fn test_sniff_rejects_non_pdf() {
        assert!(matches!(sniff(b"<!DOCTYPE html>"), Err(Error::UnknownFormat)));
        assert!(matches!(sniff(b""), Err(Error::UnknownFormat)));
        assert!(!is_pdf_bytes(b"%PD"));
    }

    #[test]
    fn test_sniff_tolerates_truncated_version() {
        let header = sniff(b"%PDF-").unwrap();
        assert!(header.version.is_empty());
    }

    #[test]
    fn test_header_beyond_window_is_ignored() {
        let mut data = vec![0u8; HEADER_SEARCH_WINDOW + 10];
        data.extend_from_slice(b"%PDF-1.4");
        assert!(!is_pdf_bytes(&data));
    }
}

//! Content validation for fetched documents.

/// Leading bytes of every PDF document (`%PDF`).
pub const PDF_SIGNATURE: [u8; 4] = [0x25, 0x50, 0x44, 0x46];

/// Returns `true` iff `bytes` begins with the PDF signature.
///
/// Buffers shorter than the signature are never valid. Trailing content is
/// not inspected.
#[must_use]
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(&PDF_SIGNATURE)
}

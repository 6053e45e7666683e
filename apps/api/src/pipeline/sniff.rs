/// How many leading bytes are probed for a signature.
const SNIFF_LEN: usize = 1024;

/// PDF magic, matched case-insensitively anywhere in the probe window.
const PDF_SIGNATURE: &[u8] = b"%PDF";

/// Content classification of an upload. Derived from the byte signature,
/// never from the filename or a client-declared content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedType {
    Pdf,
    Other,
}

/// Classifies an uploaded byte stream by probing at most its first 1024 bytes.
/// Total function: absence of a PDF signature is the catch-all `Other`.
pub fn sniff(bytes: &[u8]) -> DetectedType {
    let probe = &bytes[..bytes.len().min(SNIFF_LEN)];
    if probe
        .windows(PDF_SIGNATURE.len())
        .any(|w| w.eq_ignore_ascii_case(PDF_SIGNATURE))
    {
        DetectedType::Pdf
    } else {
        DetectedType::Other
    }
}

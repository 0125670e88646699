//! Unix line-ending normalization
//!
//! Every staged entry goes through `to_unix_eol` before archiving: CRLF and
//! lone CR both become LF. Input that is already LF-only passes through
//! unchanged, so the transform is idempotent.

/// Normalize line endings to LF over raw bytes.
pub fn to_unix_eol(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if input[i] == b'\r' {
            out.push(b'\n');
            // CRLF collapses to a single LF
            if input.get(i + 1) == Some(&b'\n') {
                i += 1;
            }
        } else {
            out.push(input[i]);
        }
        i += 1;
    }
    out
}

/// Normalize line endings of UTF-8 text.
pub fn to_unix_eol_str(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

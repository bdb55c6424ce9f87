//! Hand-built `multipart/form-data` bodies.

pub const BOUNDARY: &str = "order-helper-test-boundary";

pub fn content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// One part: `(field name, optional file name, contents)`.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a str);

pub fn body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut out = Vec::new();
    for (name, filename, contents) in parts {
        out.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let disposition = match filename {
            Some(f) => format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n"),
            None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n"),
        };
        out.extend_from_slice(disposition.as_bytes());
        if filename.is_some() {
            out.extend_from_slice(b"Content-Type: text/csv\r\n");
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(contents.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    out
}

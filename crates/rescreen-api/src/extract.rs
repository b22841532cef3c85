//! Multipart form handling and upload text extraction.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::error::{ApiError, ApiResult};

/// Resume text is capped before prompting.
pub const RESUME_TEXT_LIMIT: usize = 3000;

/// Job description text is capped before prompting.
pub const JD_TEXT_LIMIT: usize = 2000;

/// Parsed multipart form: file parts keyed by field name, plus plain fields.
pub struct FormData {
    files: HashMap<String, Bytes>,
    fields: HashMap<String, String>,
}

impl FormData {
    /// Read an entire multipart stream into memory. Parts with a filename
    /// become files; everything else is treated as a text field.
    pub async fn from_multipart(mut multipart: Multipart) -> ApiResult<Self> {
        let mut files = HashMap::new();
        let mut fields = HashMap::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| ApiError::bad_request("Invalid multipart form data"))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if field.file_name().is_some() {
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::bad_request("Invalid multipart form data"))?;
                files.insert(name, data);
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|_| ApiError::bad_request("Invalid multipart form data"))?;
                fields.insert(name, value);
            }
        }

        Ok(Self { files, fields })
    }

    pub fn file(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(|b| b.as_ref())
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Extract text from an uploaded file. PDFs are detected by magic bytes;
/// anything else must be UTF-8 text. Returns None when nothing usable
/// could be extracted.
pub fn text_from_upload(data: &[u8]) -> Option<String> {
    let text = if data.starts_with(b"%PDF") {
        pdf_extract::extract_text_from_mem(data).ok()?
    } else {
        std::str::from_utf8(data).ok()?.to_string()
    };

    if text.trim().is_empty() {
        return None;
    }

    Some(text)
}

/// Truncate to at most `limit` characters, never splitting a char.
pub fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        let text = text_from_upload(b"Senior engineer, 8 years of Rust.").unwrap();
        assert!(text.contains("Rust"));
    }

    #[test]
    fn whitespace_only_yields_none() {
        assert!(text_from_upload(b"  \n\t ").is_none());
    }

    #[test]
    fn broken_pdf_yields_none() {
        assert!(text_from_upload(b"%PDF-1.4 not really a pdf").is_none());
    }

    #[test]
    fn non_utf8_bytes_yield_none() {
        assert!(text_from_upload(&[0xff, 0xfe, 0x00, 0x41]).is_none());
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo", 2), "hé");
    }
}

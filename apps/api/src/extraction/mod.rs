//! Resume text extraction for uploaded PDF and DOCX files.
//!
//! Both backends are synchronous and CPU-bound; async callers should run
//! [`extract_text`] on the blocking pool.

use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx"];

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Error extracting text from PDF: {0}")]
    Pdf(String),

    #[error("Error extracting text from DOCX: {0}")]
    Docx(String),
}

/// Lowercase extension after the last `.`, if the name has one.
fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// True when `filename` carries one of [`ALLOWED_EXTENSIONS`].
pub fn allowed_file(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Extracts plain text from an uploaded document, dispatching on the file
/// extension. The result is trimmed and may be empty.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
    match extension(filename).as_deref() {
        Some("pdf") => extract_pdf(bytes),
        Some("docx") => extract_docx(bytes),
        Some(other) => Err(ExtractionError::UnsupportedFormat(format!(".{other}"))),
        None => Err(ExtractionError::UnsupportedFormat(String::new())),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PDF
// ────────────────────────────────────────────────────────────────────────────

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let outcome = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));
    match outcome {
        Ok(Ok(text)) => Ok(text.trim().to_string()),
        Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
        Err(_) => Err(ExtractionError::Pdf("malformed PDF document".to_string())),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// DOCX
// ────────────────────────────────────────────────────────────────────────────

const DOCX_BODY: &str = "word/document.xml";

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</w:p>|<w:br[^>]*/>|<w:cr[^>]*/>").expect("Invalid line break regex")
});
static TAB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:tab[^>]*/>").expect("Invalid tab regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(lt|gt|quot|apos|amp|#[0-9]+|#[xX][0-9a-fA-F]+);").expect("Invalid entity regex")
});

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;
    let mut body = archive
        .by_name(DOCX_BODY)
        .map_err(|e| ExtractionError::Docx(format!("{DOCX_BODY}: {e}")))?;

    let mut xml = String::new();
    body.read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;

    Ok(docx_xml_to_text(&xml))
}

fn docx_xml_to_text(xml: &str) -> String {
    let text = LINE_BREAK.replace_all(xml, "\n");
    let text = TAB.replace_all(&text, " ");
    let text = TAG.replace_all(&text, "");
    let text = ENTITY.replace_all(&text, decode_entity);
    text.trim().to_string()
}

/// Single pass, so `&amp;#38;` decodes to the literal `&#38;`. Character
/// references naming no valid scalar value are left untouched.
fn decode_entity(caps: &Captures) -> String {
    let name = &caps[1];
    let decoded = match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "amp" => Some('&'),
        _ => {
            let reference = &name[1..];
            let code = match reference.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16),
                None => reference.parse::<u32>(),
            };
            code.ok().and_then(char::from_u32)
        }
    };
    decoded.map_or_else(|| caps[0].to_string(), String::from)
}

/// Builds a minimal DOCX container with one paragraph per entry.
#[cfg(test)]
pub(crate) fn docx_fixture(paragraphs: &[&str]) -> Vec<u8> {
    use std::io::Write;

    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(DOCX_BODY, zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

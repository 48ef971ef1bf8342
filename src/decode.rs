//! Binary-to-text decoding for uploaded SDS files (PDF, DOCX, plain text).
//!
//! Decoding is a pipeline-layer concern: ingestion supplies bytes plus a
//! content-type hint; this module returns plain UTF-8 text. The extraction
//! engine itself never sees bytes, only strings.

use std::io::Read;

/// Content-type hints understood by the decoder.
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TEXT: &str = "text/plain";

/// Maximum decompressed bytes to read from a single ZIP entry (zip-bomb protection).
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// Decoding error. Data-quality problems inside a parseable file yield
/// degraded text, not errors; these variants cover structurally broken input.
#[derive(Debug)]
pub enum DecodeError {
    Pdf(String),
    Docx(String),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Pdf(e) => write!(f, "PDF decoding failed: {}", e),
            DecodeError::Docx(e) => write!(f, "DOCX decoding failed: {}", e),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Maps a filename extension to a content-type hint.
pub fn mime_hint_for(filename: &str) -> &'static str {
    let lower = filename.to_lowercase();
    if lower.ends_with(".pdf") {
        MIME_PDF
    } else if lower.ends_with(".docx") {
        MIME_DOCX
    } else {
        MIME_TEXT
    }
}

/// Decodes file bytes to plain text.
///
/// Unknown content types fall back to lossy UTF-8, matching upload behavior:
/// a text-like file always produces some text. An empty result is possible
/// and must be treated by the caller as an ingestion failure.
pub fn decode_to_text(bytes: &[u8], mime_hint: &str) -> Result<String, DecodeError> {
    match mime_hint {
        MIME_PDF => decode_pdf(bytes),
        MIME_DOCX => decode_docx(bytes),
        _ => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

fn decode_pdf(bytes: &[u8]) -> Result<String, DecodeError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| DecodeError::Pdf(e.to_string()))
}

fn decode_docx(bytes: &[u8]) -> Result<String, DecodeError> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .map_err(|e| DecodeError::Docx(e.to_string()))?;
    let mut doc_xml = Vec::new();
    let mut found = false;
    for i in 0..archive.len() {
        let entry = archive
            .by_index(i)
            .map_err(|e| DecodeError::Docx(e.to_string()))?;
        if entry.name() == "word/document.xml" {
            entry
                .take(MAX_XML_ENTRY_BYTES)
                .read_to_end(&mut doc_xml)
                .map_err(|e| DecodeError::Docx(e.to_string()))?;
            if doc_xml.len() as u64 >= MAX_XML_ENTRY_BYTES {
                return Err(DecodeError::Docx(
                    "word/document.xml exceeds size limit".to_string(),
                ));
            }
            found = true;
            break;
        }
    }
    if !found {
        return Err(DecodeError::Docx(
            "word/document.xml not found".to_string(),
        ));
    }
    extract_w_t_elements(&doc_xml)
}

/// Collects the text of all `w:t` runs, separated by newlines so that
/// label patterns anchored to line ends keep working.
fn extract_w_t_elements(xml: &[u8]) -> Result<String, DecodeError> {
    let mut out = String::new();
    let mut reader = quick_xml::Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    if let Ok(quick_xml::events::Event::Text(te)) = reader.read_event_into(&mut buf)
                    {
                        if !out.is_empty() {
                            out.push('\n');
                        }
                        out.push_str(te.unescape().unwrap_or_default().as_ref());
                    }
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(DecodeError::Docx(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_with_text(lines: &[&str]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
            zip.start_file(
                "word/document.xml",
                zip::write::SimpleFileOptions::default(),
            )
            .unwrap();
            let runs: String = lines
                .iter()
                .map(|l| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", l))
                .collect();
            let xml = format!(
                "<?xml version=\"1.0\"?><w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>{}</w:body></w:document>",
                runs
            );
            zip.write_all(xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buf
    }

    #[test]
    fn test_mime_hint_from_extension() {
        assert_eq!(mime_hint_for("sheet.PDF"), MIME_PDF);
        assert_eq!(mime_hint_for("sheet.docx"), MIME_DOCX);
        assert_eq!(mime_hint_for("sheet.txt"), MIME_TEXT);
        assert_eq!(mime_hint_for("no_extension"), MIME_TEXT);
    }

    #[test]
    fn test_plain_text_passthrough() {
        let text = decode_to_text(b"Product Name: Acetone", MIME_TEXT).unwrap();
        assert_eq!(text, "Product Name: Acetone");
    }

    #[test]
    fn test_invalid_utf8_is_lossy_not_fatal() {
        let text = decode_to_text(&[0x50, 0xff, 0x51], MIME_TEXT).unwrap();
        assert!(text.contains('P'));
        assert!(text.contains('Q'));
    }

    #[test]
    fn test_invalid_pdf_returns_error() {
        assert!(decode_to_text(b"not a pdf", MIME_PDF).is_err());
    }

    #[test]
    fn test_invalid_zip_returns_error_for_docx() {
        assert!(decode_to_text(b"not a zip", MIME_DOCX).is_err());
    }

    #[test]
    fn test_docx_text_runs_joined_with_newlines() {
        let bytes = docx_with_text(&["Product Name: Acetone", "Manufacturer: Acme"]);
        let text = decode_to_text(&bytes, MIME_DOCX).unwrap();
        assert_eq!(text, "Product Name: Acetone\nManufacturer: Acme");
    }
}

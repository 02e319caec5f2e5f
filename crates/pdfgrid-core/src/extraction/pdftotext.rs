use crate::error::GridError;
use crate::extraction::{PageItems, PdfExtractor, TextItem};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox` to obtain word-level bounding boxes. Each word
/// becomes one text item positioned at its left edge and bottom edge, with
/// the y axis flipped so it grows upward like PDF user space.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageItems>, GridError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| GridError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| GridError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-bbox")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GridError::PdftotextNotFound
                } else {
                    GridError::Extraction(format!("pdftotext -bbox failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(GridError::PdftotextFailed { code, stderr });
        }

        let xhtml = String::from_utf8_lossy(&output.stdout);
        let pages = parse_bbox_xhtml(&xhtml)?;
        log::debug!("pdftotext returned {} page(s)", pages.len());
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Word box as written by `pdftotext -bbox` (top-left origin).
struct WordBox {
    x_min: f64,
    y_max: f64,
}

/// Parse the XHTML document produced by `pdftotext -bbox`.
///
/// Pages are numbered in document order starting at 1.
fn parse_bbox_xhtml(xml: &str) -> Result<Vec<PageItems>, GridError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<PageItems> = Vec::new();
    let mut page_height = 0.0;
    let mut current_word: Option<WordBox> = None;
    let mut word_text = String::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| GridError::Extraction(format!("malformed pdftotext output: {e}")))?;
        match event {
            Event::Start(tag) | Event::Empty(tag) if tag.name().as_ref() == b"page" => {
                page_height = attr_f64(&tag, b"height")?.unwrap_or(0.0);
                pages.push(PageItems {
                    page_number: pages.len() + 1,
                    items: Vec::new(),
                });
            }
            Event::Start(tag) if tag.name().as_ref() == b"word" => {
                current_word = match (attr_f64(&tag, b"xMin")?, attr_f64(&tag, b"yMax")?) {
                    (Some(x_min), Some(y_max)) => Some(WordBox { x_min, y_max }),
                    _ => None,
                };
                word_text.clear();
            }
            Event::Text(text) if current_word.is_some() => {
                let unescaped = text
                    .unescape()
                    .map_err(|e| GridError::Extraction(e.to_string()))?;
                word_text.push_str(&unescaped);
            }
            Event::End(tag) if tag.name().as_ref() == b"word" => {
                if let (Some(word), Some(page)) = (current_word.take(), pages.last_mut()) {
                    page.items.push(TextItem::at(
                        word_text.clone(),
                        word.x_min,
                        page_height - word.y_max,
                    ));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn attr_f64(tag: &BytesStart<'_>, name: &[u8]) -> Result<Option<f64>, GridError> {
    for attr in tag.attributes() {
        let attr = attr.map_err(|e| GridError::Extraction(e.to_string()))?;
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|e| GridError::Extraction(e.to_string()))?;
            return Ok(value.trim().parse().ok());
        }
    }
    Ok(None)
}

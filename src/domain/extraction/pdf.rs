use super::dto::ExtractedPdf;
use super::error::ExtractionError;
use super::html::collapse_whitespace;
use lopdf::Document;

pub const UNTITLED_DOCUMENT: &str = "Untitled Document";

/// Longest text-derived title before it is cut with an ellipsis
const MAX_DERIVED_TITLE_CHARS: usize = 100;

/// Parse a PDF held in memory. CPU bound; run it off the async runtime.
pub fn parse_pdf(bytes: &[u8]) -> Result<ExtractedPdf, ExtractionError> {
    let document =
        Document::load_mem(bytes).map_err(|e| ExtractionError::InvalidPdf(e.to_string()))?;

    let pages = document.get_pages();
    let mut page_texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        match document.extract_text(&[*page_number]) {
            Ok(text) => page_texts.push(text),
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "Skipping unreadable PDF page");
            }
        }
    }

    let content = collapse_whitespace(&page_texts.join(" "));
    let title = info_title(&document)
        .or_else(|| derived_title(&content))
        .unwrap_or_else(|| UNTITLED_DOCUMENT.to_string());

    Ok(ExtractedPdf {
        title,
        content,
        num_pages: pages.len(),
    })
}

/// `Title` entry of the trailer's document information dictionary
fn info_title(document: &Document) -> Option<String> {
    let info_id = document.trailer.get(b"Info").ok()?.as_reference().ok()?;
    let info = document.get_object(info_id).ok()?.as_dict().ok()?;
    let raw = info.get(b"Title").ok()?.as_str().ok()?;
    let title = String::from_utf8_lossy(raw).trim().to_string();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

fn derived_title(content: &str) -> Option<String> {
    if content.is_empty() {
        return None;
    }
    if content.chars().count() > MAX_DERIVED_TITLE_CHARS {
        let head: String = content.chars().take(MAX_DERIVED_TITLE_CHARS).collect();
        Some(format!("{head}..."))
    } else {
        Some(content.to_string())
    }
}

pub mod dto;
pub mod error;
pub mod html;
pub mod pdf;
pub mod service;

pub use dto::{ExtractUrlRequest, ExtractedArticle, ExtractedPdf};
pub use error::ExtractionError;
pub use service::{ExtractionService, ExtractionServiceApi, PdfUpload, MIN_CONTENT_CHARS};

pub mod dto;
pub mod error;
pub mod service;

pub use dto::{SummarizeRequest, SummaryResponse};
pub use error::SummaryServiceError;
pub use service::{truncate_words, SummaryService, SummaryServiceApi};

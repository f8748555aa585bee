pub mod dto;
pub mod error;
pub mod model;
pub mod service;

pub use dto::{SaveContentRequest, SaveContentResponse, SavedContentResponse};
pub use error::LibraryServiceError;
pub use model::{ContentType, SavedContent};
pub use service::{LibraryService, LibraryServiceApi};

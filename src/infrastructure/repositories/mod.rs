pub mod page_repository;
pub mod refresh_token_repository;
pub mod saved_content_repository;
pub mod summary_repository;
pub mod user_repository;

pub use page_repository::{FetchedPage, HttpPageRepository, PageRepository};
pub use refresh_token_repository::{hash_token, RefreshTokenRepository};
pub use saved_content_repository::SavedContentRepository;
pub use summary_repository::{OpenAiSummaryRepository, SummaryRepository};
pub use user_repository::UserRepository;

pub mod auth;
pub mod extraction;
pub mod library;
pub mod playback;
pub mod summary;
pub mod user;

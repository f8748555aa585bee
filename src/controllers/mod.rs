pub mod auth;
pub mod extraction;
pub mod health;
pub mod library;
pub mod playback;
pub mod summary;

pub mod model;

pub use model::{User, UserProfile};

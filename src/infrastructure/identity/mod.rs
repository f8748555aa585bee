pub mod firebase;

pub use firebase::{FirebaseIdentityClient, IdentityAccount, IdentityError, IdentityProvider};

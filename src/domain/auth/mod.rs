pub mod dto;
pub mod error;
pub mod jwt;
pub mod service;

pub use dto::{
    CredentialsRequest, RefreshTokenRequest, SessionResponse, SessionState, TokenResponse,
};
pub use error::AuthServiceError;
pub use jwt::{generate_refresh_token, Claims, JwtManager};
pub use service::{AuthService, AuthServiceApi};

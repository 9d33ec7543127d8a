//! Admin accounts, bcrypt password checks, and HS256 bearer tokens.

pub mod domain;
pub mod extract;
pub mod passwords;
pub mod repository;
pub mod router;
pub mod service;
pub mod tokens;

pub use domain::{AdminAccount, AdminProfile, Claims, Role};
pub use extract::AuthenticatedAdmin;
pub use repository::{AdminRepository, MemoryAdminRepository};
pub use router::auth_router;
pub use service::{AuthService, LoginRequest, LoginResponse};
pub use tokens::{IssuedToken, TokenAuthority};

use crate::storage::RepositoryError;
use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid or expired token: {0}")]
    InvalidToken(String),
    #[error("{} role required (signed in as {})", .required.label(), .actual.label())]
    InsufficientRole { required: Role, actual: Role },
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("token signing failed: {0}")]
    Signing(String),
}

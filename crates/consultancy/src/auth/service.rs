use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::domain::{AdminAccount, AdminProfile, Role};
use super::passwords::{hash_password, verify_password};
use super::repository::AdminRepository;
use super::tokens::TokenAuthority;
use super::AuthError;
use crate::validation::{self, ValidationErrors};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub admin: AdminProfile,
}

pub struct AuthService {
    repository: Arc<dyn AdminRepository>,
    tokens: Arc<TokenAuthority>,
    bcrypt_rounds: u32,
    /// Compared against when the email is unknown so both paths pay the
    /// same bcrypt cost.
    decoy_hash: OnceLock<Option<String>>,
}

impl AuthService {
    pub fn new(
        repository: Arc<dyn AdminRepository>,
        tokens: Arc<TokenAuthority>,
        bcrypt_rounds: u32,
    ) -> Self {
        Self {
            repository,
            tokens,
            bcrypt_rounds,
            decoy_hash: OnceLock::new(),
        }
    }

    pub fn tokens(&self) -> &Arc<TokenAuthority> {
        &self.tokens
    }

    /// Blocking: runs a bcrypt verification.
    pub fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError> {
        let mut errors = ValidationErrors::default();
        let email = validation::email(&mut errors, "email", request.email.as_deref());
        let password = request.password.as_deref().unwrap_or_default();
        if password.is_empty() {
            errors.push("password", "password is required");
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let account = match self.repository.find_by_email(&email)? {
            Some(account) if verify_password(password, &account.password_hash) => account,
            Some(_) => {
                warn!(email = %email, "admin login rejected");
                return Err(AuthError::InvalidCredentials);
            }
            None => {
                if let Some(decoy) = self.decoy_hash() {
                    verify_password(password, decoy);
                }
                warn!(email = %email, "admin login rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let issued = self.tokens.issue(&account)?;
        info!(admin_id = %account.id, role = account.role.label(), "admin signed in");

        Ok(LoginResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            admin: account.profile(),
        })
    }

    /// Blocking: hashes the password.
    pub fn create_account(
        &self,
        email: &str,
        name: &str,
        password: &str,
        role: Role,
    ) -> Result<AdminProfile, AuthError> {
        let mut errors = ValidationErrors::default();
        let email = validation::email(&mut errors, "email", Some(email));
        let name = validation::required_text(&mut errors, "name", Some(name), 2, 100);
        if password.chars().count() < 8 {
            errors.push("password", "password must be at least 8 characters");
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let account = AdminAccount {
            id: format!("admin-{}", Uuid::new_v4()),
            email,
            name,
            role,
            password_hash: hash_password(password, self.bcrypt_rounds)?,
            created_at: Utc::now(),
        };
        let stored = self.repository.insert(account)?;
        Ok(stored.profile())
    }

    /// Creates the bootstrap admin unless the address is already registered.
    pub fn seed_admin(&self, email: &str, password: &str) -> Result<Option<AdminProfile>, AuthError> {
        if self.repository.find_by_email(email)?.is_some() {
            return Ok(None);
        }
        let profile = self.create_account(email, "Site Administrator", password, Role::Admin)?;
        info!(admin_id = %profile.id, "seeded admin account");
        Ok(Some(profile))
    }

    fn decoy_hash(&self) -> Option<&str> {
        self.decoy_hash
            .get_or_init(|| hash_password("decoy-password-never-matches", self.bcrypt_rounds).ok())
            .as_deref()
    }

    pub fn profile(&self, id: &str) -> Result<Option<AdminProfile>, AuthError> {
        Ok(self.repository.fetch(id)?.map(|account| account.profile()))
    }
}

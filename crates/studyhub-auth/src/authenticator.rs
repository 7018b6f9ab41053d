//! Email + password verification against the user store.

use std::sync::OnceLock;

use tracing::{debug, info};

use studyhub_core::error::AppError;
use studyhub_core::result::AppResult;
use studyhub_core::types::UserId;
use studyhub_database::{DatabasePool, UserRepository};

use crate::password::PasswordHasher;

/// The one message returned for every rejected login.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Verifies login credentials.
///
/// An unknown email and a wrong password are indistinguishable to the
/// caller: both return the same `Unauthorized` error, and both perform one
/// Argon2 verification.
#[derive(Debug, Clone)]
pub struct Authenticator {
    db: DatabasePool,
    users: UserRepository,
    hasher: PasswordHasher,
}

impl Authenticator {
    /// Creates a new authenticator over the user store.
    pub fn new(db: DatabasePool) -> Self {
        Self {
            db,
            users: UserRepository,
            hasher: PasswordHasher::new(),
        }
    }

    /// Returns the user id for a matching email and password.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<UserId> {
        let user = {
            let mut conn = self.db.acquire().await?;
            self.users.find_by_email(&mut conn, email).await?
        };

        let Some(user) = user else {
            self.burn_verification(password);
            debug!("Login rejected: unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            debug!(user_id = %user.user_id, "Login rejected: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = %user.user_id, "User authenticated");
        Ok(user.user_id)
    }

    fn burn_verification(&self, password: &str) {
        let dummy = DUMMY_HASH.get_or_init(|| self.hasher.hash_password("studyhub-dummy").ok());
        if let Some(hash) = dummy {
            let _ = self.hasher.verify_password(password, hash);
        }
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument};

use crate::model::user::User;
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

#[derive(Debug, Clone, serde::Serialize)]
pub struct UserWithoutPassword {
    pub id: Option<ObjectId>,
    pub email: String,
    pub created_at: Option<String>,
}

impl From<User> for UserWithoutPassword {
    fn from(user: User) -> Self {
        UserWithoutPassword {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn register(&self, email: String, password: String)
        -> Result<UserWithoutPassword, ServiceError>;
    async fn login(&self, email: String, password: String)
        -> Result<UserWithoutPassword, ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn register(
        &self,
        email: String,
        password: String,
    ) -> Result<UserWithoutPassword, ServiceError> {
        info!("Registering new user");
        if email.trim().is_empty() || password.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Email and password are required".to_string(),
            ));
        }

        // The existence check and the insert below are two separate round
        // trips; two concurrent registrations for the same email can both
        // pass the check.
        if self.user_repo.find_by_email(&email).await?.is_some() {
            error!("Email already registered");
            return Err(ServiceError::Duplicate("Email already registered".to_string()));
        }

        let hash = PasswordUtilsImpl::hash_password(&password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;
        let user = User {
            id: None,
            email,
            password_hash: hash,
            created_at: None,
        };
        let inserted = self.user_repo.insert(user).await;
        match &inserted {
            Ok(_) => info!("User registered successfully"),
            Err(e) => error!("Failed to insert user: {e}"),
        }
        Ok(inserted?.into())
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(
        &self,
        email: String,
        password: String,
    ) -> Result<UserWithoutPassword, ServiceError> {
        info!("User login attempt");
        if email.trim().is_empty() || password.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Email and password are required".to_string(),
            ));
        }

        // An unknown email and a wrong password must be indistinguishable
        // to the caller.
        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                error!("Login attempt for unknown email");
                return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
            }
        };

        let valid = PasswordUtilsImpl::verify_password(&password, &user.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            error!("Invalid credentials for user");
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }

        info!("User logged in successfully");
        Ok(user.into())
    }
}

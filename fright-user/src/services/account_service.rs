use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use uuid::Uuid;

use fright_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{NewUser, User};
use crate::store::UserStore;

#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub location: Option<String>,
    pub age: Option<i32>,
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("invalid password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < 8 {
        return Err(AppError::new(ErrorCode::PasswordTooWeak, "password must be at least 8 characters"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::new(ErrorCode::PasswordTooWeak, "password must contain at least one number"));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::new(ErrorCode::PasswordTooWeak, "password must contain at least one letter"));
    }
    Ok(())
}

pub fn register(store: &mut impl UserStore, registration: Registration) -> AppResult<User> {
    validate_password(&registration.password)?;

    let email = registration.email.trim().to_lowercase();
    let username = registration.username.trim().to_string();

    if store.find_user_by_email(&email)?.is_some() {
        return Err(AppError::new(ErrorCode::EmailAlreadyExists, "email already registered"));
    }
    if store.find_user_by_username(&username)?.is_some() {
        return Err(AppError::new(ErrorCode::UsernameTaken, "username is already taken"));
    }

    let user = store.insert_user(NewUser {
        id: Uuid::now_v7(),
        name: registration.name.trim().to_string(),
        username,
        email,
        password_hash: hash_password(&registration.password)?,
        location: registration.location.filter(|l| !l.trim().is_empty()),
        age: registration.age,
    })?;

    tracing::info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Same error for unknown email and wrong password.
pub fn authenticate(store: &mut impl UserStore, email: &str, password: &str) -> AppResult<User> {
    let invalid = || AppError::new(ErrorCode::InvalidCredentials, "invalid email or password");

    let user = store
        .find_user_by_email(&email.trim().to_lowercase())?
        .ok_or_else(invalid)?;

    if !verify_password(password, &user.password_hash)? {
        tracing::warn!(user_id = %user.id, "failed login attempt");
        return Err(invalid());
    }

    Ok(user)
}

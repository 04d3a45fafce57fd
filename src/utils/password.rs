use bcrypt::{hash, verify};

use crate::utils::errors::AppError;

/// Cost factor for the adaptive hash. Kept at 10 to stay compatible with
/// hashes produced by earlier deployments.
const BCRYPT_COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, BCRYPT_COST)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    verify(password, hashed)
        .map_err(|e| AppError::internal(format!("Failed to verify password: {}", e)))
}

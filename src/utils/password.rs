use crate::error::{AppError, AppResult};
use bcrypt::{DEFAULT_COST, hash, verify};

/// Password strength: 8-128 characters with lower case, upper case and a digit.
pub fn validate_password(password: &str) -> AppResult<()> {
    let len = password.chars().count();
    if !(8..=128).contains(&len) {
        return Err(AppError::ValidationError(
            "Parola trebuie să aibă între 8 și 128 de caractere.".to_string(),
        ));
    }

    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !has_lowercase || !has_uppercase || !has_digit {
        return Err(AppError::ValidationError(
            "Parola trebuie să conțină litere mari, litere mici și cifre.".to_string(),
        ));
    }

    Ok(())
}

pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    verify(password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Parola123").is_ok());
        assert!(validate_password("parola123").is_err()); // no upper case
        assert!(validate_password("PAROLA123").is_err()); // no lower case
        assert!(validate_password("ParolaBuna").is_err()); // no digit
        assert!(validate_password("Par123").is_err()); // too short
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hashed = hash_password("Parola123").unwrap();
        assert!(verify_password("Parola123", &hashed).unwrap());
        assert!(!verify_password("AltaParola1", &hashed).unwrap());
    }
}

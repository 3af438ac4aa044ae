//! # Validation Module
//!
//! Input checks run on form data before it reaches the request gateway.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (client side)                                    │
//! │  ├── Empty / length / format checks                                    │
//! │  └── Immediate feedback, no round-trip                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Backend                                                      │
//! │  ├── Authentication and authorization                                  │
//! │  └── Stock, uniqueness, ownership                                      │
//! │                                                                         │
//! │  Only Layer 2 is authoritative. Layer 1 saves a request.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::validation::{validate_email, validate_quantity};
//!
//! assert!(validate_email("ada@example.com").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Credentials, Registration};
use crate::{MAX_ITEM_QUANTITY, MIN_PASSWORD_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - At most 254 characters
/// - Exactly one `@` with text on both sides (`admin@localhost` is fine)
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > 254 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 254,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing '@'"))?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid("expected name@domain"));
    }

    Ok(())
}

/// Validates a password typed into the login form.
///
/// Login only checks presence; length rules belong to registration.
pub fn validate_login_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    Ok(())
}

/// Validates a new password.
///
/// ## Rules
/// - Must not be empty
/// - At least [`MIN_PASSWORD_LEN`] characters
pub fn validate_new_password(password: &str) -> ValidationResult<()> {
    validate_login_password(password)?;

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Validates a display name.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates the login form.
pub fn validate_credentials(creds: &Credentials) -> ValidationResult<()> {
    validate_email(&creds.email)?;
    validate_login_password(&creds.password)
}

/// Validates the registration form.
pub fn validate_registration(reg: &Registration) -> ValidationResult<()> {
    validate_name(&reg.name)?;
    validate_email(&reg.email)?;
    validate_new_password(&reg.password)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("  ada@shop.example.org ").is_ok());

        assert!(matches!(
            validate_email(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_email("ada.example.com"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(validate_email("@b.com").is_err());
        assert!(validate_email("a@b").is_ok());
        assert!(validate_email("admin@localhost").is_ok());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }

    #[test]
    fn test_validate_passwords() {
        assert!(validate_login_password("pw").is_ok());
        assert!(validate_login_password("").is_err());

        assert!(validate_new_password("secret1").is_ok());
        assert!(matches!(
            validate_new_password("abc"),
            Err(ValidationError::TooShort { min: 6, .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(matches!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_quantity(-3),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_quantity(MAX_ITEM_QUANTITY + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_forms() {
        assert!(validate_credentials(&Credentials::new("a@b.com", "pw")).is_ok());
        assert!(validate_credentials(&Credentials::new("a@b.com", "")).is_err());

        let reg = Registration {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
        };
        assert!(validate_registration(&reg).is_ok());

        let reg = Registration {
            name: "   ".into(),
            ..reg
        };
        assert!(matches!(
            validate_registration(&reg),
            Err(ValidationError::Required { .. })
        ));
    }
}

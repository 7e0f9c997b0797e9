//! Account field validation helpers.

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Normalize an email address for storage and lookup (lowercase, trimmed).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Shallow email shape check (one `@` with non-empty local and domain parts).
pub fn validate_email(email: &str) -> Result<(), String> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err("Invalid email address".into()),
    }
}

/// Validate that a password meets the minimum length requirement.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}

//! Security utilities for credential protection.
//!
//! # Security Guarantees
//! - Credentials are stored in `Zeroizing` containers for automatic memory clearing
//! - `Debug` output of credentials never includes the password
//!
//! # Module Structure
//! - `credentials`: Secure credential container with automatic memory zeroing

mod credentials;

pub use credentials::Credentials;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_zeroization() {
        let creds = Credentials::new("admin".to_string(), "x".to_string());
        assert_eq!(creds.username(), "admin");
        assert!(creds.has_password());
        // Credentials will be automatically zeroized on drop
    }
}

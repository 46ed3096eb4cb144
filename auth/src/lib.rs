//! Authentication library for the blog service
//!
//! Provides the security-sensitive building blocks the HTTP layer composes:
//! - Password strength policy (checked before any store access)
//! - Password hashing (Argon2id)
//! - JWT token generation and validation
//! - Authentication coordination (verify password, issue token)
//!
//! The HTTP service defines its own middleware and error mapping on top of
//! these primitives; nothing here depends on the web framework.
//!
//! # Examples
//!
//! ## Password Policy and Hashing
//! ```
//! use auth::{PasswordHasher, PasswordPolicy};
//!
//! PasswordPolicy::validate("abcd1234").unwrap();
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("abcd1234").unwrap();
//! assert!(hasher.verify("abcd1234", &hash).unwrap());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("abcd1234").unwrap();
//!
//! // Login: verify and generate token
//! let claims = Claims::for_user("user123", 24);
//! let result = auth.authenticate("abcd1234", &hash, &claims).unwrap();
//!
//! // Validate token on a later request
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use password::PolicyError;

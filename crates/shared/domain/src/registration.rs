//! Signup data held while the user waits for their code.

use crate::email::Email;
use crate::error::{DomainError, DomainResult};
use crate::password::Password;
use crate::user::Role;

/// A signup form that has been submitted and is awaiting OTP verification.
///
/// Lives in memory only. Dropping it (successful verification, or the user
/// leaving the flow) discards everything, including the attempt count.
#[derive(Debug, Clone)]
pub struct PendingRegistration {
    email: Email,
    full_name: String,
    password: Password,
    role: Role,
    attempts_used: u32,
}

impl PendingRegistration {
    pub fn new(email: Email, full_name: &str, password: Password, role: Role) -> DomainResult<Self> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(DomainError::validation("Full name is required"));
        }
        role.ensure_self_registrable()?;

        Ok(Self {
            email,
            full_name: full_name.to_string(),
            password,
            role,
            attempts_used: 0,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    pub fn set_attempts_used(&mut self, attempts: u32) {
        self.attempts_used = attempts;
    }
}

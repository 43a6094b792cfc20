//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Job seeker role
pub const ROLE_CANDIDATE: &str = "candidate";

/// Hiring-side role
pub const ROLE_RECRUITER: &str = "recruiter";

/// Platform administrator role
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Shape of an acceptable email address
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Number of digits in a one-time code
pub const OTP_LENGTH: usize = 6;

// =============================================================================
// OTP entry
// =============================================================================

/// Seconds before a sent code may be re-requested
pub const OTP_TTL_SECONDS: u32 = 120;

/// Failed verifications allowed before the input locks
pub const MAX_OTP_ATTEMPTS: u32 = 3;

// =============================================================================
// Authentication
// =============================================================================

/// How long a LinkedIn `state` parameter stays acceptable
pub const LINKEDIN_STATE_TTL_SECONDS: i64 = 600;

//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum product name length requirement
pub const MIN_NAME_LENGTH: usize = 1;

/// Lowest accepted price
pub const MIN_PRICE: f64 = 0.0;

//! # Error Types
//!
//! Domain-specific error types for tapri-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tapri-core errors (this file)                                         │
//! │  ├── CoreError        - Bad dates, ranges, report settings             │
//! │  └── ValidationError  - Record entry failures                          │
//! │                                                                         │
//! │  tapri-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError / DbError → CLI message             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Note on Reports
//! The report aggregator never returns an error. A bad date or an inverted
//! range simply produces the zero report. `CoreError` exists for front ends
//! that want to tell the user *why* their range was rejected before asking
//! for a report (see [`crate::ReportRange::parse_strict`]).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A date string is not a valid `YYYY-MM-DD` calendar date.
    #[error("Invalid {field} date: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },

    /// Report range starts after it ends.
    ///
    /// ## When This Occurs
    /// ```text
    /// report --from 2024-03-31 --to 2024-03-01
    ///      │
    ///      ▼
    /// InvalidDateRange { start: "2024-03-31", end: "2024-03-01" }
    /// ```
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    /// Operating hours window is not a valid `start..=end` within a day.
    #[error("Invalid operating hours {start}..={end}: hours must satisfy start <= end <= 23")]
    InvalidOperatingHours { start: u32, end: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a record entered at the counter doesn't meet
/// requirements. Used before anything is persisted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid date, malformed amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

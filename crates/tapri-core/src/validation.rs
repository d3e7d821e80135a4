//! # Validation Module
//!
//! Input validation for records entered at the counter.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (CLI / web form)                                   │
//! │  ├── Parsing (dates, amounts)                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (called by Record::validate)                     │
//! │  ├── Business rules: names present, quantities sane, amounts >= 0      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE expense item names                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reports never validate: they skip what they cannot use.

use crate::error::ValidationError;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product name on a billed line.
///
/// ## Example
/// ```rust
/// use tapri_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Masala Chai").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("product name", name)
}

/// Validates an expense or purchase description.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    validate_text("description", description)
}

/// Validates an expense item (category definition) name.
pub fn validate_expense_item_name(name: &str) -> ValidationResult<()> {
    validate_text("expense item name", name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a non-negative amount in cents. Zero is allowed (free items).
///
/// ## Example
/// ```rust
/// use tapri_core::validation::validate_amount_cents;
///
/// assert!(validate_amount_cents("price", 0).is_ok());
/// assert!(validate_amount_cents("price", -1).is_err());
/// ```
pub fn validate_amount_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an invoice number (positive).
pub fn validate_invoice_number(number: i64) -> ValidationResult<()> {
    if number <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "invoice number".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Amount Parsing
// =============================================================================

/// Parses a typed amount like `40`, `40.5` or `1,250.75` into cents.
///
/// ## Rules
/// - At most two decimal places
/// - Thousands separators (`,`) are ignored
/// - No sign: entered amounts are never negative
///
/// ## Example
/// ```rust
/// use tapri_core::validation::parse_amount;
///
/// assert_eq!(parse_amount("price", "40.5").unwrap(), 4050);
/// assert_eq!(parse_amount("price", "1,250").unwrap(), 125_000);
/// assert!(parse_amount("price", "4.005").is_err());
/// ```
pub fn parse_amount(field: &str, input: &str) -> ValidationResult<i64> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let (major, minor) = match cleaned.split_once('.') {
        Some((major, minor)) => (major, minor),
        None => (cleaned.as_str(), ""),
    };

    if minor.len() > 2 {
        return Err(invalid("at most two decimal places"));
    }
    if !major.chars().all(|c| c.is_ascii_digit()) || !minor.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("must be a number like 40 or 40.50"));
    }
    if major.is_empty() && minor.is_empty() {
        return Err(invalid("must be a number like 40 or 40.50"));
    }

    let major: i64 = if major.is_empty() {
        0
    } else {
        major.parse().map_err(|_| invalid("amount is too large"))?
    };
    let minor: i64 = match minor.len() {
        0 => 0,
        1 => minor.parse::<i64>().map_err(|_| invalid("bad decimals"))? * 10,
        _ => minor.parse().map_err(|_| invalid("bad decimals"))?,
    };

    major
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(minor))
        .ok_or_else(|| invalid("amount is too large"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Ginger Tea").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_amount_cents() {
        assert!(validate_amount_cents("amount", 0).is_ok());
        assert!(validate_amount_cents("amount", 1099).is_ok());
        assert!(validate_amount_cents("amount", -100).is_err());
    }

    #[test]
    fn test_validate_invoice_number() {
        assert!(validate_invoice_number(1).is_ok());
        assert!(validate_invoice_number(0).is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("amount", "40").unwrap(), 4000);
        assert_eq!(parse_amount("amount", "40.5").unwrap(), 4050);
        assert_eq!(parse_amount("amount", "40.05").unwrap(), 4005);
        assert_eq!(parse_amount("amount", ".75").unwrap(), 75);
        assert_eq!(parse_amount("amount", "3,100.00").unwrap(), 310_000);

        assert!(parse_amount("amount", "").is_err());
        assert!(parse_amount("amount", ".").is_err());
        assert!(parse_amount("amount", "-5").is_err());
        assert!(parse_amount("amount", "abc").is_err());
        assert!(parse_amount("amount", "1.234").is_err());
        assert!(parse_amount("amount", "99999999999999999999").is_err());
    }
}

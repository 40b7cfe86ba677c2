//! Field-level validators
//!
//! Pure checks run before any write is attempted. Each rejection names the
//! offending field so the caller can show it as is.

use super::DomainError;

/// Client fields that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidClient {
    pub name: String,
    pub phone: String,
    pub code: String,
}

/// Auto fields that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidAuto {
    pub name: String,
    pub price: f64,
    pub code: String,
    pub manufacturer: String,
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn non_empty(value: &str, message: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Parses a non-negative decimal string: `140000` or `149999.99`
pub fn parse_price(raw: &str) -> Result<f64, DomainError> {
    let invalid = || DomainError::Validation("Auto price is not a valid number".to_string());

    let (whole, fraction) = match raw.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (raw, None),
    };

    if !is_digits(whole) || fraction.is_some_and(|f| !is_digits(f)) {
        return Err(invalid());
    }

    let price: f64 = raw.parse().map_err(|_| invalid())?;
    if !price.is_finite() {
        return Err(invalid());
    }
    Ok(price)
}

pub fn validate_client(name: &str, phone: &str, code: &str) -> Result<ValidClient, DomainError> {
    let name = non_empty(name, "Client name is empty")?;

    if !is_digits(phone) {
        return Err(DomainError::Validation(
            "Client phone number must contain digits only".to_string(),
        ));
    }

    if !is_digits(code) {
        return Err(DomainError::Validation(
            "Client code must contain digits only".to_string(),
        ));
    }

    Ok(ValidClient {
        name,
        phone: phone.to_string(),
        code: code.to_string(),
    })
}

pub fn validate_auto(
    name: &str,
    price: &str,
    code: &str,
    manufacturer: &str,
) -> Result<ValidAuto, DomainError> {
    let name = non_empty(name, "Auto name is empty")?;
    let price = parse_price(price)?;
    let code = non_empty(code, "Auto code is empty")?;
    let manufacturer = non_empty(manufacturer, "Auto manufacturer is empty")?;

    Ok(ValidAuto {
        name,
        price,
        code,
        manufacturer,
    })
}

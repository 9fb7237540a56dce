use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid action: {0}. Must be 'add' or 'remove'")]
    InvalidAction(String),

    #[error("Invalid address format: {0}")]
    InvalidAddress(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub const MAX_PAGE_LIMIT: i64 = 500;

pub fn validate_action(action: &str) -> Result<(), ValidationError> {
    match action {
        "add" | "remove" => Ok(()),
        _ => Err(ValidationError::InvalidAction(action.to_string())),
    }
}

/// `0x` followed by 40 hex digits, any case.
pub fn validate_eth_address(address: &str) -> Result<(), ValidationError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ValidationError::MissingParameter("address".to_string()));
    }

    let hex = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| ValidationError::InvalidAddress(address.to_string()))?;

    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidAddress(address.to_string()));
    }

    Ok(())
}

pub fn validate_address_action(address: &str, action: &str) -> Result<(), ValidationError> {
    if address.trim().is_empty() {
        return Err(ValidationError::MissingParameter("address".to_string()));
    }

    if action.trim().is_empty() {
        return Err(ValidationError::MissingParameter("action".to_string()));
    }

    validate_action(action)?;
    validate_eth_address(address)?;

    Ok(())
}

pub fn validate_offset(raw: Option<&str>) -> Result<i64, ValidationError> {
    let Some(raw) = raw else { return Ok(0) };
    match raw.trim().parse::<i64>() {
        Ok(offset) if offset >= 0 => Ok(offset),
        _ => Err(ValidationError::InvalidParameter(format!("offset must be a non-negative integer, got {:?}", raw))),
    }
}

pub fn validate_limit(raw: Option<&str>) -> Result<i64, ValidationError> {
    let Some(raw) = raw else { return Ok(50) };
    match raw.trim().parse::<i64>() {
        Ok(limit) if (1..=MAX_PAGE_LIMIT).contains(&limit) => Ok(limit),
        _ => Err(ValidationError::InvalidParameter(format!(
            "limit must be between 1 and {}, got {:?}",
            MAX_PAGE_LIMIT, raw
        ))),
    }
}

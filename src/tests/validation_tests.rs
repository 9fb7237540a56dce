#[cfg(test)]
mod tests {
    use crate::api::ApiError;
    use crate::validation::{
        validate_action, validate_address_action, validate_eth_address, validate_limit, validate_offset,
        ValidationError,
    };

    const VALID: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";

    #[test]
    fn test_eth_address_format() {
        assert!(validate_eth_address(VALID).is_ok());
        assert!(validate_eth_address(&VALID.to_lowercase()).is_ok());

        assert!(matches!(validate_eth_address(""), Err(ValidationError::MissingParameter(_))));
        assert!(matches!(validate_eth_address("742d35Cc6634C0532925a3b844Bc454e4438f44e"), Err(ValidationError::InvalidAddress(_))));
        assert!(matches!(validate_eth_address("0x742d35"), Err(ValidationError::InvalidAddress(_))));
        assert!(matches!(validate_eth_address("0xZZ2d35Cc6634C0532925a3b844Bc454e4438f44e"), Err(ValidationError::InvalidAddress(_))));
    }

    #[test]
    fn test_action_validation() {
        assert!(validate_action("add").is_ok());
        assert!(validate_action("remove").is_ok());
        assert!(validate_action("delete").is_err());

        assert!(validate_address_action(VALID, "add").is_ok());
        assert!(matches!(validate_address_action(VALID, ""), Err(ValidationError::MissingParameter(_))));
    }

    #[test]
    fn test_pagination_params() {
        assert_eq!(validate_offset(None).unwrap(), 0);
        assert_eq!(validate_offset(Some("20")).unwrap(), 20);
        assert!(validate_offset(Some("-1")).is_err());

        assert_eq!(validate_limit(None).unwrap(), 50);
        assert_eq!(validate_limit(Some("500")).unwrap(), 500);
        assert!(validate_limit(Some("0")).is_err());
        assert!(validate_limit(Some("501")).is_err());
        assert!(validate_limit(Some("ten")).is_err());
    }

    #[test]
    fn test_validation_maps_to_api_error() {
        let err: ApiError = ValidationError::InvalidAddress("0x1".to_string()).into();
        assert!(matches!(err, ApiError::InvalidAddress));

        let err: ApiError = ValidationError::MissingParameter("address".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}

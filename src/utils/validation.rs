//! Utilidades de validación
//!
//! Helpers de validación para los campos del dominio que el derive de
//! `validator` no cubre (MC numbers, teléfonos, códigos de estado).

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    // MC-123456 o 123456, entre 4 y 8 dígitos
    static ref MC_NUMBER_RE: Regex = Regex::new(r"^(MC-?)?\d{4,8}$").unwrap();
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
    if clean_phone.len() < 10 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de MC number (autoridad de transporte)
pub fn validate_mc_number(value: &str) -> Result<(), ValidationError> {
    if !MC_NUMBER_RE.is_match(value.trim()) {
        let mut error = ValidationError::new("mc_number");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"MC-123456 or 123456".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar un código de estado US de dos letras
pub fn validate_state_code(value: &str) -> Result<(), ValidationError> {
    let code = value.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        let mut error = ValidationError::new("state_code");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar los campos requeridos de un load request.
/// Devuelve la lista de campos faltantes para construir un mensaje 400 claro.
pub fn missing_request_fields(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_state_code() {
        assert!(validate_state_code("TX").is_ok());
        assert!(validate_state_code("ga").is_ok());
        assert!(validate_state_code("Texas").is_err());
        assert!(validate_state_code("T1").is_err());
        assert!(validate_state_code("").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("1234567890").is_ok());
        assert!(validate_phone("(555) 123-4567").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }

    #[test]
    fn test_validate_mc_number() {
        assert!(validate_mc_number("MC-123456").is_ok());
        assert!(validate_mc_number("MC123456").is_ok());
        assert!(validate_mc_number("123456").is_ok());
        assert!(validate_mc_number("MC-12").is_err());
        assert!(validate_mc_number("ABC").is_err());
    }

    #[test]
    fn test_missing_request_fields() {
        let missing = missing_request_fields(&[
            ("driver_name", "John"),
            ("company_name", ""),
            ("mc_number", "   "),
        ]);
        assert_eq!(missing, vec!["company_name", "mc_number"]);
    }
}

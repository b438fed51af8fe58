// Input validation for auth forms
use thiserror::Error;

pub const PHONE_DIGITS: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter an 11-digit phone number")]
    InvalidPhone,
    #[error("Please enter your name")]
    MissingName,
    #[error("Please enter your company name")]
    MissingCompany,
    #[error("Please select a well")]
    MissingWell,
    #[error("Invalid time window: {0}")]
    InvalidTimeWindow(String),
}

/// Phone number accepted by the login and register endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let phone = input.trim();
        if phone.len() != PHONE_DIGITS || !phone.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidPhone);
        }
        Ok(Self(phone.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub phone: PhoneNumber,
    pub company: String,
}

impl Registration {
    /// Fields are checked in form order: name, phone, company.
    pub fn parse(name: &str, phone: &str, company: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let phone = PhoneNumber::parse(phone)?;
        let company = company.trim();
        if company.is_empty() {
            return Err(ValidationError::MissingCompany);
        }
        Ok(Self {
            name: name.to_string(),
            phone,
            company: company.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_requires_eleven_digits() {
        assert_eq!(PhoneNumber::parse("12345"), Err(ValidationError::InvalidPhone));
        assert_eq!(PhoneNumber::parse(""), Err(ValidationError::InvalidPhone));
        assert_eq!(PhoneNumber::parse("1380013800a"), Err(ValidationError::InvalidPhone));
        assert_eq!(PhoneNumber::parse("138001380000"), Err(ValidationError::InvalidPhone));

        let phone = PhoneNumber::parse(" 13800138000 ").unwrap();
        assert_eq!(phone.as_str(), "13800138000");
    }

    #[test]
    fn test_registration_field_order() {
        assert_eq!(
            Registration::parse(" ", "123", ""),
            Err(ValidationError::MissingName)
        );
        assert_eq!(
            Registration::parse("Li", "123", ""),
            Err(ValidationError::InvalidPhone)
        );
        assert_eq!(
            Registration::parse("Li", "13800138000", "  "),
            Err(ValidationError::MissingCompany)
        );

        let form = Registration::parse(" Li ", "13800138000", " CNPC ").unwrap();
        assert_eq!(form.name, "Li");
        assert_eq!(form.company, "CNPC");
    }
}

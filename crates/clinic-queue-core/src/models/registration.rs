//! Registration input as collected by the reception desk.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Raw registration form. Every field is free text, as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegistrationForm {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub condition: String,
}

/// Registration input that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRegistration {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub phone: String,
    pub address: Option<String>,
    pub condition: String,
}

impl RegistrationForm {
    /// Validate required fields, then age.
    ///
    /// Missing fields are reported together, in form order.
    pub fn validate(&self) -> Result<ValidatedRegistration, ValidationError> {
        let required = [
            ("name", &self.name),
            ("age", &self.age),
            ("gender", &self.gender),
            ("phone", &self.phone),
            ("condition", &self.condition),
        ];

        let missing: Vec<String> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let age = parse_age(&self.age)?;
        let address = Some(self.address.trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        Ok(ValidatedRegistration {
            name: self.name.trim().to_string(),
            age,
            gender: self.gender.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address,
            condition: self.condition.trim().to_string(),
        })
    }
}

fn parse_age(raw: &str) -> Result<u32, ValidationError> {
    match raw.trim().parse::<u32>() {
        Ok(age) if age > 0 => Ok(age),
        _ => Err(ValidationError::InvalidAge(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_form() -> RegistrationForm {
        RegistrationForm {
            name: "John Doe".into(),
            age: "35".into(),
            gender: "Male".into(),
            phone: "+1234567890".into(),
            address: String::new(),
            condition: "Fever".into(),
        }
    }

    #[test]
    fn test_valid_form() {
        let validated = make_form().validate().unwrap();
        assert_eq!(validated.name, "John Doe");
        assert_eq!(validated.age, 35);
        assert_eq!(validated.address, None);
    }

    #[test]
    fn test_address_kept_when_present() {
        let mut form = make_form();
        form.address = "  12 Main St ".into();
        let validated = form.validate().unwrap();
        assert_eq!(validated.address.as_deref(), Some("12 Main St"));
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        let form = RegistrationForm {
            name: "   ".into(),
            age: String::new(),
            condition: "Cough".into(),
            ..Default::default()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec![
                "name".into(),
                "age".into(),
                "gender".into(),
                "phone".into(),
            ])
        );
    }

    #[test]
    fn test_invalid_age() {
        for bad in ["0", "-3", "thirty", "35.5"] {
            let mut form = make_form();
            form.age = bad.into();
            assert_eq!(
                form.validate().unwrap_err(),
                ValidationError::InvalidAge(bad.into())
            );
        }
    }
}

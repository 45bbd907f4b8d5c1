//! Validation rules for form and filter fields

/// Validation rules for a field
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl ValidationRules {
    /// No constraints
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    /// Non-negative number (weights, prices)
    pub const fn non_negative() -> Self {
        Self {
            min: Some(0.0),
            ..Self::none()
        }
    }

    pub const fn max_length(len: usize) -> Self {
        Self {
            max_length: Some(len),
            ..Self::none()
        }
    }

    /// Validate a string value against the rules
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        if self.required && value.trim().is_empty() {
            return Err(format!("{} is required", field_label));
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!("{} must be at least {} characters", field_label, min));
            }
        }

        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!("{} must be at most {} characters", field_label, max));
            }
        }

        Ok(())
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if !value.is_finite() {
            return Err(format!("{} must be a number", field_label));
        }

        if let Some(min) = self.min {
            if value < min {
                return Err(format!("{} must be at least {}", field_label, min));
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(format!("{} must be at most {}", field_label, max));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank() {
        let rules = ValidationRules::required();
        assert!(rules.validate_string("  ", "Lot No").is_err());
        assert!(rules.validate_string("L1", "Lot No").is_ok());
    }

    #[test]
    fn non_negative_bounds() {
        let rules = ValidationRules::non_negative();
        assert_eq!(
            rules.validate_number(-1.0, "Weight"),
            Err("Weight must be at least 0".to_string())
        );
        assert!(rules.validate_number(0.0, "Weight").is_ok());
        assert!(rules.validate_number(f64::NAN, "Weight").is_err());
    }

    #[test]
    fn max_length_counts_chars() {
        let rules = ValidationRules::max_length(3);
        assert!(rules.validate_string("чай", "Mark").is_ok());
        assert!(rules.validate_string("чайн", "Mark").is_err());
    }
}

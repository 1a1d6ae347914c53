//! Local user profile.
//!
//! Preferences (default subject, timer length) live in
//! [`Config`](crate::Config); the profile only carries identity and dates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub join_date: DateTime<Utc>,
    pub last_active_date: DateTime<Utc>,
}

impl UserProfile {
    /// # Errors
    /// Returns an error for a blank name.
    pub fn new(name: &str, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "must not be empty".into(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            join_date: now,
            last_active_date: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        let now = Utc::now();
        let p = UserProfile::new("  Asha ", now).unwrap();
        assert_eq!(p.name, "Asha");
        assert_eq!(p.join_date, p.last_active_date);
    }

    #[test]
    fn blank_name_rejected() {
        assert!(UserProfile::new("   ", Utc::now()).is_err());
    }
}

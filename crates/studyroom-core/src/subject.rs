use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Study subject tracked by tasks and sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Physics,
    Chemistry,
    Mathematics,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Physics, Subject::Chemistry, Subject::Mathematics];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Physics => "physics",
            Subject::Chemistry => "chemistry",
            Subject::Mathematics => "mathematics",
        }
    }

    /// Capitalised name for human-facing text.
    pub fn label(&self) -> &'static str {
        match self {
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Mathematics => "Mathematics",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Subject {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "physics" | "phy" => Ok(Subject::Physics),
            "chemistry" | "chem" => Ok(Subject::Chemistry),
            "mathematics" | "maths" | "math" => Ok(Subject::Mathematics),
            _ => Err(ValidationError::UnknownSubject(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Physics".parse::<Subject>().unwrap(), Subject::Physics);
        assert_eq!("CHEMISTRY".parse::<Subject>().unwrap(), Subject::Chemistry);
        assert_eq!(" maths ".parse::<Subject>().unwrap(), Subject::Mathematics);
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!("biology".parse::<Subject>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Subject::Mathematics).unwrap();
        assert_eq!(json, "\"mathematics\"");
    }
}

use serde::{Deserialize, Serialize};

/// Named timer length offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub label: String,
    /// Duration in minutes.
    pub minutes: u64,
    #[serde(default)]
    pub description: String,
}

impl Preset {
    fn new(label: &str, minutes: u64, description: &str) -> Self {
        Self {
            label: label.into(),
            minutes,
            description: description.into(),
        }
    }

    /// Get preset duration in seconds.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn duration_secs(&self) -> u64 {
        self.minutes.saturating_mul(60)
    }

    /// Case-insensitive match on label, ignoring spaces and dashes.
    pub fn matches(&self, name: &str) -> bool {
        normalize(&self.label) == normalize(name)
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Built-in presets.
pub fn default_presets() -> Vec<Preset> {
    vec![
        Preset::new("Pomodoro", 25, "Classic 25-minute focus session"),
        Preset::new("Short Break", 5, "Quick 5-minute break"),
        Preset::new("Long Break", 15, "Extended 15-minute break"),
        Preset::new("Focus Block", 45, "Deep focus 45-minute session"),
        Preset::new("Study Hour", 60, "Full hour study session"),
        Preset::new("Quick Review", 10, "10-minute review session"),
    ]
}

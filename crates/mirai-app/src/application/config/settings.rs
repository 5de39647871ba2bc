use mirai_domain::shared::DateMode;

/// Centralized streak evaluation configuration
#[derive(Debug, Clone)]
pub struct StreakSettings {
    /// Ignore diary entries dated before the user registered (default: true)
    pub registration_floor: bool,

    /// Which calendar day counts as "today" (default: UTC)
    pub date_mode: DateMode,
}

impl Default for StreakSettings {
    fn default() -> Self {
        Self {
            registration_floor: true,
            date_mode: DateMode::Utc,
        }
    }
}

impl StreakSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: toggle the registration-date floor
    pub fn with_registration_floor(mut self, enabled: bool) -> Self {
        self.registration_floor = enabled;
        self
    }

    /// Builder pattern: set the date mode
    pub fn with_date_mode(mut self, mode: DateMode) -> Self {
        self.date_mode = mode;
        self
    }
}

mod settings;

pub use settings::StreakSettings;

use chrono::{Local, NaiveDate, Utc};

/// Which calendar the deployment treats as "today".
///
/// The streak rules compare entry dates against the evaluation date, so the
/// answer shifts around midnight depending on this choice. Default is UTC;
/// deployments serving a single region may prefer local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateMode {
    #[default]
    Utc,
    Local,
}

/// Source of the evaluation date. Kept injectable so tests can pin "today".
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    mode: DateMode,
}

impl SystemClock {
    pub fn new(mode: DateMode) -> Self {
        Self { mode }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.mode {
            DateMode::Utc => Utc::now().date_naive(),
            DateMode::Local => Local::now().date_naive(),
        }
    }
}

//! Composition root: opens the database, wires repositories into queries and
//! services, and hands back one ready-to-use context.

use std::path::PathBuf;
use std::sync::Arc;

use log::info;

use crate::application::config::StreakSettings;
use crate::application::queries::{DiaryQueries, StreakQueries};
use crate::application::services::{AuthService, DiaryService, MilestoneService};
use crate::application::utils::ResultExt;
use mirai_domain::diary::DiaryEntryRepository;
use mirai_domain::generation::{ImageGenerator, TextGenerator};
use mirai_domain::session::SessionRepository;
use mirai_domain::shared::{Clock, DomainError, SystemClock};
use mirai_domain::user::{PassphraseHasher, UserRepository};
use mirai_infrastructure::generation::{GenerationSettings, HttpImageGenerator, HttpTextGenerator};
use mirai_infrastructure::logging::init_logging;
use mirai_infrastructure::persistence::repositories::{
    SqliteDiaryEntryRepository, SqliteSessionRepository, SqliteUserRepository,
};
use mirai_infrastructure::persistence::{Database, DatabaseSettings};
use mirai_infrastructure::security::Argon2PassphraseHasher;

pub struct AppSettings {
    pub database_path: String,
    pub database: DatabaseSettings,
    /// When set, file logging is initialized under this directory.
    pub log_dir: Option<PathBuf>,
    pub generation: GenerationSettings,
    pub streak: StreakSettings,
}

/// Fully wired application services, shared behind Arcs so an HTTP layer can
/// clone them per handler.
pub struct AppContext {
    pub auth_service: Arc<AuthService>,
    pub diary_service: Arc<DiaryService>,
    pub milestone_service: Arc<MilestoneService>,
    pub diary_queries: Arc<DiaryQueries>,
    pub streak_queries: Arc<StreakQueries>,
}

pub async fn build(settings: AppSettings) -> Result<AppContext, DomainError> {
    if let Some(log_dir) = &settings.log_dir {
        init_logging(log_dir.clone()).infra_context("initialize logging")?;
    }

    let db = Database::open(&settings.database_path, settings.database).await?;
    let pool = Arc::new(db.pool().clone());

    let entry_repo: Arc<dyn DiaryEntryRepository> =
        Arc::new(SqliteDiaryEntryRepository::new(pool.clone()));
    let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool.clone()));
    let session_repo: Arc<dyn SessionRepository> = Arc::new(SqliteSessionRepository::new(pool));

    let text_generator: Arc<dyn TextGenerator> =
        Arc::new(HttpTextGenerator::new(&settings.generation).infra_context("build text client")?);
    let image_generator: Arc<dyn ImageGenerator> =
        Arc::new(HttpImageGenerator::new(&settings.generation).infra_context("build image client")?);
    let hasher: Arc<dyn PassphraseHasher> = Arc::new(Argon2PassphraseHasher::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(settings.streak.date_mode));

    let streak_queries = Arc::new(StreakQueries::new(
        entry_repo.clone(),
        user_repo.clone(),
        clock,
        settings.streak.clone(),
    ));

    let context = AppContext {
        auth_service: Arc::new(AuthService::new(
            user_repo.clone(),
            session_repo,
            hasher,
            image_generator.clone(),
        )),
        diary_service: Arc::new(DiaryService::new(entry_repo.clone(), text_generator)),
        milestone_service: Arc::new(MilestoneService::new(
            streak_queries.clone(),
            entry_repo.clone(),
            user_repo,
            image_generator,
        )),
        diary_queries: Arc::new(DiaryQueries::new(entry_repo)),
        streak_queries,
    };

    info!(
        "[bootstrap] application wired database={}",
        settings.database_path
    );

    Ok(context)
}

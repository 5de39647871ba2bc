//! End-to-end flow over a real SQLite file: register, journal a week,
//! read the streak back.

use chrono::{Datelike, Duration, Utc};
use url::Url;

use mirai_app::application::dtos::{RegisterUserInput, SaveEntryInput};
use mirai_app::{bootstrap, AppSettings, StreakSettings};
use mirai_infrastructure::generation::GenerationSettings;
use mirai_infrastructure::persistence::DatabaseSettings;

fn settings(db_path: &str) -> AppSettings {
    // Endpoints point at a closed port; cover generation fails fast and
    // registration is expected to shrug it off.
    let endpoint = Url::parse("http://127.0.0.1:9/generate").unwrap();
    AppSettings {
        database_path: db_path.to_string(),
        database: DatabaseSettings::default(),
        log_dir: None,
        generation: GenerationSettings::new(endpoint.clone(), endpoint, "test-key".to_string())
            .with_timeout(std::time::Duration::from_millis(200)),
        // Entries are backdated before the registration moment below, so the
        // floor has to be off for this scenario.
        streak: StreakSettings::default().with_registration_floor(false),
    }
}

#[tokio::test]
async fn test_register_journal_week_and_read_streak() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("diary.db");
    let context = bootstrap::build(settings(db_path.to_str().unwrap()))
        .await
        .unwrap();

    let token = context
        .auth_service
        .register(RegisterUserInput {
            user_name: "mika".to_string(),
            passphrase: "correct horse".to_string(),
            favorite_colors: vec![],
            favorite_season: None,
            occupation: None,
            hobbies: None,
        })
        .await
        .unwrap();
    assert_eq!(token.token_type, "bearer");

    let user_id = context
        .auth_service
        .verify_token(&token.access_token)
        .await
        .unwrap();

    // Seven consecutive journaled days ending today
    let today = Utc::now().date_naive();
    for offset in (0..7).rev() {
        let date = (today - Duration::days(offset)).format("%Y-%m-%d").to_string();
        context
            .diary_service
            .save_entry(
                user_id.as_str(),
                &date,
                SaveEntryInput {
                    plan_text: Some("walk".to_string()),
                    actual_text: Some("walked".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    let status = context
        .streak_queries
        .get_streak_status(user_id.as_str())
        .await
        .unwrap();
    assert!(status.has_seven_day_streak);
    assert_eq!(status.completed_streaks_count, 1);
    assert_eq!(status.current_streak, 0);
    assert_eq!(status.needed_for_seven, 7);

    // The stored page is readable through the query side
    let entry = context
        .diary_queries
        .get_entry(user_id.as_str(), &today.format("%Y-%m-%d").to_string())
        .await
        .unwrap()
        .expect("today's entry should exist");
    assert_eq!(entry.actual_text.as_deref(), Some("walked"));

    // Calendar for the current month resolves without error
    let calendar = context
        .streak_queries
        .get_calendar(user_id.as_str(), today.year(), today.month())
        .await
        .unwrap();
    assert_eq!(calendar.month_stats.total_days as usize, calendar.days.len());
}

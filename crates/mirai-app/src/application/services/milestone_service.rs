use std::sync::Arc;

use futures::future::try_join_all;
use log::info;

use crate::application::dtos::{MilestoneArtDto, StreakWindowDto};
use crate::application::queries::StreakQueries;
use mirai_domain::diary::{DiaryEntry, DiaryEntryRepository};
use mirai_domain::generation::{ImageGenerator, ImagePrompt};
use mirai_domain::shared::{DomainError, UserId};
use mirai_domain::streak::StreakWindow;
use mirai_domain::user::{User, UserRepository};

const EXCERPT_CHARS: usize = 80;

/// Celebration artwork for a banked seven-day streak: one image distilled
/// from the week's entries.
pub struct MilestoneService {
    streak_queries: Arc<StreakQueries>,
    entry_repo: Arc<dyn DiaryEntryRepository>,
    user_repo: Arc<dyn UserRepository>,
    image_generator: Arc<dyn ImageGenerator>,
}

impl MilestoneService {
    pub fn new(
        streak_queries: Arc<StreakQueries>,
        entry_repo: Arc<dyn DiaryEntryRepository>,
        user_repo: Arc<dyn UserRepository>,
        image_generator: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            streak_queries,
            entry_repo,
            user_repo,
            image_generator,
        }
    }

    /// Render album art for the most recently completed window. Fails with
    /// `StreakNotCompleted` when no window has been banked yet.
    pub async fn celebrate_latest_streak(
        &self,
        user_id: &str,
    ) -> Result<MilestoneArtDto, DomainError> {
        let window = self
            .streak_queries
            .latest_completed_window(user_id)
            .await?
            .ok_or_else(|| {
                DomainError::StreakNotCompleted(
                    "A completed seven-day streak is required".to_string(),
                )
            })?;

        let uid = UserId::from_string(user_id);
        let user = self
            .user_repo
            .find_by_id(&uid)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))?;

        let fetches = window
            .dates()
            .iter()
            .map(|d| self.entry_repo.find_by_user_and_date(&uid, *d));
        let entries: Vec<DiaryEntry> = try_join_all(fetches)
            .await?
            .into_iter()
            .flatten()
            .collect();

        let prompt = album_prompt(&user, &window, &entries);
        let image = self.image_generator.generate(&prompt).await?;

        info!(
            "[milestone] streak art generated user_id={} window={}..{} generation_id={}",
            user_id,
            window.start_date(),
            window.end_date(),
            image.generation_id.as_str()
        );

        Ok(MilestoneArtDto {
            user_id: user_id.to_string(),
            generation_id: image.generation_id.as_str().to_string(),
            image_url: image.public_url,
            prompt_used: image.prompt_used,
            window: StreakWindowDto::from(&window),
        })
    }
}

/// One storybook panel prompt summarizing the week, one line per day.
fn album_prompt(user: &User, window: &StreakWindow, entries: &[DiaryEntry]) -> ImagePrompt {
    let mut prompt = format!(
        "A celebratory watercolor album cover for {}'s seven-day diary streak, {} to {}.",
        user.user_name(),
        window.start_date(),
        window.end_date()
    );

    let profile = user.profile();
    if !profile.favorite_colors.is_empty() {
        prompt.push_str(&format!(
            " Palette: {}.",
            profile.favorite_colors.join(", ")
        ));
    }

    for entry in entries {
        if let Some(text) = entry.actual_text() {
            prompt.push_str(&format!(
                "\nDay {}: {}",
                entry.date(),
                excerpt(text, EXCERPT_CHARS)
            ));
        }
    }

    ImagePrompt {
        prompt,
        style: "storybook watercolor".to_string(),
        aspect_ratio: "1:1".to_string(),
    }
}

/// First `max_chars` characters of the text, counted in chars so multi-byte
/// scripts are never split.
fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

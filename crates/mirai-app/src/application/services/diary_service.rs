use std::sync::Arc;

use chrono::Utc;
use log::info;

use crate::application::dtos::{ComposedDiaryDto, DiaryEntryDto, DiffSummaryDto, SaveEntryInput};
use crate::application::queries::diary_queries::parse_date;
use mirai_domain::diary::{DiaryEntry, DiaryEntryRepository};
use mirai_domain::generation::TextGenerator;
use mirai_domain::shared::{DomainError, UserId};

const FALLBACK_IMAGE_PROMPT: &str =
    "A serene watercolor landscape of a quiet day, soft light, gentle colors";

/// Saving diary pages plus the text-generation flows built on top of them.
pub struct DiaryService {
    entry_repo: Arc<dyn DiaryEntryRepository>,
    text_generator: Arc<dyn TextGenerator>,
}

impl DiaryService {
    pub fn new(
        entry_repo: Arc<dyn DiaryEntryRepository>,
        text_generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            entry_repo,
            text_generator,
        }
    }

    /// Upsert the entry for `(user, date)`. Existing pages are merged
    /// field-by-field; a fresh page is created otherwise.
    pub async fn save_entry(
        &self,
        user_id: &str,
        date: &str,
        input: SaveEntryInput,
    ) -> Result<DiaryEntryDto, DomainError> {
        let date = parse_date(date)?;
        let user_id = UserId::from_string(user_id);
        let now = Utc::now();

        let entry = match self.entry_repo.find_by_user_and_date(&user_id, date).await? {
            Some(mut existing) => {
                existing.apply(input.into_draft(), now);
                existing
            }
            None => DiaryEntry::new(user_id, date, input.into_draft(), now),
        };

        self.entry_repo.save(&entry).await?;

        info!(
            "[diary] saved user_id={} date={} version={}",
            entry.user_id().as_str(),
            entry.date(),
            entry.version()
        );

        Ok(DiaryEntryDto::from(&entry))
    }

    /// Summarize how the day diverged from the plan and store the result on
    /// the entry. Both texts must be present.
    pub async fn generate_diff_summary(
        &self,
        user_id: &str,
        date: &str,
    ) -> Result<DiffSummaryDto, DomainError> {
        let parsed = parse_date(date)?;
        let user_id = UserId::from_string(user_id);

        let mut entry = self
            .entry_repo
            .find_by_user_and_date(&user_id, parsed)
            .await?
            .ok_or_else(|| DomainError::EntryNotFound(format!("{} on {}", user_id, parsed)))?;

        let plan = entry
            .plan_text()
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string);
        let actual = entry
            .actual_text()
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string);
        let (plan, actual) = match (plan, actual) {
            (Some(p), Some(a)) => (p, a),
            _ => {
                return Err(DomainError::Validation(
                    "Both plan and reflection text are required for a diff summary".to_string(),
                ))
            }
        };

        let prompt = diff_prompt(&plan, &actual);
        let diff_text = self.text_generator.generate(&prompt).await?.trim().to_string();

        entry.set_diff_text(diff_text.clone(), Utc::now());
        self.entry_repo.save(&entry).await?;

        info!(
            "[diary] diff summary generated user_id={} date={}",
            user_id.as_str(),
            parsed
        );

        Ok(DiffSummaryDto {
            user_id: user_id.as_str().to_string(),
            date: parsed.format("%Y-%m-%d").to_string(),
            diff_text,
        })
    }

    /// Turn a rough plan and interests into diary prose plus an artwork
    /// prompt. Not persisted; the caller decides whether to keep it.
    pub async fn compose_future_diary(
        &self,
        plan: Option<&str>,
        interests: &[String],
    ) -> Result<ComposedDiaryDto, DomainError> {
        let prompt = compose_prompt(plan, interests);
        let raw = self.text_generator.generate(&prompt).await?;
        Ok(parse_composed(&raw))
    }
}

fn diff_prompt(plan: &str, actual: &str) -> String {
    format!(
        "The plan for the day was:\n{}\n\nWhat actually happened:\n{}\n\n\
         Write a short, kind summary of how the day diverged from the plan. \
         Two or three sentences, second person, no preamble.",
        plan, actual
    )
}

fn compose_prompt(plan: Option<&str>, interests: &[String]) -> String {
    let mut prompt = String::from(
        "Write a diary entry describing tomorrow as if it already happened, \
         first person, warm and concrete.",
    );
    if let Some(plan) = plan.filter(|p| !p.trim().is_empty()) {
        prompt.push_str(&format!(" The rough plan: {}.", plan.trim()));
    }
    if !interests.is_empty() {
        prompt.push_str(&format!(" Weave in: {}.", interests.join(", ")));
    }
    prompt.push_str(
        "\n\nReply with exactly two lines:\n\
         Diary: <the diary text>\n\
         Image prompt: <a watercolor illustration prompt for the day>",
    );
    prompt
}

/// Pull the two labelled lines out of the model reply, falling back to the
/// raw text when the model ignores the format.
fn parse_composed(raw: &str) -> ComposedDiaryDto {
    let mut diary_text = None;
    let mut image_prompt = None;

    for line in raw.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("Diary:") {
            diary_text = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("Image prompt:") {
            image_prompt = Some(rest.trim().to_string());
        } else if image_prompt.is_none() && line.to_lowercase().contains("watercolor") {
            image_prompt = Some(line.to_string());
        }
    }

    ComposedDiaryDto {
        diary_text: diary_text
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| raw.trim().to_string()),
        image_prompt: image_prompt
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| FALLBACK_IMAGE_PROMPT.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::test_support::{MockDiaryEntryRepository, MockTextGenerator};
    use mirai_domain::diary::DiaryEntryRepository;

    fn saved_input(plan: &str, actual: &str) -> SaveEntryInput {
        SaveEntryInput {
            plan_text: Some(plan.to_string()),
            actual_text: Some(actual.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_save_entry_creates_then_merges() {
        let repo = Arc::new(MockDiaryEntryRepository::new());
        let service = DiaryService::new(repo, Arc::new(MockTextGenerator::returning("")));

        let first = service
            .save_entry("u1", "2025-06-01", saved_input("hike", "rained, stayed in"))
            .await
            .unwrap();
        assert_eq!(first.version, 1);

        let second = service
            .save_entry(
                "u1",
                "2025-06-01",
                SaveEntryInput {
                    tags: vec!["rain".to_string()],
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(second.version, 2);
        assert_eq!(second.plan_text.as_deref(), Some("hike"));
        assert_eq!(second.tags, vec!["rain".to_string()]);
    }

    #[tokio::test]
    async fn test_save_entry_rejects_bad_date() {
        let service = DiaryService::new(
            Arc::new(MockDiaryEntryRepository::new()),
            Arc::new(MockTextGenerator::returning("")),
        );
        let result = service
            .save_entry("u1", "June 1st", SaveEntryInput::default())
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_diff_summary_stores_generated_text() {
        let repo = Arc::new(MockDiaryEntryRepository::new());
        let service = DiaryService::new(
            repo.clone(),
            Arc::new(MockTextGenerator::returning("  You mostly stayed dry.  ")),
        );

        service
            .save_entry("u1", "2025-06-01", saved_input("hike", "rained"))
            .await
            .unwrap();
        let summary = service.generate_diff_summary("u1", "2025-06-01").await.unwrap();
        assert_eq!(summary.diff_text, "You mostly stayed dry.");

        let stored = repo
            .find_by_user_and_date(
                &UserId::from_string("u1"),
                parse_date("2025-06-01").unwrap(),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.diff_text(), Some("You mostly stayed dry."));
        assert_eq!(stored.version(), 2);
    }

    #[tokio::test]
    async fn test_diff_summary_requires_both_texts() {
        let repo = Arc::new(MockDiaryEntryRepository::new());
        let service = DiaryService::new(
            repo,
            Arc::new(MockTextGenerator::returning("irrelevant")),
        );

        service
            .save_entry(
                "u1",
                "2025-06-01",
                SaveEntryInput {
                    plan_text: Some("hike".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let result = service.generate_diff_summary("u1", "2025-06-01").await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_diff_summary_missing_entry() {
        let service = DiaryService::new(
            Arc::new(MockDiaryEntryRepository::new()),
            Arc::new(MockTextGenerator::returning("irrelevant")),
        );
        let result = service.generate_diff_summary("u1", "2025-06-01").await;
        assert!(matches!(result, Err(DomainError::EntryNotFound(_))));
    }

    #[tokio::test]
    async fn test_compose_parses_labelled_reply() {
        let service = DiaryService::new(
            Arc::new(MockDiaryEntryRepository::new()),
            Arc::new(MockTextGenerator::returning(
                "Diary: I walked along the river at dawn.\n\
                 Image prompt: A watercolor river at sunrise.",
            )),
        );

        let composed = service
            .compose_future_diary(Some("river walk"), &["photography".to_string()])
            .await
            .unwrap();
        assert_eq!(composed.diary_text, "I walked along the river at dawn.");
        assert_eq!(composed.image_prompt, "A watercolor river at sunrise.");
    }

    #[tokio::test]
    async fn test_compose_falls_back_on_unlabelled_reply() {
        let service = DiaryService::new(
            Arc::new(MockDiaryEntryRepository::new()),
            Arc::new(MockTextGenerator::returning("Just some free-form prose.")),
        );

        let composed = service.compose_future_diary(None, &[]).await.unwrap();
        assert_eq!(composed.diary_text, "Just some free-form prose.");
        assert_eq!(composed.image_prompt, FALLBACK_IMAGE_PROMPT);
    }

    #[tokio::test]
    async fn test_compose_propagates_generator_failure() {
        let service = DiaryService::new(
            Arc::new(MockDiaryEntryRepository::new()),
            Arc::new(MockTextGenerator::failing("model offline")),
        );
        let result = service.compose_future_diary(None, &[]).await;
        assert!(matches!(result, Err(DomainError::Generation(_))));
    }
}

use serde::{Deserialize, Serialize};

use mirai_domain::diary::{DiaryEntry, DiaryEntryDraft};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryEntryDto {
    pub user_id: String,
    pub date: String, // YYYY-MM-DD
    pub plan_text: Option<String>,
    pub plan_image_url: Option<String>,
    pub actual_text: Option<String>,
    pub actual_image_url: Option<String>,
    pub diff_text: Option<String>,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    pub version: i64,
}

impl From<&DiaryEntry> for DiaryEntryDto {
    fn from(entry: &DiaryEntry) -> Self {
        Self {
            user_id: entry.user_id().as_str().to_string(),
            date: entry.date().format("%Y-%m-%d").to_string(),
            plan_text: entry.plan_text().map(str::to_string),
            plan_image_url: entry.plan_image_url().map(str::to_string),
            actual_text: entry.actual_text().map(str::to_string),
            actual_image_url: entry.actual_image_url().map(str::to_string),
            diff_text: entry.diff_text().map(str::to_string),
            tags: entry.tags().to_vec(),
            created_at: entry.created_at().to_rfc3339(),
            updated_at: entry.updated_at().to_rfc3339(),
            version: entry.version(),
        }
    }
}

/// Incoming save payload. Absent fields leave stored values untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveEntryInput {
    pub plan_text: Option<String>,
    pub plan_image_url: Option<String>,
    pub actual_text: Option<String>,
    pub actual_image_url: Option<String>,
    pub diff_text: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SaveEntryInput {
    pub fn into_draft(self) -> DiaryEntryDraft {
        DiaryEntryDraft {
            plan_text: self.plan_text,
            plan_image_url: self.plan_image_url,
            actual_text: self.actual_text,
            actual_image_url: self.actual_image_url,
            diff_text: self.diff_text,
            tags: self.tags,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffSummaryDto {
    pub user_id: String,
    pub date: String,
    pub diff_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposedDiaryDto {
    pub diary_text: String,
    pub image_prompt: String,
}

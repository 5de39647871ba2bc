use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::UserId;

/// Incoming field values for a save. `None` leaves the stored value alone,
/// `Some` overwrites it; tags are replaced only when non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiaryEntryDraft {
    pub plan_text: Option<String>,
    pub plan_image_url: Option<String>,
    pub actual_text: Option<String>,
    pub actual_image_url: Option<String>,
    pub diff_text: Option<String>,
    pub tags: Vec<String>,
}

/// One diary page. At most one entry exists per user and calendar date;
/// `(user_id, date)` is the natural key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryEntry {
    user_id: UserId,
    date: NaiveDate,
    plan_text: Option<String>,
    plan_image_url: Option<String>,
    actual_text: Option<String>,
    actual_image_url: Option<String>,
    diff_text: Option<String>,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i64,
}

impl DiaryEntry {
    pub fn new(user_id: UserId, date: NaiveDate, draft: DiaryEntryDraft, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            date,
            plan_text: draft.plan_text,
            plan_image_url: draft.plan_image_url,
            actual_text: draft.actual_text,
            actual_image_url: draft.actual_image_url,
            diff_text: draft.diff_text,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        user_id: UserId,
        date: NaiveDate,
        plan_text: Option<String>,
        plan_image_url: Option<String>,
        actual_text: Option<String>,
        actual_image_url: Option<String>,
        diff_text: Option<String>,
        tags: Vec<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        version: i64,
    ) -> Self {
        Self {
            user_id,
            date,
            plan_text,
            plan_image_url,
            actual_text,
            actual_image_url,
            diff_text,
            tags,
            created_at,
            updated_at,
            version,
        }
    }

    /// Merge a draft into the entry, bumping `version` and `updated_at`.
    pub fn apply(&mut self, draft: DiaryEntryDraft, now: DateTime<Utc>) {
        if draft.plan_text.is_some() {
            self.plan_text = draft.plan_text;
        }
        if draft.plan_image_url.is_some() {
            self.plan_image_url = draft.plan_image_url;
        }
        if draft.actual_text.is_some() {
            self.actual_text = draft.actual_text;
        }
        if draft.actual_image_url.is_some() {
            self.actual_image_url = draft.actual_image_url;
        }
        if draft.diff_text.is_some() {
            self.diff_text = draft.diff_text;
        }
        if !draft.tags.is_empty() {
            self.tags = draft.tags;
        }
        self.updated_at = now;
        self.version += 1;
    }

    pub fn set_diff_text(&mut self, diff_text: String, now: DateTime<Utc>) {
        self.diff_text = Some(diff_text);
        self.updated_at = now;
        self.version += 1;
    }

    /// Whether the day counts as journaled: the reflection text must be
    /// non-blank after trimming. The plan alone never counts.
    pub fn has_reflection(&self) -> bool {
        self.actual_text
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn plan_text(&self) -> Option<&str> {
        self.plan_text.as_deref()
    }

    pub fn plan_image_url(&self) -> Option<&str> {
        self.plan_image_url.as_deref()
    }

    pub fn actual_text(&self) -> Option<&str> {
        self.actual_text.as_deref()
    }

    pub fn actual_image_url(&self) -> Option<&str> {
        self.actual_image_url.as_deref()
    }

    pub fn diff_text(&self) -> Option<&str> {
        self.diff_text.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn version(&self) -> i64 {
        self.version
    }
}

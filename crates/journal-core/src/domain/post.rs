use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a single journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub read_time: Option<String>,
    /// Display date, e.g. "October 28, 2025". Independent of the timestamps.
    pub date: Option<String>,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Refresh `updated_at`, never moving it backwards or leaving it equal.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

/// Insert payload for a post whose display fields are already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub read_time: String,
    pub date: String,
}

/// Partial update. `None` leaves the stored column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub read_time: Option<String>,
    pub date: Option<String>,
}

impl PostChanges {
    pub fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(excerpt) = self.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(category) = self.category {
            post.category = category;
        }
        if let Some(read_time) = self.read_time {
            post.read_time = Some(read_time);
        }
        if let Some(date) = self.date {
            post.date = Some(date);
        }
        post.touch();
    }
}

/// Author input for a new post, before generated metadata is merged in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub content: String,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl PostDraft {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }
}

/// Which posts a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// The authenticated writer sees everything.
    All,
    PublicOnly,
}

impl Visibility {
    pub fn for_writer(authenticated: bool) -> Self {
        if authenticated {
            Visibility::All
        } else {
            Visibility::PublicOnly
        }
    }

    pub fn allows(self, post: &Post) -> bool {
        match self {
            Visibility::All => true,
            Visibility::PublicOnly => !post.is_private,
        }
    }
}

/// Long-form display date, e.g. "October 28, 2025".
pub fn display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to start a writer session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
}

/// Request to publish a new post. Only `content` is required; the rest
/// override generated values when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Accepted for compatibility. Read time is always derived from content.
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Partial update of a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// A stored journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub read_time: Option<String>,
    pub date: Option<String>,
    pub is_private: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnhanceRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResponse {
    pub enhanced_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_accepts_camel_case_overrides() {
        let req: CreatePostRequest = serde_json::from_str(
            r#"{"content": "Rain again.", "readTime": "9 min read", "category": "Weather"}"#,
        )
        .unwrap();

        assert_eq!(req.content, "Rain again.");
        assert_eq!(req.read_time.as_deref(), Some("9 min read"));
        assert_eq!(req.category.as_deref(), Some("Weather"));
        assert!(req.title.is_none());
    }

    #[test]
    fn test_enhance_response_field_name() {
        let json = serde_json::to_value(EnhanceResponse {
            enhanced_text: "Polished.".to_string(),
        })
        .unwrap();

        assert_eq!(json, serde_json::json!({"enhancedText": "Polished."}));
    }
}

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A posted promotional offer, as returned by the deals API.
///
/// All fields mirror server state; the client never persists deals and only
/// patches `temperature` locally after an acknowledged vote.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub current_price: f64,
    #[serde(default)]
    pub original_price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub temperature: i32,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Deal {
    /// Discount percentage derived from the two prices, rounded to the
    /// nearest integer. Zero when the original price is missing or free.
    pub fn discount_percent(&self) -> i32 {
        if self.original_price <= 0.0 {
            return 0;
        }
        (((self.original_price - self.current_price) / self.original_price) * 100.0).round() as i32
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(rename = "_id")]
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub author: Author,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// A comment on a deal. `replies` is populated lazily when the thread is
/// expanded; `reply_count` is the server-reported count and may diverge from
/// `replies.len()` until the next fetch.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub author: Author,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub reply_count: u32,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

/// The signed-in user's profile from `GET /users/me`.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub karma: u32,
    #[serde(default)]
    pub created_deals: Vec<String>,
    #[serde(default)]
    pub saved_deals: Vec<String>,
}

/// One page of a deal's comment thread, already unwrapped from the response
/// envelope. `current_page`/`pages` drive the has-more computation and
/// `total` feeds the feed's per-deal comment counter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommentsPage {
    pub comments: Vec<Comment>,
    pub current_page: u32,
    pub pages: u32,
    pub total: u64,
}

/// Vote direction for `POST /{dealId}/vote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Up,
    Down,
}

impl VoteKind {
    /// The temperature delta applied locally once the vote is acknowledged.
    pub fn delta(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_discount_percent() {
        let deal = Deal {
            original_price: 100.0,
            current_price: 80.0,
            ..Deal::default()
        };
        assert_eq!(deal.discount_percent(), 20);
    }

    #[test]
    fn deal_discount_percent_handles_missing_original() {
        let deal = Deal {
            original_price: 0.0,
            current_price: 12.0,
            ..Deal::default()
        };
        assert_eq!(deal.discount_percent(), 0);
    }

    #[test]
    fn deal_deserializes_from_api_shape() {
        let json = r#"{
            "_id": "abc123",
            "title": "iPhone 15 Pro",
            "currentPrice": 899.0,
            "originalPrice": 1129.0,
            "description": "Promo",
            "images": ["https://example.com/a.jpg"],
            "temperature": 42,
            "link": "https://example.com/deal",
            "createdAt": "2025-01-15T10:30:00Z"
        }"#;
        let deal: Deal = serde_json::from_str(json).unwrap();
        assert_eq!(deal.id, "abc123");
        assert_eq!(deal.temperature, 42);
        assert_eq!(deal.discount_percent(), 20);
        assert!(deal.created_at.is_some());
    }

    #[test]
    fn comment_defaults_missing_fields() {
        let json = r#"{
            "_id": "c1",
            "content": "Nice deal",
            "author": { "_id": "u1", "username": "alice" }
        }"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.likes, 0);
        assert_eq!(comment.reply_count, 0);
        assert!(comment.replies.is_empty());
    }

    #[test]
    fn vote_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&VoteKind::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&VoteKind::Down).unwrap(), "\"down\"");
    }
}

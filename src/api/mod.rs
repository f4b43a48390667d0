use anyhow::{Context, Result, anyhow};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;

use crate::internal::auth::SharedToken;
use crate::internal::models::{Comment, CommentsPage, Deal, Reply, User, VoteKind};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// A deal submission, collected by the post form. Prices are already parsed
/// and images are local paths attached as multipart parts (three at most,
/// enforced by the form).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewDeal {
    pub title: String,
    pub description: String,
    pub current_price: f64,
    pub original_price: f64,
    pub link: String,
    pub category: String,
    pub promo_code: Option<String>,
    /// ISO-8601, forwarded verbatim.
    pub expires_at: Option<String>,
    pub images: Vec<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct DealsData {
    deals: Vec<Deal>,
}

#[derive(Debug, Deserialize)]
struct DealsEnvelope {
    data: DealsData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentsData {
    comments: Vec<Comment>,
    current_page: u32,
    pages: u32,
    #[serde(default)]
    total: u64,
}

#[derive(Debug, Deserialize)]
struct CommentsEnvelope {
    data: CommentsData,
}

#[derive(Debug, Deserialize)]
struct CommentCreatedData {
    comment: Comment,
}

#[derive(Debug, Deserialize)]
struct CommentCreatedEnvelope {
    data: CommentCreatedData,
}

#[derive(Debug, Deserialize)]
struct ReplyCreatedData {
    reply: Reply,
}

#[derive(Debug, Deserialize)]
struct ReplyCreatedEnvelope {
    data: ReplyCreatedData,
}

#[derive(Debug, Deserialize)]
struct RepliesData {
    replies: Vec<Reply>,
}

#[derive(Debug, Deserialize)]
struct RepliesEnvelope {
    data: RepliesData,
}

#[derive(Debug, Deserialize)]
struct TokenData {
    token: String,
}

#[derive(Debug, Deserialize)]
struct LoginEnvelope {
    data: TokenData,
}

#[derive(Debug, Deserialize)]
struct RegisterEnvelope {
    token: String,
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: User,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    data: UserData,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// HTTP client for the DealGrown backend.
///
/// Holds the configured base URL and a shared token cell; a bearer header is
/// attached to every request while a token is present. Errors keep the
/// server-provided `message` when one is returned so write-path alerts can
/// show it verbatim.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: SharedToken,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: SharedToken) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self
            .token
            .read()
            .ok()
            .and_then(|cell| cell.as_ref().cloned());
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Turn non-2xx responses into errors carrying the server's `message`
    /// field when the body parses, or a generic status message otherwise.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| generic_error_message(status));
        Err(anyhow!(message))
    }

    async fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.url(path);
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .with_context(|| format!("failed to send GET request to {url}"))?;
        Self::check(response)
            .await?
            .json::<T>()
            .await
            .with_context(|| format!("failed to parse JSON response from {url}"))
    }

    pub async fn fetch_deals(&self) -> Result<Vec<Deal>> {
        let envelope: DealsEnvelope = self
            .get_json("/deals")
            .await
            .context("fetch_deals failed")?;
        Ok(envelope.data.deals)
    }

    pub async fn submit_deal(&self, deal: &NewDeal) -> Result<()> {
        let mut form = Form::new()
            .text("title", deal.title.clone())
            .text("description", deal.description.clone())
            .text("currentPrice", deal.current_price.to_string())
            .text("originalPrice", deal.original_price.to_string())
            .text("link", deal.link.clone())
            .text("category", deal.category.clone());
        if let Some(code) = &deal.promo_code {
            form = form.text("promoCode", code.clone());
        }
        if let Some(expires_at) = &deal.expires_at {
            form = form.text("expiresAt", expires_at.clone());
        }
        for (index, path) in deal.images.iter().enumerate() {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("failed to read image {}", path.display()))?;
            let part = Part::bytes(bytes)
                .file_name(format!("image{index}.jpg"))
                .mime_str("image/jpeg")
                .context("invalid image mime type")?;
            form = form.part("images", part);
        }

        let url = self.url("/deals");
        let response = self
            .authorize(self.client.post(&url))
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("failed to send POST request to {url}"))?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn vote(&self, deal_id: &str, kind: VoteKind) -> Result<()> {
        let url = self.url(&format!("/{deal_id}/vote"));
        let response = self
            .authorize(self.client.post(&url))
            .json(&json!({ "type": kind }))
            .send()
            .await
            .with_context(|| format!("failed to send POST request to {url}"))?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn fetch_comments(&self, deal_id: &str, page: u32, limit: u32) -> Result<CommentsPage> {
        let envelope: CommentsEnvelope = self
            .get_json(&format!("/comments/deal/{deal_id}?page={page}&limit={limit}"))
            .await
            .with_context(|| format!("fetch_comments failed for deal {deal_id}"))?;
        Ok(CommentsPage {
            comments: envelope.data.comments,
            current_page: envelope.data.current_page,
            pages: envelope.data.pages,
            total: envelope.data.total,
        })
    }

    pub async fn post_comment(&self, deal_id: &str, content: &str) -> Result<Comment> {
        let url = self.url(&format!("/comments/deal/{deal_id}"));
        let response = self
            .authorize(self.client.post(&url))
            .json(&json!({ "content": content }))
            .send()
            .await
            .with_context(|| format!("failed to send POST request to {url}"))?;
        let envelope: CommentCreatedEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .context("failed to parse created comment")?;
        Ok(envelope.data.comment)
    }

    pub async fn post_reply(&self, comment_id: &str, content: &str) -> Result<Reply> {
        let url = self.url(&format!("/comments/{comment_id}/replies"));
        let response = self
            .authorize(self.client.post(&url))
            .json(&json!({ "content": content }))
            .send()
            .await
            .with_context(|| format!("failed to send POST request to {url}"))?;
        let envelope: ReplyCreatedEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .context("failed to parse created reply")?;
        Ok(envelope.data.reply)
    }

    pub async fn fetch_replies(&self, comment_id: &str) -> Result<Vec<Reply>> {
        let envelope: RepliesEnvelope = self
            .get_json(&format!("/comments/{comment_id}/replies"))
            .await
            .with_context(|| format!("fetch_replies failed for comment {comment_id}"))?;
        Ok(envelope.data.replies)
    }

    pub async fn like_comment(&self, comment_id: &str) -> Result<()> {
        let url = self.url(&format!("/comments/{comment_id}/like"));
        let response = self
            .authorize(self.client.post(&url))
            .send()
            .await
            .with_context(|| format!("failed to send POST request to {url}"))?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn edit_comment(&self, comment_id: &str, content: &str) -> Result<()> {
        let url = self.url(&format!("/comments/{comment_id}"));
        let response = self
            .authorize(self.client.patch(&url))
            .json(&json!({ "content": content }))
            .send()
            .await
            .with_context(|| format!("failed to send PATCH request to {url}"))?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        let url = self.url(&format!("/comments/{comment_id}"));
        let response = self
            .authorize(self.client.delete(&url))
            .send()
            .await
            .with_context(|| format!("failed to send DELETE request to {url}"))?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let url = self.url("/auth/login");
        let response = self
            .client
            .post(&url)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .with_context(|| format!("failed to send POST request to {url}"))?;
        let envelope: LoginEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .context("failed to parse login response")?;
        Ok(envelope.data.token)
    }

    /// Unlike login, the register endpoint returns its token at the body
    /// root.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<String> {
        let url = self.url("/auth/register");
        let response = self
            .client
            .post(&url)
            .json(&json!({ "username": username, "email": email, "password": password }))
            .send()
            .await
            .with_context(|| format!("failed to send POST request to {url}"))?;
        let envelope: RegisterEnvelope = Self::check(response)
            .await?
            .json()
            .await
            .context("failed to parse register response")?;
        Ok(envelope.token)
    }

    pub async fn fetch_me(&self) -> Result<User> {
        let envelope: UserEnvelope = self
            .get_json("/users/me")
            .await
            .context("fetch_me failed")?;
        Ok(envelope.data.user)
    }
}

fn generic_error_message(status: StatusCode) -> String {
    format!("request failed with status {status}")
}

use std::sync::{Arc, RwLock};

use dealgrown::api::{ApiClient, NewDeal};
use dealgrown::internal::comments::CommentsSheet;
use dealgrown::internal::models::VoteKind;
use dealgrown::internal::patch::CommentPatch;

fn client_for(server: &mockito::ServerGuard) -> ApiClient {
    ApiClient::new(server.url(), Arc::new(RwLock::new(None)))
}

fn comments_body(range: std::ops::Range<u32>, current_page: u32, pages: u32, total: u64) -> String {
    let comments: Vec<String> = range
        .map(|i| {
            format!(
                r#"{{"_id":"c{i}","content":"comment {i}","author":{{"_id":"u1","username":"alice"}},"likes":0,"replyCount":0}}"#
            )
        })
        .collect();
    format!(
        r#"{{"data":{{"comments":[{}],"currentPage":{current_page},"pages":{pages},"total":{total}}}}}"#,
        comments.join(",")
    )
}

#[tokio::test]
async fn two_comment_pages_merge_into_forty_ordered_items() {
    let mut server = mockito::Server::new_async().await;
    let page1 = server
        .mock("GET", "/comments/deal/d1?page=1&limit=20")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(comments_body(0..20, 1, 2, 40))
        .create_async()
        .await;
    let page2 = server
        .mock("GET", "/comments/deal/d1?page=2&limit=20")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(comments_body(20..40, 2, 2, 40))
        .create_async()
        .await;

    let client = client_for(&server);
    let mut sheet = CommentsSheet::open("d1".to_string(), 640.0);

    let first = client.fetch_comments("d1", 1, 20).await.unwrap();
    sheet.merge_page(first);
    assert_eq!(sheet.thread.len(), 20);
    assert!(sheet.thread.has_more());

    let next_page = sheet.thread.next_page();
    assert_eq!(next_page, 2);
    let second = client.fetch_comments("d1", next_page, 20).await.unwrap();
    sheet.merge_page(second);

    page1.assert_async().await;
    page2.assert_async().await;

    assert_eq!(sheet.thread.len(), 40);
    assert!(!sheet.thread.has_more());
    assert_eq!(sheet.thread.total(), 40);
    let ids: Vec<&str> = sheet
        .thread
        .items()
        .iter()
        .map(|comment| comment.id.as_str())
        .collect();
    let expected: Vec<String> = (0..40).map(|i| format!("c{i}")).collect();
    assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[tokio::test]
async fn acknowledged_delete_removes_only_the_target() {
    let mut server = mockito::Server::new_async().await;
    let fetch = server
        .mock("GET", "/comments/deal/d1?page=1&limit=20")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(comments_body(0..3, 1, 1, 3))
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/comments/c1")
        .with_status(200)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut sheet = CommentsSheet::open("d1".to_string(), 640.0);
    sheet.merge_page(client.fetch_comments("d1", 1, 20).await.unwrap());

    client.delete_comment("c1").await.unwrap();
    sheet.apply(CommentPatch::Deleted {
        id: "c1".to_string(),
    });

    fetch.assert_async().await;
    delete.assert_async().await;

    let ids: Vec<&str> = sheet
        .thread
        .items()
        .iter()
        .map(|comment| comment.id.as_str())
        .collect();
    assert_eq!(ids, ["c0", "c2"]);
}

#[tokio::test]
async fn failed_like_leaves_count_untouched() {
    let mut server = mockito::Server::new_async().await;
    let fetch = server
        .mock("GET", "/comments/deal/d1?page=1&limit=20")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(comments_body(0..1, 1, 1, 1))
        .create_async()
        .await;
    let like = server
        .mock("POST", "/comments/c0/like")
        .with_status(500)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut sheet = CommentsSheet::open("d1".to_string(), 640.0);
    sheet.merge_page(client.fetch_comments("d1", 1, 20).await.unwrap());

    // The patch only runs on acknowledgment, so a failed like changes
    // nothing.
    assert!(client.like_comment("c0").await.is_err());

    fetch.assert_async().await;
    like.assert_async().await;
    assert_eq!(sheet.thread.items()[0].likes, 0);
}

#[tokio::test]
async fn acknowledged_like_increments_by_one() {
    let mut server = mockito::Server::new_async().await;
    let fetch = server
        .mock("GET", "/comments/deal/d1?page=1&limit=20")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(comments_body(0..1, 1, 1, 1))
        .create_async()
        .await;
    let like = server
        .mock("POST", "/comments/c0/like")
        .with_status(200)
        // Whatever count the server reports is ignored by the client.
        .with_body(r#"{"data":{"likes":99}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut sheet = CommentsSheet::open("d1".to_string(), 640.0);
    sheet.merge_page(client.fetch_comments("d1", 1, 20).await.unwrap());

    client.like_comment("c0").await.unwrap();
    sheet.apply(CommentPatch::Liked {
        id: "c0".to_string(),
    });

    fetch.assert_async().await;
    like.assert_async().await;
    assert_eq!(sheet.thread.items()[0].likes, 1);
}

#[tokio::test]
async fn reply_round_trip_patches_parent() {
    let mut server = mockito::Server::new_async().await;
    let fetch = server
        .mock("GET", "/comments/deal/d1?page=1&limit=20")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(comments_body(0..1, 1, 1, 1))
        .create_async()
        .await;
    let reply = server
        .mock("POST", "/comments/c0/replies")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "content": "agreed"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"success":true,"data":{"reply":{"_id":"r1","content":"agreed","author":{"_id":"u2","username":"bob"}}}}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let mut sheet = CommentsSheet::open("d1".to_string(), 640.0);
    sheet.merge_page(client.fetch_comments("d1", 1, 20).await.unwrap());

    let created = client.post_reply("c0", "agreed").await.unwrap();
    sheet.apply(CommentPatch::ReplyAdded {
        parent_id: "c0".to_string(),
        reply: created,
    });

    fetch.assert_async().await;
    reply.assert_async().await;

    let parent = &sheet.thread.items()[0];
    assert_eq!(parent.reply_count, 1);
    assert_eq!(parent.replies[0].id, "r1");
    assert_eq!(parent.replies[0].author.username, "bob");
}

#[tokio::test]
async fn submit_deal_sends_multipart_form() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/deals")
        .match_header(
            "content-type",
            mockito::Matcher::Regex("multipart/form-data.*".to_string()),
        )
        .with_status(201)
        .create_async()
        .await;

    let deal = NewDeal {
        title: "Mechanical keyboard".to_string(),
        description: "Half price".to_string(),
        current_price: 50.0,
        original_price: 100.0,
        link: "https://example.com/kb".to_string(),
        category: "tech".to_string(),
        promo_code: Some("KEYB50".to_string()),
        expires_at: Some("2026-09-01T00:00:00Z".to_string()),
        images: Vec::new(),
    };

    client_for(&server).submit_deal(&deal).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn register_returns_root_level_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/register")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "username": "alice",
            "email": "a@b.c",
            "password": "secret"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token":"tok-reg"}"#)
        .create_async()
        .await;

    let token = client_for(&server)
        .register("alice", "a@b.c", "secret")
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(token, "tok-reg");
}

#[tokio::test]
async fn vote_route_is_rooted_at_the_deal_id() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/abc123/vote")
        .match_body(mockito::Matcher::Json(serde_json::json!({"type": "down"})))
        .with_status(200)
        .create_async()
        .await;

    client_for(&server)
        .vote("abc123", VoteKind::Down)
        .await
        .unwrap();
    mock.assert_async().await;
}

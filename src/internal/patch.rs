use super::models::{Comment, Reply};

/// A local-state patch for the comment thread, applied only after the server
/// has acknowledged the matching request. Nothing here runs speculatively:
/// the request handler sends the HTTP call, and the acknowledgment action
/// carries one of these back to the thread.
///
/// Counts patched here mirror server state and may drift from concurrent
/// sessions until the next full fetch replaces the list.
#[derive(Debug, Clone, PartialEq)]
pub enum CommentPatch {
    /// Like acknowledged: bump the local count by exactly one. The server's
    /// own count is not consulted.
    Liked { id: String },
    /// Reply created: append the returned reply and bump the parent's count.
    ReplyAdded { parent_id: String, reply: Reply },
    /// Edit acknowledged: overwrite with the content that was sent.
    Edited { id: String, content: String },
    /// Delete acknowledged: drop the comment, keeping the rest in order.
    Deleted { id: String },
    /// Lazy reply fetch completed: replace the parent's reply list.
    RepliesLoaded { id: String, replies: Vec<Reply> },
}

/// Apply `patch` to `comments` in place. Unknown identifiers are a no-op;
/// the comment may have been removed by a refetch while the request was in
/// flight.
pub fn apply(comments: &mut Vec<Comment>, patch: CommentPatch) {
    match patch {
        CommentPatch::Liked { id } => {
            if let Some(comment) = find_mut(comments, &id) {
                comment.likes += 1;
            }
        }
        CommentPatch::ReplyAdded { parent_id, reply } => {
            if let Some(comment) = find_mut(comments, &parent_id) {
                comment.reply_count += 1;
                comment.replies.push(reply);
            }
        }
        CommentPatch::Edited { id, content } => {
            if let Some(comment) = find_mut(comments, &id) {
                comment.content = content;
            }
        }
        CommentPatch::Deleted { id } => {
            comments.retain(|comment| comment.id != id);
        }
        CommentPatch::RepliesLoaded { id, replies } => {
            if let Some(comment) = find_mut(comments, &id) {
                comment.replies = replies;
            }
        }
    }
}

fn find_mut<'a>(comments: &'a mut [Comment], id: &str) -> Option<&'a mut Comment> {
    comments.iter_mut().find(|comment| comment.id == id)
}

use super::gesture::{DragController, DragPolicy};
use super::models::{Comment, CommentsPage};
use super::pagination::Paginated;
use super::patch::{self, CommentPatch};

/// What the inline editor under a comment is for.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorKind {
    Reply { parent_id: String },
    Edit { comment_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Editor {
    pub kind: EditorKind,
    pub text: String,
}

/// Which element keyboard input goes to while the sheet is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetFocus {
    #[default]
    List,
    Input,
}

/// State of the comments bottom sheet for one deal: the paginated thread,
/// the new-comment input, an optional inline reply/edit editor, and the
/// drag-to-dismiss controller.
#[derive(Debug, Clone)]
pub struct CommentsSheet {
    pub deal_id: String,
    pub thread: Paginated<Comment>,
    pub loading: bool,
    pub input: String,
    pub selected: usize,
    pub focus: SheetFocus,
    pub editor: Option<Editor>,
    /// Comment whose replies are currently shown.
    pub expanded: Option<String>,
    pub controller: DragController,
}

impl CommentsSheet {
    pub fn open(deal_id: String, travel: f32) -> Self {
        Self {
            deal_id,
            thread: Paginated::default(),
            loading: true,
            input: String::new(),
            selected: 0,
            focus: SheetFocus::default(),
            editor: None,
            expanded: None,
            controller: DragController::new(DragPolicy::dismiss_sheet(travel)),
        }
    }

    /// Merge a fetched page into the thread. Pages for another deal are the
    /// caller's responsibility to discard before calling this.
    pub fn merge_page(&mut self, page: CommentsPage) {
        self.thread
            .merge(page.comments, page.current_page, page.pages, page.total);
        self.loading = false;
        self.clamp_selection();
    }

    pub fn selected_comment(&self) -> Option<&Comment> {
        self.thread.items().get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.thread.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        if self.thread.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.thread.len() {
            self.selected = self.thread.len() - 1;
        }
    }

    /// Consume the new-comment input for submission. Whitespace-only input
    /// yields nothing, and nothing is cleared, so no request is made.
    pub fn take_input(&mut self) -> Option<String> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let content = trimmed.to_string();
        self.input.clear();
        Some(content)
    }

    /// Consume the inline editor for submission, with the same whitespace
    /// guard as `take_input`.
    pub fn take_editor(&mut self) -> Option<(EditorKind, String)> {
        let editor = self.editor.as_ref()?;
        let trimmed = editor.text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let kind = editor.kind.clone();
        let content = trimmed.to_string();
        self.editor = None;
        Some((kind, content))
    }

    pub fn start_reply(&mut self) {
        if let Some(comment) = self.selected_comment() {
            self.editor = Some(Editor {
                kind: EditorKind::Reply {
                    parent_id: comment.id.clone(),
                },
                text: String::new(),
            });
        }
    }

    /// Begin editing the selected comment, prefilled with its content.
    pub fn start_edit(&mut self) {
        if let Some(comment) = self.selected_comment() {
            self.editor = Some(Editor {
                kind: EditorKind::Edit {
                    comment_id: comment.id.clone(),
                },
                text: comment.content.clone(),
            });
        }
    }

    pub fn cancel_editor(&mut self) {
        self.editor = None;
    }

    /// Toggle the reply thread under the selected comment. Returns the
    /// comment id when expanding, so the caller can fetch its replies.
    pub fn toggle_replies(&mut self) -> Option<String> {
        let comment = self.selected_comment()?;
        if comment.reply_count == 0 {
            return None;
        }
        let id = comment.id.clone();
        if self.expanded.as_deref() == Some(&id) {
            self.expanded = None;
            None
        } else {
            self.expanded = Some(id.clone());
            Some(id)
        }
    }

    /// Prepend a freshly created comment, matching how the server orders
    /// newest first.
    pub fn prepend(&mut self, comment: Comment) {
        self.thread.items_mut().insert(0, comment);
    }

    pub fn apply(&mut self, change: CommentPatch) {
        patch::apply(self.thread.items_mut(), change);
        self.clamp_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::models::Author;

    fn page(ids: &[&str], current_page: u32, pages: u32, total: u64) -> CommentsPage {
        CommentsPage {
            comments: ids
                .iter()
                .map(|id| Comment {
                    id: (*id).to_string(),
                    content: format!("content {id}"),
                    author: Author {
                        id: "u1".to_string(),
                        username: "alice".to_string(),
                        avatar: None,
                    },
                    reply_count: 2,
                    ..Comment::default()
                })
                .collect(),
            current_page,
            pages,
            total,
        }
    }

    fn sheet_with(ids: &[&str]) -> CommentsSheet {
        let mut sheet = CommentsSheet::open("d1".to_string(), 640.0);
        sheet.merge_page(page(ids, 1, 1, ids.len() as u64));
        sheet
    }

    #[test]
    fn whitespace_input_is_not_taken() {
        let mut sheet = sheet_with(&["a"]);
        sheet.input = "   \n\t ".to_string();
        assert_eq!(sheet.take_input(), None);
        // The input is preserved so the user can keep typing.
        assert_eq!(sheet.input, "   \n\t ");
    }

    #[test]
    fn take_input_trims_and_clears() {
        let mut sheet = sheet_with(&["a"]);
        sheet.input = "  great deal  ".to_string();
        assert_eq!(sheet.take_input(), Some("great deal".to_string()));
        assert!(sheet.input.is_empty());
    }

    #[test]
    fn whitespace_editor_is_not_taken() {
        let mut sheet = sheet_with(&["a"]);
        sheet.start_reply();
        sheet.editor.as_mut().unwrap().text = "   ".to_string();
        assert_eq!(sheet.take_editor(), None);
        assert!(sheet.editor.is_some());
    }

    #[test]
    fn start_edit_prefills_content() {
        let mut sheet = sheet_with(&["a", "b"]);
        sheet.selected = 1;
        sheet.start_edit();
        let editor = sheet.editor.unwrap();
        assert_eq!(
            editor.kind,
            EditorKind::Edit {
                comment_id: "b".to_string()
            }
        );
        assert_eq!(editor.text, "content b");
    }

    #[test]
    fn toggle_replies_expands_then_collapses() {
        let mut sheet = sheet_with(&["a"]);
        assert_eq!(sheet.toggle_replies(), Some("a".to_string()));
        assert_eq!(sheet.expanded.as_deref(), Some("a"));
        assert_eq!(sheet.toggle_replies(), None);
        assert_eq!(sheet.expanded, None);
    }

    #[test]
    fn delete_clamps_selection() {
        let mut sheet = sheet_with(&["a", "b", "c"]);
        sheet.selected = 2;
        sheet.apply(CommentPatch::Deleted { id: "c".to_string() });
        assert_eq!(sheet.selected, 1);
    }

    #[test]
    fn second_page_appends_to_first() {
        let mut sheet = CommentsSheet::open("d1".to_string(), 640.0);
        let first: Vec<String> = (0..20).map(|i| format!("c{i}")).collect();
        let first_refs: Vec<&str> = first.iter().map(String::as_str).collect();
        sheet.merge_page(page(&first_refs, 1, 2, 40));
        assert_eq!(sheet.thread.len(), 20);
        assert!(sheet.thread.has_more());

        let second: Vec<String> = (20..40).map(|i| format!("c{i}")).collect();
        let second_refs: Vec<&str> = second.iter().map(String::as_str).collect();
        sheet.merge_page(page(&second_refs, 2, 2, 40));
        assert_eq!(sheet.thread.len(), 40);
        assert!(!sheet.thread.has_more());
        assert_eq!(sheet.thread.items()[20].id, "c20");
    }

    #[test]
    fn prepend_puts_new_comment_first() {
        let mut sheet = sheet_with(&["a"]);
        sheet.prepend(Comment {
            id: "new".to_string(),
            ..Comment::default()
        });
        assert_eq!(sheet.thread.items()[0].id, "new");
    }
}

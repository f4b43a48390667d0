use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::internal::auth::AuthState;
use crate::internal::comments::{CommentsSheet, EditorKind, SheetFocus};
use crate::internal::feed::DealFeed;
use crate::internal::gesture::{DragController, DragDirection, DragPolicy, POINTS_PER_ROW};
use crate::internal::models::{Comment, CommentsPage, Deal, Reply, User, VoteKind};
use crate::internal::post_form::{FormField, PostForm};
use crate::internal::ui::forms::{LoginForm, RegisterError, RegisterForm};
use crate::utils::theme::Theme;

/// Animation and input tick, matching the draw cadence.
const TICK: Duration = Duration::from_millis(16);

/// Top-level navigation: the auth stack or the main tab bar.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Route {
    Login,
    Register,
    Main,
}

#[derive(Debug, PartialEq, Clone, Copy, strum_macros::Display)]
pub enum MainTab {
    Deals,
    Post,
    Profile,
}

pub const MAIN_TABS: [MainTab; 3] = [MainTab::Deals, MainTab::Post, MainTab::Profile];

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum AlertKind {
    Error,
    Info,
}

/// Modal alert overlay, dismissed with Enter or Esc.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// The deal-details bottom sheet: a static card over the feed, dismissed by
/// the same downward drag as the comments sheet.
#[derive(Debug, Clone)]
pub struct DetailsSheet {
    pub deal: Deal,
    pub controller: DragController,
}

impl DetailsSheet {
    pub fn open(deal: Deal, travel: f32) -> Self {
        Self {
            deal,
            controller: DragController::new(DragPolicy::dismiss_sheet(travel)),
        }
    }
}

/// Results of spawned requests, sent back to the event loop. Local state is
/// only patched when one of these arrives, never when the request departs.
#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    DealsLoaded(Vec<Deal>),
    DealsFailed(String),
    VoteAcked { deal_id: String, kind: VoteKind },
    CommentsPageLoaded { deal_id: String, page: CommentsPage },
    CommentsPageFailed { deal_id: String, message: String },
    CommentPosted { deal_id: String, comment: Box<Comment> },
    ReplyPosted { parent_id: String, reply: Reply },
    CommentLiked { id: String },
    CommentEdited { id: String, content: String },
    CommentDeleted { id: String },
    RepliesLoaded { id: String, replies: Vec<Reply> },
    WriteFailed { title: String, message: String },
    LoginSucceeded { token: String },
    AuthFailed { title: String, message: String },
    RegisterSucceeded { token: String },
    ProfileLoaded(Box<User>),
    ProfileFailed(String),
    DealPosted,
    DealPostFailed(String),
}

/// A command computed while the comments sheet is borrowed, executed after
/// the borrow ends.
enum SheetCommand {
    PostComment { deal_id: String, content: String },
    PostReply { parent_id: String, content: String },
    EditComment { id: String, content: String },
    LikeComment { id: String },
    DeleteComment { id: String },
    FetchReplies { id: String },
    LoadMore { deal_id: String, page: u32 },
}

/// Main application state and event loop.
pub struct App {
    pub running: bool,
    pub config: AppConfig,
    pub theme: Theme,
    pub api: ApiClient,
    pub auth: AuthState,
    pub route: Route,
    pub tab: MainTab,
    pub login: LoginForm,
    pub register: RegisterForm,
    pub feed: DealFeed,
    pub post_form: PostForm,
    pub profile: Option<User>,
    pub profile_loading: bool,
    pub comments: Option<CommentsSheet>,
    pub details: Option<DetailsSheet>,
    pub alert: Option<Alert>,
    pub screen_rows: u16,
    drag_origin: Option<u16>,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let mut auth = AuthState::new();
        auth.restore();

        let api = ApiClient::new(config.api.base_url.clone(), auth.shared_token());

        let route = if auth.is_authenticated() {
            Route::Main
        } else {
            Route::Login
        };

        let screen_rows = crossterm::terminal::size().map(|(_, rows)| rows).unwrap_or(40);
        let travel = screen_rows as f32 * POINTS_PER_ROW;

        Self {
            running: true,
            config,
            theme: Theme::default(),
            api,
            auth,
            route,
            tab: MainTab::Deals,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            feed: DealFeed::new(travel),
            post_form: PostForm::default(),
            profile: None,
            profile_loading: false,
            comments: None,
            details: None,
            alert: None,
            screen_rows,
            drag_origin: None,
            action_tx,
            action_rx,
        }
    }

    fn travel(&self) -> f32 {
        self.screen_rows as f32 * POINTS_PER_ROW
    }

    pub async fn run(&mut self, mut tui: crate::tui::Tui) -> Result<()> {
        if self.route == Route::Main {
            self.spawn_fetch_deals();
            self.request_profile();
        }

        let mut event_interval = tokio::time::interval(TICK);

        loop {
            tui.draw(|f| crate::internal::ui::view::draw(self, f))?;

            tokio::select! {
                _ = event_interval.tick() => {
                    self.advance_animations();
                    if event::poll(Duration::from_millis(0))? {
                        match event::read()? {
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key_event(key);
                            }
                            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                            Event::Resize(_, rows) => self.screen_rows = rows,
                            _ => {}
                        }
                    }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            if !self.running {
                break;
            }
        }
        Ok(())
    }

    /// Step every drag animation one tick. A commit that lands here fires
    /// its terminal effect exactly once: the feed index moves, or the sheet
    /// closes.
    fn advance_animations(&mut self) {
        if let Some(direction) = self.feed.controller.advance(TICK) {
            self.feed.apply_commit(direction);
        }

        let mut close_comments = false;
        if let Some(sheet) = self.comments.as_mut()
            && sheet.controller.advance(TICK).is_some()
        {
            close_comments = true;
        }
        if close_comments {
            self.comments = None;
        }

        let mut close_details = false;
        if let Some(details) = self.details.as_mut()
            && details.controller.advance(TICK).is_some()
        {
            close_details = true;
        }
        if close_details {
            self.details = None;
        }
    }

    // ----- input ---------------------------------------------------------

    fn handle_key_event(&mut self, key: KeyEvent) {
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
            }
            return;
        }

        match self.route {
            Route::Login => self.handle_login_key(key),
            Route::Register => self.handle_register_key(key),
            Route::Main => self.handle_main_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('r') {
                self.route = Route::Register;
            }
            return;
        }
        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => self.login.focus_next(),
            KeyCode::Enter => {
                if self.login.loading {
                    return;
                }
                match self.login.credentials() {
                    Some((email, password)) => {
                        self.login.loading = true;
                        self.spawn_login(email, password);
                    }
                    None => {
                        self.alert = Some(Alert::error("Sign in", "Please fill in all fields"));
                    }
                }
            }
            KeyCode::Backspace => {
                self.login.focused_text_mut().pop();
            }
            KeyCode::Char(c) => self.login.focused_text_mut().push(c),
            _ => {}
        }
    }

    fn handle_register_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('l') {
                self.route = Route::Login;
            }
            return;
        }
        match key.code {
            KeyCode::Esc => self.route = Route::Login,
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => self.register.focus_next(),
            KeyCode::Enter => {
                if self.register.loading {
                    return;
                }
                match self.register.credentials() {
                    Ok((username, email, password)) => {
                        self.register.loading = true;
                        self.spawn_register(username, email, password);
                    }
                    Err(RegisterError::MissingFields) => {
                        self.alert = Some(Alert::error("Sign up", "Please fill in all fields"));
                    }
                    Err(RegisterError::PasswordMismatch) => {
                        self.alert = Some(Alert::error("Sign up", "Passwords do not match"));
                    }
                }
            }
            KeyCode::Backspace => {
                self.register.focused_text_mut().pop();
            }
            KeyCode::Char(c) => self.register.focused_text_mut().push(c),
            _ => {}
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) {
        if self.comments.is_some() {
            self.handle_comments_key(key);
            return;
        }
        if let Some(details) = self.details.as_mut() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                details.controller.commit(DragDirection::Positive);
            }
            return;
        }
        match self.tab {
            MainTab::Deals => self.handle_deals_key(key),
            MainTab::Post => self.handle_post_key(key),
            MainTab::Profile => self.handle_profile_key(key),
        }
    }

    fn switch_tab(&mut self, tab: MainTab) {
        self.tab = tab;
        if tab == MainTab::Profile && self.profile.is_none() && !self.profile_loading {
            self.request_profile();
        }
    }

    fn request_profile(&mut self) {
        self.profile_loading = true;
        self.spawn_fetch_profile();
    }

    fn handle_deals_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('1') => self.switch_tab(MainTab::Deals),
            KeyCode::Char('2') => self.switch_tab(MainTab::Post),
            KeyCode::Char('3') => self.switch_tab(MainTab::Profile),
            KeyCode::Char('j') | KeyCode::Down => {
                if self.feed.permits(DragDirection::Negative) {
                    self.feed.controller.commit(DragDirection::Negative);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.feed.permits(DragDirection::Positive) {
                    self.feed.controller.commit(DragDirection::Positive);
                }
            }
            KeyCode::Enter => {
                if let Some(deal) = self.feed.current().cloned() {
                    self.details = Some(DetailsSheet::open(deal, self.travel()));
                }
            }
            KeyCode::Char('c') => {
                if let Some(deal_id) = self.feed.current().map(|deal| deal.id.clone()) {
                    self.comments = Some(CommentsSheet::open(deal_id.clone(), self.travel()));
                    self.spawn_fetch_comments(deal_id, 1);
                }
            }
            KeyCode::Char('u') => {
                if let Some(deal_id) = self.feed.current().map(|deal| deal.id.clone()) {
                    self.spawn_vote(deal_id, VoteKind::Up);
                }
            }
            KeyCode::Char('d') => {
                if let Some(deal_id) = self.feed.current().map(|deal| deal.id.clone()) {
                    self.spawn_vote(deal_id, VoteKind::Down);
                }
            }
            KeyCode::Char('o') => {
                if let Some(deal) = self.feed.current()
                    && !deal.link.is_empty()
                    && let Err(error) = open::that(&deal.link)
                {
                    tracing::warn!("Could not open deal link: {error}");
                }
            }
            KeyCode::Char('r') => {
                self.feed.loading = true;
                self.spawn_fetch_deals();
            }
            _ => {}
        }
    }

    fn handle_post_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.submit_post_form(),
                KeyCode::Char('x') => self.post_form.remove_last_image(),
                _ => {}
            }
            return;
        }
        match key.code {
            KeyCode::Esc => self.tab = MainTab::Deals,
            KeyCode::Tab | KeyCode::Down => self.post_form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.post_form.focus_prev(),
            KeyCode::Left => {
                if self.post_form.field == FormField::Category {
                    self.post_form.cycle_category(false);
                }
            }
            KeyCode::Right => {
                if self.post_form.field == FormField::Category {
                    self.post_form.cycle_category(true);
                }
            }
            KeyCode::Enter => match self.post_form.field {
                FormField::ImagePath => self.post_form.add_image(),
                FormField::Description => self.post_form.description.push('\n'),
                _ => self.post_form.focus_next(),
            },
            KeyCode::Backspace => {
                if let Some(text) = self.post_form.focused_text_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.post_form.focused_text_mut() {
                    text.push(c);
                }
            }
            _ => {}
        }
    }

    fn submit_post_form(&mut self) {
        if self.post_form.submitting {
            return;
        }
        match self.post_form.validate() {
            Ok(deal) => {
                self.post_form.submitting = true;
                self.spawn_submit_deal(deal);
            }
            Err(message) => {
                self.alert = Some(Alert::error("Cannot publish", message));
            }
        }
    }

    fn handle_profile_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('1') => self.switch_tab(MainTab::Deals),
            KeyCode::Char('2') => self.switch_tab(MainTab::Post),
            KeyCode::Char('3') => self.switch_tab(MainTab::Profile),
            KeyCode::Char('r') => self.request_profile(),
            KeyCode::Char('x') => match self.auth.sign_out() {
                Ok(()) => {
                    self.route = Route::Login;
                    self.tab = MainTab::Deals;
                    self.profile = None;
                    self.login.reset();
                    self.register.reset();
                }
                Err(error) => {
                    tracing::error!("Sign out failed: {error:#}");
                    self.alert = Some(Alert::error("Sign out", "Could not sign out"));
                }
            },
            _ => {}
        }
    }

    fn handle_comments_key(&mut self, key: KeyEvent) {
        let own_id = self.profile.as_ref().map(|user| user.id.clone());

        let mut command = None;
        {
            let Some(sheet) = self.comments.as_mut() else {
                return;
            };

            if sheet.editor.is_some() {
                match key.code {
                    KeyCode::Esc => sheet.cancel_editor(),
                    KeyCode::Enter => {
                        if let Some((kind, content)) = sheet.take_editor() {
                            command = Some(match kind {
                                EditorKind::Reply { parent_id } => {
                                    SheetCommand::PostReply { parent_id, content }
                                }
                                EditorKind::Edit { comment_id } => SheetCommand::EditComment {
                                    id: comment_id,
                                    content,
                                },
                            });
                        }
                    }
                    KeyCode::Backspace => {
                        if let Some(editor) = sheet.editor.as_mut() {
                            editor.text.pop();
                        }
                    }
                    KeyCode::Char(c) => {
                        if let Some(editor) = sheet.editor.as_mut() {
                            editor.text.push(c);
                        }
                    }
                    _ => {}
                }
            } else if sheet.focus == SheetFocus::Input {
                match key.code {
                    KeyCode::Esc | KeyCode::Tab => sheet.focus = SheetFocus::List,
                    KeyCode::Enter => {
                        if let Some(content) = sheet.take_input() {
                            command = Some(SheetCommand::PostComment {
                                deal_id: sheet.deal_id.clone(),
                                content,
                            });
                        }
                    }
                    KeyCode::Backspace => {
                        sheet.input.pop();
                    }
                    KeyCode::Char(c) => sheet.input.push(c),
                    _ => {}
                }
            } else {
                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => {
                        sheet.controller.commit(DragDirection::Positive);
                    }
                    KeyCode::Char('j') | KeyCode::Down => sheet.select_next(),
                    KeyCode::Char('k') | KeyCode::Up => sheet.select_prev(),
                    KeyCode::Char('i') | KeyCode::Tab => sheet.focus = SheetFocus::Input,
                    KeyCode::Char('l') => {
                        if let Some(comment) = sheet.selected_comment() {
                            command = Some(SheetCommand::LikeComment {
                                id: comment.id.clone(),
                            });
                        }
                    }
                    KeyCode::Char('r') => sheet.start_reply(),
                    KeyCode::Char('e') => {
                        let own = sheet
                            .selected_comment()
                            .is_some_and(|comment| Some(&comment.author.id) == own_id.as_ref());
                        if own {
                            sheet.start_edit();
                        }
                    }
                    KeyCode::Char('x') => {
                        if let Some(comment) = sheet.selected_comment()
                            && Some(&comment.author.id) == own_id.as_ref()
                        {
                            command = Some(SheetCommand::DeleteComment {
                                id: comment.id.clone(),
                            });
                        }
                    }
                    KeyCode::Enter => {
                        if let Some(id) = sheet.toggle_replies() {
                            command = Some(SheetCommand::FetchReplies { id });
                        }
                    }
                    KeyCode::Char('m') => {
                        if sheet.thread.has_more() && !sheet.loading {
                            sheet.loading = true;
                            command = Some(SheetCommand::LoadMore {
                                deal_id: sheet.deal_id.clone(),
                                page: sheet.thread.next_page(),
                            });
                        }
                    }
                    _ => {}
                }
            }
        }

        if let Some(command) = command {
            match command {
                SheetCommand::PostComment { deal_id, content } => {
                    self.spawn_post_comment(deal_id, content);
                }
                SheetCommand::PostReply { parent_id, content } => {
                    self.spawn_post_reply(parent_id, content);
                }
                SheetCommand::EditComment { id, content } => self.spawn_edit_comment(id, content),
                SheetCommand::LikeComment { id } => self.spawn_like_comment(id),
                SheetCommand::DeleteComment { id } => self.spawn_delete_comment(id),
                SheetCommand::FetchReplies { id } => self.spawn_fetch_replies(id),
                SheetCommand::LoadMore { deal_id, page } => {
                    self.spawn_fetch_comments(deal_id, page);
                }
            }
        }
    }

    /// Route mouse drags to whichever gesture surface is on top: the
    /// comments sheet, the details sheet, then the deal feed.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_origin = Some(mouse.row);
                if let Some(sheet) = self.comments.as_mut() {
                    sheet.controller.begin();
                } else if let Some(details) = self.details.as_mut() {
                    details.controller.begin();
                } else if self.route == Route::Main && self.tab == MainTab::Deals {
                    self.feed.controller.begin();
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(origin) = self.drag_origin else {
                    return;
                };
                let delta = (mouse.row as f32 - origin as f32) * POINTS_PER_ROW;
                if let Some(sheet) = self.comments.as_mut() {
                    sheet.controller.drag_to(delta);
                } else if let Some(details) = self.details.as_mut() {
                    details.controller.drag_to(delta);
                } else if self.route == Route::Main && self.tab == MainTab::Deals {
                    self.feed.controller.drag_to(delta);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_origin = None;
                if let Some(sheet) = self.comments.as_mut() {
                    sheet.controller.release(|_| true);
                } else if let Some(details) = self.details.as_mut() {
                    details.controller.release(|_| true);
                } else if self.route == Route::Main && self.tab == MainTab::Deals {
                    let can_advance = self.feed.permits(DragDirection::Negative);
                    let can_retreat = self.feed.permits(DragDirection::Positive);
                    self.feed.controller.release(|direction| match direction {
                        DragDirection::Negative => can_advance,
                        DragDirection::Positive => can_retreat,
                    });
                }
            }
            _ => {}
        }
    }

    // ----- actions -------------------------------------------------------

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::DealsLoaded(deals) => self.feed.set_deals(deals),
            Action::DealsFailed(message) => {
                tracing::error!("Failed to fetch deals: {message}");
                self.feed.loading = false;
                self.feed.error = Some("Could not load deals".to_string());
            }
            Action::VoteAcked { deal_id, kind } => self.feed.apply_vote(&deal_id, kind),
            Action::CommentsPageLoaded { deal_id, page } => {
                // The counter mirror updates even if the sheet closed while
                // the page was in flight.
                self.feed.set_comment_count(&deal_id, page.total);
                if let Some(sheet) = self.comments.as_mut()
                    && sheet.deal_id == deal_id
                {
                    sheet.merge_page(page);
                }
            }
            Action::CommentsPageFailed { deal_id, message } => {
                tracing::error!("Failed to fetch comments for {deal_id}: {message}");
                if let Some(sheet) = self.comments.as_mut()
                    && sheet.deal_id == deal_id
                {
                    sheet.loading = false;
                }
            }
            Action::CommentPosted { deal_id, comment } => {
                if let Some(sheet) = self.comments.as_mut()
                    && sheet.deal_id == deal_id
                {
                    sheet.prepend(*comment);
                }
            }
            Action::ReplyPosted { parent_id, reply } => {
                if let Some(sheet) = self.comments.as_mut() {
                    sheet.apply(crate::internal::patch::CommentPatch::ReplyAdded {
                        parent_id,
                        reply,
                    });
                }
            }
            Action::CommentLiked { id } => {
                if let Some(sheet) = self.comments.as_mut() {
                    sheet.apply(crate::internal::patch::CommentPatch::Liked { id });
                }
            }
            Action::CommentEdited { id, content } => {
                if let Some(sheet) = self.comments.as_mut() {
                    sheet.apply(crate::internal::patch::CommentPatch::Edited { id, content });
                }
            }
            Action::CommentDeleted { id } => {
                if let Some(sheet) = self.comments.as_mut() {
                    sheet.apply(crate::internal::patch::CommentPatch::Deleted { id });
                }
            }
            Action::RepliesLoaded { id, replies } => {
                if let Some(sheet) = self.comments.as_mut() {
                    sheet.apply(crate::internal::patch::CommentPatch::RepliesLoaded {
                        id,
                        replies,
                    });
                }
            }
            Action::WriteFailed { title, message } => {
                self.alert = Some(Alert::error(title, message));
            }
            Action::LoginSucceeded { token } => {
                self.login.loading = false;
                self.complete_sign_in(token);
            }
            Action::AuthFailed { title, message } => {
                self.login.loading = false;
                self.register.loading = false;
                self.alert = Some(Alert::error(title, message));
            }
            Action::RegisterSucceeded { token } => {
                self.register.loading = false;
                self.complete_sign_in(token);
            }
            Action::ProfileLoaded(user) => {
                self.profile = Some(*user);
                self.profile_loading = false;
            }
            Action::ProfileFailed(message) => {
                tracing::error!("Failed to fetch profile: {message}");
                self.profile_loading = false;
            }
            Action::DealPosted => {
                self.post_form.reset();
                self.alert = Some(Alert::info("Published", "Your deal has been published"));
                self.tab = MainTab::Deals;
                self.feed.loading = true;
                self.spawn_fetch_deals();
            }
            Action::DealPostFailed(message) => {
                self.post_form.submitting = false;
                self.alert = Some(Alert::error("Cannot publish", message));
            }
        }
    }

    /// Persist the token and enter the main screens. Both login and
    /// registration end here.
    fn complete_sign_in(&mut self, token: String) {
        match self.auth.sign_in(token) {
            Ok(()) => {
                self.login.reset();
                self.register.reset();
                self.route = Route::Main;
                self.tab = MainTab::Deals;
                self.feed.loading = true;
                self.spawn_fetch_deals();
                self.request_profile();
            }
            Err(error) => {
                tracing::error!("Could not persist session: {error:#}");
            }
        }
    }

    // ----- request spawns ------------------------------------------------

    fn spawn_fetch_deals(&self) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.fetch_deals().await {
                Ok(deals) => {
                    let _ = tx.send(Action::DealsLoaded(deals));
                }
                Err(error) => {
                    let _ = tx.send(Action::DealsFailed(error.to_string()));
                }
            }
        });
    }

    fn spawn_vote(&self, deal_id: String, kind: VoteKind) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.vote(&deal_id, kind).await {
                Ok(()) => {
                    let _ = tx.send(Action::VoteAcked { deal_id, kind });
                }
                Err(error) => {
                    // Votes fail silently; the temperature simply stays put.
                    tracing::warn!("Vote on {deal_id} failed: {error}");
                }
            }
        });
    }

    fn spawn_fetch_comments(&self, deal_id: String, page: u32) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        let limit = self.config.api.comment_page_size;
        tokio::spawn(async move {
            match api.fetch_comments(&deal_id, page, limit).await {
                Ok(page) => {
                    let _ = tx.send(Action::CommentsPageLoaded { deal_id, page });
                }
                Err(error) => {
                    let _ = tx.send(Action::CommentsPageFailed {
                        deal_id,
                        message: error.to_string(),
                    });
                }
            }
        });
    }

    fn spawn_post_comment(&self, deal_id: String, content: String) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.post_comment(&deal_id, &content).await {
                Ok(comment) => {
                    let _ = tx.send(Action::CommentPosted {
                        deal_id,
                        comment: Box::new(comment),
                    });
                }
                Err(error) => {
                    let _ = tx.send(Action::WriteFailed {
                        title: "Comment".to_string(),
                        message: error.to_string(),
                    });
                }
            }
        });
    }

    fn spawn_post_reply(&self, parent_id: String, content: String) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.post_reply(&parent_id, &content).await {
                Ok(reply) => {
                    let _ = tx.send(Action::ReplyPosted { parent_id, reply });
                }
                Err(error) => {
                    let _ = tx.send(Action::WriteFailed {
                        title: "Reply".to_string(),
                        message: error.to_string(),
                    });
                }
            }
        });
    }

    fn spawn_like_comment(&self, id: String) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.like_comment(&id).await {
                Ok(()) => {
                    let _ = tx.send(Action::CommentLiked { id });
                }
                Err(error) => {
                    // Likes fail silently.
                    tracing::warn!("Like on comment {id} failed: {error}");
                }
            }
        });
    }

    fn spawn_edit_comment(&self, id: String, content: String) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.edit_comment(&id, &content).await {
                // The patch carries the content that was sent, not a server
                // echo.
                Ok(()) => {
                    let _ = tx.send(Action::CommentEdited { id, content });
                }
                Err(error) => {
                    let _ = tx.send(Action::WriteFailed {
                        title: "Edit".to_string(),
                        message: error.to_string(),
                    });
                }
            }
        });
    }

    fn spawn_delete_comment(&self, id: String) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.delete_comment(&id).await {
                Ok(()) => {
                    let _ = tx.send(Action::CommentDeleted { id });
                }
                Err(error) => {
                    let _ = tx.send(Action::WriteFailed {
                        title: "Delete".to_string(),
                        message: error.to_string(),
                    });
                }
            }
        });
    }

    fn spawn_fetch_replies(&self, id: String) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.fetch_replies(&id).await {
                Ok(replies) => {
                    let _ = tx.send(Action::RepliesLoaded { id, replies });
                }
                Err(error) => {
                    tracing::error!("Failed to fetch replies for {id}: {error}");
                }
            }
        });
    }

    fn spawn_login(&self, email: String, password: String) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.login(&email, &password).await {
                Ok(token) => {
                    let _ = tx.send(Action::LoginSucceeded { token });
                }
                Err(error) => {
                    let _ = tx.send(Action::AuthFailed {
                        title: "Sign in failed".to_string(),
                        message: error.to_string(),
                    });
                }
            }
        });
    }

    fn spawn_register(&self, username: String, email: String, password: String) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.register(&username, &email, &password).await {
                Ok(token) => {
                    let _ = tx.send(Action::RegisterSucceeded { token });
                }
                Err(error) => {
                    let _ = tx.send(Action::AuthFailed {
                        title: "Sign up failed".to_string(),
                        message: error.to_string(),
                    });
                }
            }
        });
    }

    fn spawn_fetch_profile(&self) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.fetch_me().await {
                Ok(user) => {
                    let _ = tx.send(Action::ProfileLoaded(Box::new(user)));
                }
                Err(error) => {
                    let _ = tx.send(Action::ProfileFailed(error.to_string()));
                }
            }
        });
    }

    fn spawn_submit_deal(&self, deal: crate::api::NewDeal) {
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match api.submit_deal(&deal).await {
                Ok(()) => {
                    let _ = tx.send(Action::DealPosted);
                }
                Err(error) => {
                    let _ = tx.send(Action::DealPostFailed(error.to_string()));
                }
            }
        });
    }
}

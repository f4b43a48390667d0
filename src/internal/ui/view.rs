use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use crate::internal::comments::{CommentsSheet, EditorKind, SheetFocus};
use crate::internal::models::{Comment, Deal};
use crate::internal::post_form::{CATEGORIES, FormField, MAX_IMAGES, PostForm};
use crate::internal::ui::app::{Alert, AlertKind, App, DetailsSheet, MAIN_TABS, MainTab, Route};
use crate::internal::ui::forms::{LoginField, RegisterField};
use crate::utils::datetime::{format_date, format_relative};
use crate::utils::text::{format_price, truncate, wrap};
use crate::utils::theme::Theme;

pub fn draw(app: &mut App, f: &mut Frame) {
    let start = std::time::Instant::now();

    match app.route {
        Route::Login => render_login(app, f),
        Route::Register => render_register(app, f),
        Route::Main => render_main(app, f),
    }

    if let Some(alert) = app.alert.clone() {
        render_alert(app, f, &alert);
    }

    if app.config.logging.enable_performance_metrics && cfg!(debug_assertions) {
        tracing::debug!(elapsed = ?start.elapsed(), route = ?app.route, "render.frame");
    }
}

fn render_main(app: &mut App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_tab_bar(app, f, chunks[0]);

    match app.tab {
        MainTab::Deals => render_feed(app, f, chunks[1]),
        MainTab::Post => render_post_form(app, f, chunks[1]),
        MainTab::Profile => render_profile(app, f, chunks[1]),
    }

    if app.details.is_some() {
        render_details_sheet(app, f, chunks[1]);
    }
    if app.comments.is_some() {
        render_comments_sheet(app, f, chunks[1]);
    }

    render_status_bar(app, f, chunks[2]);
}

fn render_tab_bar(app: &App, f: &mut Frame, area: Rect) {
    let selected = MAIN_TABS
        .iter()
        .position(|tab| *tab == app.tab)
        .unwrap_or(0);

    let titles: Vec<Line> = MAIN_TABS
        .iter()
        .map(|tab| {
            let label = match tab {
                MainTab::Deals => "🔥 Deals",
                MainTab::Post => "+ Post",
                MainTab::Profile => "👤 Profile",
            };
            Line::from(label)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(app.theme.muted))
        .highlight_style(
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("  "));

    f.render_widget(tabs, area);
}

// ----- deal feed ---------------------------------------------------------

/// Build the text lines of one deal card. Shared with the render benchmark.
pub fn deal_card_lines(deal: &Deal, width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let inner_width = width.saturating_sub(4).max(10) as usize;
    let mut lines = Vec::new();

    if let Some(image) = deal.images.first() {
        lines.push(Line::from(Span::styled(
            format!("🖼  {}", truncate(image, inner_width.saturating_sub(4))),
            Style::default().fg(theme.muted),
        )));
        lines.push(Line::from(""));
    }

    for wrapped in wrap(&deal.title, inner_width) {
        lines.push(Line::from(Span::styled(
            wrapped,
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));

    let mut price_spans = vec![
        Span::styled(
            format_price(deal.current_price),
            Style::default()
                .fg(theme.price)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format_price(deal.original_price),
            Style::default()
                .fg(theme.original_price)
                .add_modifier(Modifier::CROSSED_OUT),
        ),
    ];
    let discount = deal.discount_percent();
    if discount > 0 {
        price_spans.push(Span::raw("  "));
        price_spans.push(Span::styled(
            format!("-{discount}%"),
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::from(price_spans));
    lines.push(Line::from(""));

    for wrapped in wrap(&deal.description, inner_width).into_iter().take(6) {
        lines.push(Line::from(Span::styled(
            wrapped,
            Style::default().fg(theme.foreground),
        )));
    }

    lines
}

fn render_feed(app: &App, f: &mut Frame, area: Rect) {
    if app.feed.loading && app.feed.deals.is_empty() {
        let loading = Paragraph::new("Loading deals...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted));
        f.render_widget(loading, area);
        return;
    }

    if let Some(error) = &app.feed.error {
        let message = Paragraph::new(error.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.danger));
        f.render_widget(message, area);
        return;
    }

    let Some(deal) = app.feed.current() else {
        let empty = Paragraph::new("No deals yet. Press r to refresh.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted));
        f.render_widget(empty, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    render_progress_dots(app, f, chunks[0]);

    let card_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(chunks[1])[1];

    // The card follows the drag offset and clips at the feed edges.
    let offset = app.feed.controller.offset_rows();
    let Some(card_area) = shift_rect(card_area, offset) else {
        return;
    };

    let mut lines = deal_card_lines(deal, card_area.width, &app.theme);
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("🔥 {}°", deal.temperature),
            Style::default().fg(app.theme.temperature),
        ),
        Span::raw("   "),
        Span::styled(
            format!("💬 {}", app.feed.comment_count(&deal.id)),
            Style::default().fg(app.theme.muted),
        ),
    ]));

    let card = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border))
                .title(format!(
                    " Deal {}/{} ",
                    app.feed.index + 1,
                    app.feed.deals.len()
                ))
                .title_style(Style::default().fg(app.theme.foreground)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(card, card_area);
}

fn render_progress_dots(app: &App, f: &mut Frame, area: Rect) {
    let dots: Vec<Span> = app
        .feed
        .deals
        .iter()
        .enumerate()
        .flat_map(|(index, _)| {
            let dot = if index == app.feed.index {
                Span::styled("●", Style::default().fg(app.theme.accent))
            } else {
                Span::styled("○", Style::default().fg(app.theme.muted))
            };
            [dot, Span::raw(" ")]
        })
        .collect();

    let strip = Paragraph::new(Line::from(dots)).alignment(Alignment::Center);
    f.render_widget(strip, area);
}

// ----- post form ---------------------------------------------------------

fn render_post_form(app: &App, f: &mut Frame, area: Rect) {
    let form = &app.post_form;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(" New deal ")
        .title_style(Style::default().fg(app.theme.foreground));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        form_line(app, form, FormField::Title, "Title*", &form.title),
        form_line(
            app,
            form,
            FormField::CurrentPrice,
            "Current price*",
            &form.current_price,
        ),
        form_line(
            app,
            form,
            FormField::OriginalPrice,
            "Original price*",
            &form.original_price,
        ),
        form_line(app, form, FormField::Link, "Link*", &form.link),
        category_line(app, form),
        form_line(
            app,
            form,
            FormField::PromoCode,
            "Promo code",
            &form.promo_code,
        ),
        form_line(
            app,
            form,
            FormField::ExpiresAt,
            "Expires (YYYY-MM-DD)",
            &form.expires_at,
        ),
    ];

    lines.push(Line::from(""));
    let description_focused = form.field == FormField::Description;
    lines.push(Line::from(Span::styled(
        "Description*",
        label_style(app, description_focused),
    )));
    let description_width = inner.width.saturating_sub(2).max(10) as usize;
    if form.description.is_empty() {
        lines.push(Line::from(Span::styled(
            "Share the details of the deal",
            Style::default().fg(app.theme.muted),
        )));
    } else {
        for wrapped in wrap(&form.description, description_width) {
            lines.push(Line::from(Span::styled(
                wrapped,
                Style::default().fg(app.theme.foreground),
            )));
        }
    }

    lines.push(Line::from(""));
    let images_focused = form.field == FormField::ImagePath;
    lines.push(Line::from(vec![
        Span::styled(
            format!("Images ({}/{MAX_IMAGES})", form.images.len()),
            label_style(app, images_focused),
        ),
        Span::raw("  "),
        Span::styled(form.image_path.clone(), value_style(app, images_focused)),
    ]));
    for image in &form.images {
        lines.push(Line::from(Span::styled(
            format!("  🖼 {}", image.display()),
            Style::default().fg(app.theme.muted),
        )));
    }

    if form.submitting {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Publishing...",
            Style::default().fg(app.theme.accent),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(paragraph, inner);
}

fn form_line<'a>(
    app: &App,
    form: &PostForm,
    field: FormField,
    label: &'a str,
    value: &str,
) -> Line<'a> {
    let focused = form.field == field;
    let shown = if value.is_empty() && !focused {
        Span::styled("—", Style::default().fg(app.theme.muted))
    } else {
        Span::styled(value.to_string(), value_style(app, focused))
    };
    Line::from(vec![
        Span::styled(format!("{label:<22}"), label_style(app, focused)),
        shown,
    ])
}

fn category_line(app: &App, form: &PostForm) -> Line<'static> {
    let focused = form.field == FormField::Category;
    let value = match form.selected_category() {
        Some(category) => format!("{} {}", category.icon, category.label),
        None => format!("←/→ to pick ({} available)", CATEGORIES.len()),
    };
    Line::from(vec![
        Span::styled(format!("{:<22}", "Category*"), label_style(app, focused)),
        Span::styled(value, value_style(app, focused)),
    ])
}

fn label_style(app: &App, focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(app.theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.muted)
    }
}

fn value_style(app: &App, focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(app.theme.foreground)
            .add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(app.theme.foreground)
    }
}

// ----- profile -----------------------------------------------------------

fn render_profile(app: &App, f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(" Profile ")
        .title_style(Style::default().fg(app.theme.foreground));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.profile_loading && app.profile.is_none() {
        let loading = Paragraph::new("Loading profile...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted));
        f.render_widget(loading, inner);
        return;
    }

    let (username, email, deals_posted, karma, saved) = match &app.profile {
        Some(user) => (
            user.username.clone(),
            user.email.clone(),
            user.created_deals.len(),
            user.karma,
            user.saved_deals.len(),
        ),
        None => ("Guest".to_string(), String::new(), 0, 0, 0),
    };

    let lines = vec![
        Line::from(Span::styled(
            username,
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(email, Style::default().fg(app.theme.muted))),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{deals_posted}"),
                Style::default()
                    .fg(app.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" deals posted   ", Style::default().fg(app.theme.muted)),
            Span::styled(
                format!("{karma}"),
                Style::default()
                    .fg(app.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" karma   ", Style::default().fg(app.theme.muted)),
            Span::styled(
                format!("{saved}"),
                Style::default()
                    .fg(app.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" saved deals", Style::default().fg(app.theme.muted)),
        ]),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

// ----- bottom sheets -----------------------------------------------------

/// Area of a bottom sheet covering the lower 80% of `area`, pushed down by
/// the drag offset. `None` once it has slid fully off screen.
fn sheet_area(area: Rect, offset_rows: i32) -> Option<Rect> {
    let top = area.height / 5;
    let sheet = Rect::new(area.x, area.y + top, area.width, area.height - top);
    shift_rect(sheet, offset_rows.max(0))
}

/// Translate `area` vertically by `offset` rows, clipped to its own bounds.
fn shift_rect(area: Rect, offset: i32) -> Option<Rect> {
    let top = area.y as i32;
    let bottom = (area.y + area.height) as i32;
    let new_top = (top + offset).clamp(top, bottom);
    let new_bottom = (bottom + offset).clamp(top, bottom);
    if new_bottom <= new_top {
        return None;
    }
    Some(Rect::new(
        area.x,
        new_top as u16,
        area.width,
        (new_bottom - new_top) as u16,
    ))
}

fn render_details_sheet(app: &App, f: &mut Frame, area: Rect) {
    let Some(DetailsSheet { deal, controller }) = &app.details else {
        return;
    };
    let Some(sheet) = sheet_area(area, controller.offset_rows()) else {
        return;
    };

    f.render_widget(Clear, sheet);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(" ── drag down to close ── ")
        .title_alignment(Alignment::Center)
        .title_style(Style::default().fg(app.theme.muted));
    let inner = block.inner(sheet);
    f.render_widget(block, sheet);

    let mut lines = deal_card_lines(deal, inner.width, &app.theme);
    lines.push(Line::from(""));
    if let Some(created_at) = &deal.created_at {
        lines.push(Line::from(vec![
            Span::styled("Published  ", Style::default().fg(app.theme.muted)),
            Span::styled(
                format_date(created_at),
                Style::default().fg(app.theme.foreground),
            ),
        ]));
    }
    if !deal.link.is_empty() {
        lines.push(Line::from(Span::styled(
            truncate(&deal.link, inner.width.saturating_sub(2) as usize),
            Style::default().fg(app.theme.accent),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(paragraph, inner);
}

fn comment_list_item<'a>(
    app: &App,
    sheet: &CommentsSheet,
    comment: &'a Comment,
    width: u16,
) -> ListItem<'a> {
    let wrap_width = width.saturating_sub(4).max(10) as usize;
    let mut lines = vec![Line::from(vec![
        Span::styled(
            comment.author.username.clone(),
            Style::default()
                .fg(app.theme.foreground)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            match &comment.created_at {
                Some(created_at) => format!("  {}", format_relative(created_at)),
                None => String::new(),
            },
            Style::default().fg(app.theme.muted),
        ),
    ])];

    for wrapped in wrap(&comment.content, wrap_width) {
        lines.push(Line::from(Span::styled(
            wrapped,
            Style::default().fg(app.theme.foreground),
        )));
    }

    let mut footer = vec![Span::styled(
        format!("❤ {}", comment.likes),
        Style::default().fg(app.theme.muted),
    )];
    if comment.reply_count > 0 {
        let expanded = sheet.expanded.as_deref() == Some(comment.id.as_str());
        footer.push(Span::styled(
            format!(
                "   {} {} replies",
                if expanded { "▼" } else { "▶" },
                comment.reply_count
            ),
            Style::default().fg(app.theme.muted),
        ));
    }
    lines.push(Line::from(footer));

    if sheet.expanded.as_deref() == Some(comment.id.as_str()) {
        for reply in &comment.replies {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(
                    reply.author.username.clone(),
                    Style::default().fg(app.theme.foreground),
                ),
                Span::styled(
                    match &reply.created_at {
                        Some(created_at) => format!("  {}", format_relative(created_at)),
                        None => String::new(),
                    },
                    Style::default().fg(app.theme.muted),
                ),
            ]));
            for wrapped in wrap(&reply.content, wrap_width.saturating_sub(4)) {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(wrapped, Style::default().fg(app.theme.muted)),
                ]));
            }
        }
    }

    lines.push(Line::from(""));
    ListItem::new(lines)
}

fn render_comments_sheet(app: &App, f: &mut Frame, area: Rect) {
    let Some(sheet) = &app.comments else {
        return;
    };
    let Some(sheet_rect) = sheet_area(area, sheet.controller.offset_rows()) else {
        return;
    };

    f.render_widget(Clear, sheet_rect);
    let title = format!(" {} comments ", sheet.thread.total());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(title)
        .title_alignment(Alignment::Center)
        .title_style(Style::default().fg(app.theme.foreground));
    let inner = block.inner(sheet_rect);
    f.render_widget(block, sheet_rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(inner);

    let items: Vec<ListItem> = if sheet.thread.is_empty() {
        let text = if sheet.loading {
            "Loading comments..."
        } else {
            "No comments yet"
        };
        vec![ListItem::new(Line::from(Span::styled(
            text,
            Style::default().fg(app.theme.muted),
        )))]
    } else {
        let mut items: Vec<ListItem> = sheet
            .thread
            .items()
            .iter()
            .map(|comment| comment_list_item(app, sheet, comment, chunks[0].width))
            .collect();
        if sheet.thread.has_more() {
            let text = if sheet.loading {
                "Loading more..."
            } else {
                "m: load more comments"
            };
            items.push(ListItem::new(Line::from(Span::styled(
                text,
                Style::default().fg(app.theme.accent),
            ))));
        }
        items
    };

    let selected = (!sheet.thread.is_empty()).then_some(sheet.selected);
    let list = List::new(items).highlight_style(
        Style::default()
            .bg(app.theme.selection_bg)
            .fg(app.theme.selection_fg),
    );
    let mut list_state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, chunks[0], &mut list_state);

    render_sheet_input(app, f, chunks[1]);
}

fn render_sheet_input(app: &App, f: &mut Frame, area: Rect) {
    let Some(sheet) = &app.comments else {
        return;
    };

    let (title, text, active) = match &sheet.editor {
        Some(editor) => {
            let title = match &editor.kind {
                EditorKind::Reply { .. } => " Write a reply ",
                EditorKind::Edit { .. } => " Edit comment ",
            };
            (title, editor.text.as_str(), true)
        }
        None => (
            " Add a comment ",
            sheet.input.as_str(),
            sheet.focus == SheetFocus::Input,
        ),
    };

    let border = if active {
        Style::default().fg(app.theme.accent)
    } else {
        Style::default().fg(app.theme.border)
    };

    let shown = if active {
        format!("{text}█")
    } else if text.is_empty() {
        "press i to comment".to_string()
    } else {
        text.to_string()
    };

    let input = Paragraph::new(shown)
        .style(Style::default().fg(app.theme.foreground))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title)
                .title_style(Style::default().fg(app.theme.muted)),
        );
    f.render_widget(input, area);
}

// ----- auth screens ------------------------------------------------------

fn render_login(app: &App, f: &mut Frame) {
    let area = centered_rect(f.area(), 50, 14);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.accent))
        .title(" DealGrown ")
        .title_alignment(Alignment::Center)
        .title_style(
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let email_focused = app.login.field == LoginField::Email;
    let password_focused = app.login.field == LoginField::Password;
    let masked = "•".repeat(app.login.password.chars().count());

    let lines = vec![
        Line::from(Span::styled(
            "Find the best deals and share your finds",
            Style::default().fg(app.theme.muted),
        )),
        Line::from(""),
        field_line(app, "Email", &app.login.email, email_focused),
        field_line(app, "Password", &masked, password_focused),
        Line::from(""),
        Line::from(Span::styled(
            if app.login.loading {
                "Signing in..."
            } else {
                "Enter: Sign in"
            },
            Style::default().fg(app.theme.accent),
        )),
        Line::from(Span::styled(
            "No account yet? Ctrl+R to sign up",
            Style::default().fg(app.theme.muted),
        )),
    ];

    f.render_widget(Paragraph::new(lines), inner);
    render_status_bar(app, f, bottom_row(f.area()));
}

fn render_register(app: &App, f: &mut Frame) {
    let area = centered_rect(f.area(), 50, 14);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.accent))
        .title(" Create your account ")
        .title_alignment(Alignment::Center)
        .title_style(Style::default().fg(app.theme.foreground));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let masked = "•".repeat(app.register.password.chars().count());
    let masked_confirm = "•".repeat(app.register.confirm_password.chars().count());
    let lines = vec![
        field_line(
            app,
            "Username",
            &app.register.username,
            app.register.field == RegisterField::Username,
        ),
        field_line(
            app,
            "Email",
            &app.register.email,
            app.register.field == RegisterField::Email,
        ),
        field_line(
            app,
            "Password",
            &masked,
            app.register.field == RegisterField::Password,
        ),
        field_line(
            app,
            "Confirm",
            &masked_confirm,
            app.register.field == RegisterField::ConfirmPassword,
        ),
        Line::from(""),
        Line::from(Span::styled(
            if app.register.loading {
                "Creating account..."
            } else {
                "Enter: Create account"
            },
            Style::default().fg(app.theme.accent),
        )),
        Line::from(Span::styled(
            "Esc: Back to sign in",
            Style::default().fg(app.theme.muted),
        )),
    ];

    f.render_widget(Paragraph::new(lines), inner);
    render_status_bar(app, f, bottom_row(f.area()));
}

fn field_line<'a>(app: &App, label: &'a str, value: &str, focused: bool) -> Line<'a> {
    let cursor = if focused { "█" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label:<10}"), label_style(app, focused)),
        Span::styled(
            format!("{value}{cursor}"),
            Style::default().fg(app.theme.foreground),
        ),
    ])
}

// ----- overlays and chrome -----------------------------------------------

fn render_alert(app: &App, f: &mut Frame, alert: &Alert) {
    let area = f.area();
    let popup_width = (alert.message.chars().count() as u16 + 6)
        .max(alert.title.chars().count() as u16 + 6)
        .clamp(24, area.width.saturating_sub(4));
    let popup_height = 5;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    let color = match alert.kind {
        AlertKind::Error => app.theme.danger,
        AlertKind::Info => app.theme.accent,
    };

    let popup = Paragraph::new(vec![
        Line::from(Span::styled(
            alert.message.clone(),
            Style::default().fg(app.theme.foreground),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: OK",
            Style::default().fg(app.theme.muted),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", alert.title))
            .title_alignment(Alignment::Center)
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(popup, popup_area);
}

fn render_status_bar(app: &App, f: &mut Frame, area: Rect) {
    let status = match app.route {
        Route::Login => "Tab: Next field | Enter: Sign in | Ctrl+R: Sign up | Esc: Quit",
        Route::Register => "Tab: Next field | Enter: Create account | Esc: Back",
        Route::Main => {
            if let Some(sheet) = &app.comments {
                if sheet.editor.is_some() {
                    "Enter: Send | Esc: Cancel"
                } else if sheet.focus == SheetFocus::Input {
                    "Enter: Send | Esc/Tab: Back to list"
                } else {
                    "j/k: Select | l: Like | r: Reply | e: Edit | x: Delete | Enter: Replies | m: More | i: Comment | Esc: Close"
                }
            } else if app.details.is_some() {
                "Esc: Close (or drag down)"
            } else {
                match app.tab {
                    MainTab::Deals => {
                        "j/k: Swipe | Enter: Details | c: Comments | u/d: Vote | o: Open | r: Refresh | 1-3: Tabs | q: Quit"
                    }
                    MainTab::Post => {
                        "Tab: Next field | ←/→: Category | Enter: Add image | Ctrl+S: Publish | Esc: Back"
                    }
                    MainTab::Profile => "r: Reload | x: Sign out | 1-3: Tabs | q: Quit",
                }
            }
        }
    };

    let bar = Paragraph::new(status).style(
        Style::default()
            .bg(app.theme.selection_bg)
            .fg(app.theme.selection_fg),
    );
    f.render_widget(bar, area);
}

fn bottom_row(area: Rect) -> Rect {
    Rect::new(
        area.x,
        area.y + area.height.saturating_sub(1),
        area.width,
        1,
    )
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_rect_moves_down_and_clips() {
        let area = Rect::new(0, 2, 10, 10);
        let shifted = shift_rect(area, 3).unwrap();
        assert_eq!(shifted.y, 5);
        assert_eq!(shifted.height, 7);
    }

    #[test]
    fn shift_rect_vanishes_past_bottom() {
        let area = Rect::new(0, 0, 10, 10);
        assert!(shift_rect(area, 10).is_none());
        assert!(shift_rect(area, 25).is_none());
    }

    #[test]
    fn shift_rect_zero_offset_is_identity() {
        let area = Rect::new(0, 4, 10, 6);
        assert_eq!(shift_rect(area, 0), Some(area));
    }

    #[test]
    fn sheet_area_covers_lower_part() {
        let area = Rect::new(0, 0, 80, 40);
        let sheet = sheet_area(area, 0).unwrap();
        assert_eq!(sheet.y, 8);
        assert_eq!(sheet.height, 32);
    }

    #[test]
    fn deal_card_lines_include_prices_and_discount() {
        let deal = Deal {
            id: "d1".to_string(),
            title: "Mechanical keyboard".to_string(),
            current_price: 50.0,
            original_price: 100.0,
            description: "Half price".to_string(),
            ..Deal::default()
        };
        let lines = deal_card_lines(&deal, 60, &Theme::default());
        let text: String = lines
            .iter()
            .flat_map(|line| line.spans.iter().map(|span| span.content.clone()))
            .collect();
        assert!(text.contains("50.00€"));
        assert!(text.contains("100.00€"));
        assert!(text.contains("-50%"));
    }
}

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::app::{App, InputMode};
use crate::internal::filters::option_label;
use crate::internal::notification::NotificationType;
use crate::internal::render::{ArticleCard, ArticleListView, Placeholder};

/// Description lines shown per card before truncation.
const DESCRIPTION_LINES: usize = 2;

pub fn draw(app: &mut App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(
        Block::default().style(
            Style::default()
                .bg(app.theme.background)
                .fg(app.theme.foreground),
        ),
        f.area(),
    );

    render_top_bar(app, f, chunks[0]);
    render_filter_bar(app, f, chunks[1]);
    render_articles(app, f, chunks[2]);
    render_status_bar(app, f, chunks[3]);

    if app.notification.is_some() {
        render_notification(app, f, chunks[2]);
    }
}

fn render_top_bar(app: &App, f: &mut Frame, area: Rect) {
    let mode_style = |active: bool| match active {
        true => Style::default()
            .fg(app.theme.selection_fg)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD),
        false => Style::default().fg(app.theme.muted),
    };

    let left = Line::from(vec![
        Span::styled(
            format!(" News v{} ", app.app_version),
            Style::default()
                .fg(app.theme.foreground)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(" Latest ", mode_style(!app.bookmarks_mode)),
        Span::raw(" "),
        Span::styled(" ★ Bookmarks ", mode_style(app.bookmarks_mode)),
    ]);
    f.render_widget(Paragraph::new(left), area);

    let icon = Paragraph::new(format!("{} ", app.dark_mode_icon()))
        .style(Style::default().fg(app.theme.bookmark))
        .alignment(Alignment::Right);
    f.render_widget(icon, area);
}

fn render_filter_bar(app: &App, f: &mut Frame, area: Rect) {
    let searching = app.input_mode == InputMode::Search;
    let label = Style::default().fg(app.theme.muted);
    let value = Style::default().fg(app.theme.foreground);
    let dimmed = if app.bookmarks_mode { label } else { value };

    let mut spans = vec![
        Span::styled("Search: ", label),
        Span::styled(
            app.filters.search_text.clone(),
            match searching {
                true => value.add_modifier(Modifier::UNDERLINED),
                false => dimmed,
            },
        ),
    ];
    if searching {
        spans.push(Span::styled("▏", Style::default().fg(app.theme.link)));
    }
    spans.extend([
        Span::styled("  Category: ", label),
        Span::styled(option_label(&app.categories, &app.filters.category), dimmed),
        Span::styled("  Source: ", label),
        Span::styled(option_label(&app.sources, &app.filters.source), dimmed),
        Span::styled("  Window: ", label),
        Span::styled(format!("{}d", app.filters.window_days), dimmed),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if searching {
            app.theme.link
        } else {
            app.theme.border
        }))
        .title(" Filters ");
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_articles(app: &mut App, f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(if app.bookmarks_mode {
            " Bookmarks "
        } else {
            " Articles "
        });

    match &app.listing {
        ArticleListView::Pending => f.render_widget(block, area),
        ArticleListView::NoResults | ArticleListView::LoadFailed => {
            let placeholder = app.listing.placeholder();
            let inner = block.inner(area);
            f.render_widget(block, area);
            if let Some(p) = placeholder {
                render_placeholder(app, f, inner, p);
            }
        }
        ArticleListView::Cards(cards) => {
            let width = area.width.saturating_sub(4) as usize;
            let items: Vec<ListItem> = cards
                .iter()
                .map(|card| ListItem::new(card_lines(app, card, width)))
                .collect();

            let list = List::new(items).block(block).highlight_style(
                Style::default()
                    .bg(app.theme.selection_bg)
                    .fg(app.theme.selection_fg),
            );
            f.render_stateful_widget(list, area, &mut app.list_state);
        }
    }
}

fn card_lines<'a>(app: &App, card: &'a ArticleCard, width: usize) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{} ", card.bookmark_icon()),
            Style::default().fg(app.theme.bookmark),
        ),
        Span::styled(
            card.title.as_str(),
            Style::default()
                .fg(app.theme.link)
                .add_modifier(Modifier::BOLD),
        ),
    ])];

    if let Some(description) = &card.description {
        let wrapped = textwrap::wrap(description, width.max(10));
        let shown = wrapped.len().min(DESCRIPTION_LINES);
        for (i, line) in wrapped.iter().take(shown).enumerate() {
            let text = match i + 1 == shown && wrapped.len() > shown {
                true => format!("  {}…", line),
                false => format!("  {}", line),
            };
            lines.push(Line::from(Span::styled(
                text,
                Style::default().fg(app.theme.foreground),
            )));
        }
    }

    let mut meta = vec![
        Span::raw("  "),
        Span::styled(
            card.source_label.as_str(),
            Style::default().fg(app.theme.source),
        ),
        Span::styled(" · ", Style::default().fg(app.theme.muted)),
        Span::styled(card.time_label.as_str(), Style::default().fg(app.theme.muted)),
    ];
    if card.image_url.is_some() {
        meta.push(Span::styled(" [img]", Style::default().fg(app.theme.muted)));
    }
    lines.push(Line::from(meta));
    lines.push(Line::default());
    lines
}

fn render_placeholder(app: &App, f: &mut Frame, area: Rect, placeholder: Placeholder) {
    let top = area.height.saturating_sub(3) / 2;
    let area = Rect::new(area.x, area.y + top, area.width, area.height.min(3));
    let text = vec![
        Line::from(Span::styled(
            placeholder.icon,
            Style::default().fg(app.theme.muted),
        )),
        Line::from(Span::styled(
            placeholder.title,
            Style::default()
                .fg(app.theme.foreground)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            placeholder.hint,
            Style::default().fg(app.theme.muted),
        )),
    ];
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn render_status_bar(app: &App, f: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.input_mode),
        Style::default()
            .fg(app.theme.selection_fg)
            .bg(app.theme.selection_bg),
    )];

    if app.loading {
        spans.push(Span::styled(
            format!(" {} Loading articles…", app.get_spinner_char()),
            Style::default().fg(app.theme.link),
        ));
    }

    let hints = match app.input_mode {
        InputMode::Search => "  type to search · Enter/Esc done",
        InputMode::Normal => {
            "  / search · c/s/t filters · b bookmarks · space bookmark · o open · d dark · r refresh · q quit"
        }
    };
    spans.push(Span::styled(hints, Style::default().fg(app.theme.muted)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_notification(app: &App, f: &mut Frame, area: Rect) {
    let Some(notification) = &app.notification else {
        return;
    };

    let width = (notification.message.chars().count() as u16 + 4)
        .min(area.width.saturating_sub(2))
        .max(10);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let popup = Rect::new(x, area.y + 1, width.min(area.width), 3.min(area.height));

    let style = match notification.notification_type {
        NotificationType::Error => Style::default().fg(app.theme.error_fg).bg(app.theme.error_bg),
        NotificationType::Info => Style::default()
            .fg(app.theme.selection_fg)
            .bg(app.theme.selection_bg),
    };

    let banner = Paragraph::new(notification.message.as_str())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).style(style));

    f.render_widget(Clear, popup);
    f.render_widget(banner, popup);
}

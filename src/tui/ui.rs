//! Layout and rendering
//!
//! ```text
//! ┌ header ───────────────────────────────┐
//! │ pet art + greeting      │ stats       │
//! ├ menu sidebar ┬ submenu / confirm ─────┤
//! └ message or key hints ─────────────────┘
//! ```

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::app::{App, AppMode};
use crate::menu::{MenuItem, MenuLink, MenuStateMachine, Pane};
use crate::pet::PetState;
use crate::render::{pose_for, progress_bar, stat_rows, RenderContext, Theme};
use crate::session::Session;

const HINTS: &str = "↑↓ move · → open · ← back · enter select · q quit";

pub fn render(frame: &mut Frame, app: &mut App) {
    if app.mode == AppMode::Playing && app.session.is_some() {
        render_game(frame, app);
    } else {
        render_prompt(frame, app);
    }
}

fn render_prompt(frame: &mut Frame, app: &App) {
    let theme = app.ctx.theme;
    let area = centered(frame.area(), 60, 12);

    let mut lines = vec![
        Line::styled(
            "╔═══ WELCOME TO MEMORY PET ═══╗",
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            "Your pet's memory depends on your git commits!",
            Style::default().fg(theme.secondary),
        ),
    ];
    for note in &app.banner {
        lines.push(Line::styled(note.as_str(), Style::default().fg(theme.dim)));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("What's your name? ", Style::default().fg(theme.secondary)),
        Span::raw(app.input.as_str()),
    ]));

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_game(frame: &mut Frame, app: &mut App) {
    let App { session, ctx, .. } = app;
    let Some(session) = session.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // header
            Constraint::Min(8),     // pet + stats
            Constraint::Length(10), // menu
            Constraint::Length(1),  // message / hints
        ])
        .split(frame.area());

    render_header(frame, chunks[0], session.pet(), ctx);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(chunks[1]);
    render_pet(frame, body[0], session, ctx);
    render_stats(frame, body[1], session.pet(), &ctx.theme);

    render_menu(frame, chunks[2], session, &ctx.theme);
    render_footer(frame, chunks[3], session, &ctx.theme);
}

fn render_header(frame: &mut Frame, area: Rect, pet: &PetState, ctx: &mut RenderContext) {
    let (title, color) = ctx.title(pet);
    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(Line::styled(title, style))
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(style)),
        area,
    );
}

fn render_pet(frame: &mut Frame, area: Rect, session: &Session, ctx: &mut RenderContext) {
    let pet = session.pet();
    let pose = session.message().and_then(|m| pose_for(&m.outcome));
    let art = ctx.pet_art(pet, pose);
    let theme = ctx.theme;

    let mut lines: Vec<Line> = art.lines().map(|l| Line::raw(l.to_string())).collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("🦆 {} greets: ", pet.pet_name()),
            Style::default().fg(theme.info),
        ),
        Span::styled(
            format!("'{}'", pet.display_name()),
            Style::default().fg(theme.secondary),
        ),
    ]));

    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(
            Block::bordered()
                .title(Line::styled("Your Pet", Style::default().fg(theme.primary)))
                .border_style(Style::default().fg(theme.primary)),
        ),
        area,
    );
}

fn render_stats(frame: &mut Frame, area: Rect, pet: &PetState, theme: &Theme) {
    let mut lines = Vec::new();
    for (label, value, color) in stat_rows(pet, theme) {
        lines.push(Line::styled(label, Style::default().add_modifier(Modifier::BOLD)));
        lines.push(Line::styled(progress_bar(value), Style::default().fg(color)));
    }

    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(
            Block::bordered()
                .title(Line::styled("Status", Style::default().fg(theme.secondary)))
                .border_style(Style::default().fg(theme.secondary)),
        ),
        area,
    );
}

fn render_menu(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let menu = session.menu();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(10)])
        .split(area);

    // Sidebar: while a submenu is open, keep the item that leads to it marked.
    let sidebar_index = match menu.focus() {
        Pane::Main => menu.selected_index(),
        pane => menu
            .layout()
            .items(Pane::Main)
            .iter()
            .position(|item| item.link == MenuLink::Submenu(pane))
            .unwrap_or(0),
    };
    let sidebar_focused = menu.focus() == Pane::Main;
    render_list(
        frame,
        cols[0],
        Pane::Main.title(),
        menu.layout().items(Pane::Main),
        Some(sidebar_index),
        sidebar_focused,
        session.pet(),
        theme,
    );

    if menu.is_confirming_exit() {
        render_confirm_exit(frame, cols[1], session.pet(), theme);
        return;
    }

    match submenu_in_view(menu) {
        Some(pane) => render_list(
            frame,
            cols[1],
            pane.title(),
            menu.layout().items(pane),
            (!sidebar_focused).then(|| menu.selected_index()),
            !sidebar_focused,
            session.pet(),
            theme,
        ),
        None => frame.render_widget(
            Block::bordered().border_style(Style::default().fg(theme.dim)),
            cols[1],
        ),
    }
}

/// The focused submenu, or a preview of the one the sidebar selection opens.
fn submenu_in_view(menu: &MenuStateMachine) -> Option<Pane> {
    match menu.focus() {
        Pane::Main => match menu.selected().link {
            MenuLink::Submenu(pane) => Some(pane),
            _ => None,
        },
        pane => Some(pane),
    }
}

#[allow(clippy::too_many_arguments)]
fn render_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: &[MenuItem],
    selected: Option<usize>,
    focused: bool,
    pet: &PetState,
    theme: &Theme,
) {
    let accent = if focused { theme.secondary } else { theme.dim };

    let rows: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let known = match item.link {
                MenuLink::Command(cmd) => cmd.trick().is_some_and(|t| pet.memory.knows(t)),
                _ => false,
            };
            let label = if known {
                format!("{} ✓", item.label)
            } else {
                item.label.clone()
            };
            ListItem::new(label)
        })
        .collect();

    let mut state = ListState::default().with_selected(selected);
    let list = List::new(rows)
        .block(
            Block::bordered()
                .title(Line::styled(title.to_string(), Style::default().fg(accent)))
                .border_style(Style::default().fg(accent)),
        )
        .highlight_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    if focused {
        frame.render_stateful_widget(list, area, &mut state);
    } else {
        frame.render_stateful_widget(list.highlight_symbol("  "), area, &mut state);
    }
}

fn render_confirm_exit(frame: &mut Frame, area: Rect, pet: &PetState, theme: &Theme) {
    let lines = vec![
        Line::styled(
            format!("Leave {}?", pet.pet_name()),
            Style::default().fg(theme.danger).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw("Press enter to exit."),
        Line::styled(
            "Don't forget to commit to keep its memory alive!",
            Style::default().fg(theme.warning),
        ),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true }).block(
            Block::bordered()
                .title(Line::styled("Exit", Style::default().fg(theme.danger)))
                .border_style(Style::default().fg(theme.danger)),
        ),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let line = match session.message() {
        Some(message) => Line::styled(
            message.text.as_str(),
            Style::default().fg(theme.tone(message.tone)),
        ),
        None => Line::styled(HINTS, Style::default().fg(theme.dim)),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

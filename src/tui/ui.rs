use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::state::{AppScreen, AppState, AuthField, AuthMode};
use crate::{Movie, MovieRow};

/// Width of one title card, borders between cards included.
const CARD_WIDTH: u16 = 24;

/// Main render function: the home screen, then whatever modal is open.
pub fn render(f: &mut Frame, state: &AppState) {
    render_home(f, state);

    match state.screen {
        AppScreen::AuthForm | AppScreen::SubmittingAuth => render_auth_form(f, state),
        AppScreen::Details => render_details(f, state),
        AppScreen::Notice => render_notice(f, state),
        _ => {}
    }
}

/// Render header, hero, rows, footer and status bar.
fn render_home(f: &mut Frame, state: &AppState) {
    let rows = state.rows();
    let hero_height = if state.home.hero().is_some() { 7 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(hero_height),
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_header(f, chunks[0], state);
    if let Some(hero) = state.home.hero() {
        render_hero(f, chunks[1], hero);
    }

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            rows.iter()
                .map(|_| Constraint::Length(5))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(chunks[2]);
    for (i, row) in rows.iter().enumerate() {
        render_row(f, row_areas[i], row, i == state.focused_row, state.selection(i));
    }

    let footer = Paragraph::new(vec![
        Line::from(help_text(state)).style(Style::default().fg(Color::DarkGray)),
        Line::from("Demo clone for educational purposes")
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)),
    ])
    .alignment(Alignment::Center);
    f.render_widget(footer, chunks[3]);

    render_status_bar(f, chunks[4], state);
}

fn render_header(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().borders(Borders::BOTTOM);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(10), Constraint::Min(10)])
        .split(inner);

    let logo = Paragraph::new("Flix").style(
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(logo, halves[0]);

    let controls = match state.session.user() {
        Some(user) => Line::from(vec![
            Span::styled("s", Style::default().fg(Color::Yellow)),
            Span::raw(": Seed catalog  "),
            Span::styled(user.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled("o", Style::default().fg(Color::Yellow)),
            Span::raw(": Sign out"),
        ]),
        None => Line::from(vec![
            Span::styled("l", Style::default().fg(Color::Yellow)),
            Span::raw(": Sign in / Sign up"),
        ]),
    };
    f.render_widget(
        Paragraph::new(controls).alignment(Alignment::Right),
        halves[1],
    );
}

fn render_hero(f: &mut Frame, area: Rect, movie: &Movie) {
    let mut lines = vec![Line::from(Span::styled(
        movie.title.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))];
    lines.extend(text_lines(&movie.description, 2));
    lines.extend([
        Line::from(vec![
            Span::styled(
                format!(" ▶ Play: /watch/{} ", movie.id),
                Style::default().fg(Color::Black).bg(Color::White),
            ),
            Span::raw("  "),
            Span::styled(" i: More Info ", Style::default().bg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            movie.thumbnail_url.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    let hero = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Featured "));
    f.render_widget(hero, area);
}

/// Render one row as a strip of cards scrolled so the selection is visible.
fn render_row(f: &mut Frame, area: Rect, row: &MovieRow<'_>, focused: bool, selected: usize) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", row.title));

    if row.items.is_empty() {
        let empty = Paragraph::new("Nothing here yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let visible = usize::from((area.width.saturating_sub(2) / CARD_WIDTH).max(1));
    let start = scroll_start(selected, visible);

    let cells: Vec<Cell> = row
        .items
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(i, movie)| {
            let is_selected = focused && i == selected;
            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let action = if is_selected && row.allows_add {
                "a: + My List"
            } else {
                ""
            };
            Cell::from(Text::from(vec![
                Line::from(truncate(&movie.title, usize::from(CARD_WIDTH) - 2)),
                Line::from(Span::styled(
                    truncate(&movie.genre, usize::from(CARD_WIDTH) - 2),
                    Style::default().add_modifier(Modifier::DIM),
                )),
                Line::from(action),
            ]))
            .style(style)
        })
        .collect();

    let widths = vec![Constraint::Length(CARD_WIDTH - 1); cells.len()];
    let table = Table::new(vec![Row::new(cells).height(3)], widths)
        .column_spacing(1)
        .block(block);
    f.render_widget(table, area);
}

fn render_auth_form(f: &mut Frame, state: &AppState) {
    let form = &state.auth_form;
    let submitting = state.screen == AppScreen::SubmittingAuth;
    let (title, button, busy, toggle) = match form.mode {
        AuthMode::SignIn => (" Sign in ", "Sign in", "Signing in...", "New here?"),
        AuthMode::SignUp => (" Sign up ", "Sign up", "Signing up...", "Have an account?"),
    };

    let field_line = |field: AuthField, label: &str, value: String| {
        let focused = form.focus == field && !submitting;
        let marker = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{marker}{label:<10}"), style),
            Span::raw(value),
        ])
    };

    let mut lines = Vec::new();
    if form.mode == AuthMode::SignUp {
        lines.push(field_line(AuthField::Name, "Name", form.name.clone()));
    }
    lines.push(field_line(AuthField::Email, "Email", form.email.clone()));
    lines.push(field_line(
        AuthField::Password,
        "Password",
        "*".repeat(form.password.chars().count()),
    ));
    lines.push(Line::from(""));

    let button_style = if submitting {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White).bg(Color::Red)
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!(" {} ", if submitting { busy } else { button }),
            button_style,
        ),
        Span::raw("   "),
        Span::styled(
            format!("Ctrl-T: {toggle}"),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    if let Some(ref error) = form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::LightRed),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Enter: Submit | Tab: Next field | Esc: Cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let height = lines.len() as u16 + 2;
    let area = centered_rect(60, height, f.area());
    f.render_widget(Clear, area);
    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(title),
    );
    f.render_widget(popup, area);
}

fn render_details(f: &mut Frame, state: &AppState) {
    let Some(movie) = state.home.details.as_ref() else {
        return;
    };

    let description = if movie.description.trim().is_empty() {
        vec![Line::from("No description available")]
    } else {
        text_lines(&movie.description, 4)
    };
    let mut text = vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Genre: {}{}",
            movie.genre,
            if movie.featured { " | Featured" } else { "" }
        )),
        Line::from(""),
    ];
    text.extend(description);
    text.extend([
        Line::from(""),
        Line::from(format!("Play: /watch/{}", movie.id)),
        Line::from(Span::styled(
            movie.thumbnail_url.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    let area = centered_rect(70, 14, f.area());
    f.render_widget(Clear, area);
    let popup = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" More Info ")
            .title_bottom(" Esc: Close "),
    );
    f.render_widget(popup, area);
}

fn render_notice(f: &mut Frame, state: &AppState) {
    let message = state.notice.as_deref().unwrap_or_default();
    let area = centered_rect(50, 5, f.area());
    f.render_widget(Clear, area);
    let popup = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Notice "),
    );
    f.render_widget(popup, area);
}

/// Render the status bar at the bottom.
fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let pending = match state.screen {
        AppScreen::LoadingHome => Some("Loading catalog"),
        AppScreen::Seeding => Some("Seeding catalog"),
        AppScreen::AddingToList { .. } => Some("Saving to My List"),
        AppScreen::LoadingDetails { .. } => Some("Loading details"),
        AppScreen::SubmittingAuth => Some("Contacting server"),
        _ => None,
    };

    let (status_text, style) = if let Some(ref error) = state.error_message {
        (format!(" Error: {error}"), Style::default().fg(Color::Red))
    } else if let Some(message) = pending {
        (format!(" {message}..."), Style::default().fg(Color::Yellow))
    } else {
        let who = match state.session.user() {
            Some(user) => format!("signed in as {}", user.name),
            None => "signed out".to_string(),
        };
        (
            format!(" Connected to: {} | {who}", state.client.base_url()),
            Style::default().fg(Color::Green),
        )
    };

    let status = Paragraph::new(status_text)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}

fn help_text(state: &AppState) -> &'static str {
    if state.session.is_signed_in() {
        "↑/↓: Row | ←/→: Scroll | a: Add to My List | i: Info | s: Seed | o: Sign out | q: Quit"
    } else {
        "↑/↓: Row | ←/→: Scroll | a: Add to My List | i: Info | l: Sign in | q: Quit"
    }
}

/// First visible card index so that `selected` is on screen.
fn scroll_start(selected: usize, visible: usize) -> usize {
    (selected + 1).saturating_sub(visible.max(1))
}

/// A rectangle `percent_x` wide and `height` tall, centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// One [`Line`] per source line, keeping at most `max_lines`.
fn text_lines(text: &str, max_lines: usize) -> Vec<Line<'static>> {
    text.lines()
        .take(max_lines)
        .map(|line| Line::from(line.to_string()))
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn scroll_keeps_selection_visible() {
        assert_eq!(scroll_start(0, 4), 0);
        assert_eq!(scroll_start(3, 4), 0);
        assert_eq!(scroll_start(4, 4), 1);
        assert_eq!(scroll_start(9, 4), 6);
        assert_eq!(scroll_start(2, 0), 2);
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Amélie", 10), "Amélie");
        assert_eq!(truncate("The Grand Budapest Hotel", 12), "The Grand...");
    }

    #[test]
    fn notice_is_drawn_over_home() {
        let mut state = AppState::new(&ClientConfig::new("http://127.0.0.1:9")).unwrap();
        state.show_notice("Sign in to save to your list");

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render(f, &state)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(screen.contains("Sign in to save to your list"));
        assert!(screen.contains("Demo clone for educational purposes"));
    }

    #[test]
    fn hero_description_keeps_line_breaks() {
        let mut state = AppState::new(&ClientConfig::new("http://127.0.0.1:9")).unwrap();
        state.home.featured = vec![Movie {
            id: 1,
            title: "Night Shift".into(),
            description: "Opening line\nSecond line\nThird line".into(),
            thumbnail_url: String::new(),
            genre: "Drama".into(),
            featured: true,
        }];

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render(f, &state)).unwrap();

        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = buffer
            .content()
            .chunks(100)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect();
        let first = rows.iter().position(|r| r.contains("Opening line")).unwrap();
        assert!(!rows[first].contains("Second line"));
        assert!(rows[first + 1].contains("Second line"));
        assert!(!rows.iter().any(|r| r.contains("Third line")));
    }

    #[test]
    fn text_lines_splits_and_clamps() {
        let lines = text_lines("a\nb\nc", 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], Line::from("b"));
    }
}

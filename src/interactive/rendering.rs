//! TUI rendering with ratatui
//!
//! Board grid, on-screen keyboard and message log.

use super::app::{App, MessageStyle};
use crate::core::{MAX_ATTEMPTS, Verdict, WORD_LENGTH};
use crate::engine::Phase;
use crate::output::formatters::KEYBOARD_ROWS;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph},
};

/// Main UI rendering function
pub fn ui<W, S>(f: &mut Frame, app: &App<W, S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(14),   // Board and keyboard
            Constraint::Length(3), // Attempts gauge
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45), // Board
            Constraint::Percentage(55), // Keyboard and messages
        ])
        .split(chunks[1]);

    render_board(f, app, main_chunks[0]);
    render_side_panel(f, app, main_chunks[1]);
    render_attempts(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

/// Foreground and background of a tile
const fn tile_colors(verdict: Verdict) -> (Color, Color) {
    match verdict {
        Verdict::Correct => (Color::Black, Color::Green),
        Verdict::Present => (Color::Black, Color::Yellow),
        Verdict::Absent => (Color::White, Color::DarkGray),
        Verdict::Unknown => (Color::White, Color::Reset),
    }
}

fn tile(letter: char, verdict: Verdict) -> Span<'static> {
    let (fg, bg) = tile_colors(verdict);
    Span::styled(
        format!(" {} ", letter.to_ascii_uppercase()),
        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
    )
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🟩 WORDLE 🟨")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_board<W, S>(f: &mut Frame, app: &App<W, S>, area: Rect) {
    let ledger = app.game.ledger();
    let mut lines = Vec::with_capacity(MAX_ATTEMPTS * 2);

    for attempt in ledger.attempts() {
        let mut spans: Vec<Span> = attempt
            .cells()
            .flat_map(|cell| [tile(cell.letter, cell.verdict), Span::raw(" ")])
            .collect();
        spans.pop();
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    if let Some(draft) = ledger.draft() {
        let cursor = ledger.cursor().position;
        let spans: Vec<Span> = draft
            .iter()
            .enumerate()
            .flat_map(|(i, cell)| {
                let style = if i == cursor {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::UNDERLINED)
                } else {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                };
                let letter = cell.map_or('_', |c| c.to_ascii_uppercase());
                [Span::styled(format!(" {letter} "), style), Span::raw(" ")]
            })
            .collect();
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let used = lines.len() / 2;
    for _ in used..MAX_ATTEMPTS {
        let empty = " _  ".repeat(WORD_LENGTH);
        lines.push(Line::styled(empty, Style::default().fg(Color::DarkGray)));
        lines.push(Line::from(""));
    }

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Board ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_side_panel<W, S>(f: &mut Frame, app: &App<W, S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Keyboard
            Constraint::Min(3),    // Messages
        ])
        .split(area);

    render_keyboard(f, app, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn render_keyboard<W, S>(f: &mut Frame, app: &App<W, S>, area: Rect) {
    let map = app.game.availability();
    let mut lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .map(|letter| {
                    let mut key = tile(letter, map.get(letter));
                    if app.fresh_keys.get(letter).is_some() {
                        key.style = key.style.add_modifier(Modifier::REVERSED);
                    }
                    key
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        tile('g', Verdict::Correct),
        Span::raw(" right spot  "),
        tile('y', Verdict::Present),
        Span::raw(" elsewhere  "),
        tile('x', Verdict::Absent),
        Span::raw(" not in word"),
    ]));

    let keyboard = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Keyboard ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(keyboard, area);
}

fn render_messages<W, S>(f: &mut Frame, app: &App<W, S>, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_attempts<W, S>(f: &mut Frame, app: &App<W, S>, area: Rect) {
    let used = app.game.ledger().len();
    let percent = u16::try_from(used * 100 / MAX_ATTEMPTS).unwrap_or(100);
    let color = match app.game.phase() {
        Phase::Won => Color::Green,
        Phase::Lost => Color::Red,
        _ => Color::Cyan,
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Attempts ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(color))
        .percent(percent)
        .label(format!("{used}/{MAX_ATTEMPTS} used"));

    f.render_widget(gauge, area);
}

fn render_status<W, S>(f: &mut Frame, app: &App<W, S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(area);

    let phase_text = format!("Phase: {}", app.game.phase());
    let phase = Paragraph::new(phase_text).alignment(Alignment::Center);
    f.render_widget(phase, chunks[0]);

    let stats_text = format!(
        "Games: {} | Win Rate: {:.0}%",
        app.stats.total_games,
        app.stats.win_rate()
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[1]);

    let help_text = if app.game.phase() == Phase::Guessing {
        "Type letters | Enter: Submit | Backspace | Ctrl-N: New | Esc: Quit"
    } else {
        "Enter/n: New Game | q/Esc: Quit"
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use safari::{session::STARTING_LIVES, GameStatus};

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
const ENTRY_PROMPT: &str = "> ";

pub fn draw(app: &App, f: &mut Frame) {
    let area = f.area();
    f.render_widget(app, area);

    if app.state == AppState::WordEntry {
        let inner = entry_popup(area).inner;
        let avail = inner.width.saturating_sub(ENTRY_PROMPT.width() as u16 + 1) as usize;
        let shown = tail_to_width(&app.entry, avail);
        let x = inner.x + ENTRY_PROMPT.width() as u16 + shown.width() as u16;
        if inner.height > 3 && x < inner.right() {
            f.set_cursor_position((x, inner.y + 3));
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(3), // title + score
                Constraint::Min(3),    // board or panel
                Constraint::Length(1), // feedback
                Constraint::Length(1), // legend
            ])
            .split(area);

        render_header(self, chunks[0], buf);

        match self.game.status() {
            GameStatus::Playing | GameStatus::Success => render_board(self, chunks[1], buf),
            _ => render_panel(self, chunks[1], buf),
        }

        render_feedback(self, chunks[2], buf);

        Paragraph::new(Span::styled(
            legend(self),
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        match self.state {
            AppState::Board => {}
            AppState::Rules => render_rules(area, buf),
            AppState::WordEntry => render_entry(self, area, buf),
        }
    }
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let session = app.game.session();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let hearts: String = (0..STARTING_LIVES)
        .map(|i| if i < session.lives { '♥' } else { '♡' })
        .collect();

    let line = Line::from(vec![
        Span::raw(format!("List: {} ({} words)", app.preset, app.game.word_list().len())),
        Span::raw("   "),
        Span::styled(
            format!(
                "Score: {} ({}/{} · {}%)",
                app.game.points(),
                session.score_correct,
                session.score_total,
                app.game.score_percent()
            ),
            bold.fg(Color::Green),
        ),
        Span::raw("   "),
        Span::styled(format!("Lives: {hearts}"), bold.fg(Color::Red)),
    ]);

    Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Spelling Safari ")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow)),
        )
        .render(area, buf);
}

fn tiles(letters: &[char], style: Style) -> Line<'static> {
    let mut spans = Vec::with_capacity(letters.len() * 2);
    for (i, c) in letters.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!(" {c} "), style));
    }
    Line::from(spans)
}

fn render_board(app: &App, area: Rect, buf: &mut Buffer) {
    let round = app.game.round();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(3), // answer
            Constraint::Length(1),
            Constraint::Length(1), // pool
            Constraint::Fill(1),
        ])
        .split(area);

    let answer_style = if app.game.status() == GameStatus::Success {
        bold.fg(Color::Black).bg(Color::Green)
    } else {
        bold.fg(Color::Black).bg(Color::LightGreen)
    };

    let answer = if round.user_input.is_empty() {
        Line::from(Span::styled(
            "type the letters below",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        ))
    } else {
        tiles(&round.user_input, answer_style)
    };

    Paragraph::new(answer)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Answer "))
        .render(rows[1], buf);

    Paragraph::new(tiles(
        &round.jumbled_letters,
        bold.fg(Color::Black).bg(Color::Yellow),
    ))
    .alignment(Alignment::Center)
    .render(rows[3], buf);
}

fn render_panel(app: &App, area: Rect, buf: &mut Buffer) {
    let session = app.game.session();
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let headline = app.game.message().unwrap_or_default().to_string();

    let detail = match app.game.status() {
        GameStatus::GameOver => format!("Your final score is: {}", app.game.points()),
        GameStatus::AllWordsDone => format!(
            "Final score: {} ({} of {} guesses right, {}%)",
            app.game.points(),
            session.score_correct,
            session.score_total,
            app.game.score_percent()
        ),
        _ => "Enter your own words, or play with the default words.".to_string(),
    };

    let lines = vec![
        Line::from(Span::styled(headline, bold.fg(Color::Cyan))),
        Line::from(""),
        Line::from(detail),
    ];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(lines.len() as u16),
            Constraint::Fill(1),
        ])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(rows[1], buf);
}

fn render_feedback(app: &App, area: Rect, buf: &mut Buffer) {
    let status = app.game.status();
    let (text, color) = match (app.notice.as_deref(), status) {
        (Some(notice), _) => (notice, Color::Blue),
        (None, GameStatus::Success) => (app.game.message().unwrap_or_default(), Color::Green),
        (None, GameStatus::Playing) => (app.game.message().unwrap_or_default(), Color::Red),
        // panels already show the message
        _ => ("", Color::Reset),
    };

    Paragraph::new(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .render(area, buf);
}

fn legend(app: &App) -> &'static str {
    match (app.state, app.game.status()) {
        (AppState::WordEntry, _) => "(enter) save & play / (esc) cancel",
        (AppState::Rules, _) => "press any key to close",
        (_, GameStatus::Playing) => {
            "letters pick / (enter) submit / (bksp) clear / (tab) list / (/) words / (?) rules / (esc)ape"
        }
        (_, GameStatus::Success) => "next word coming up...",
        (_, GameStatus::AwaitingWordInput) => {
            "(w)ords / (d)efault words / (tab) list / (?) rules / (q)uit"
        }
        _ => "(r)estart / (w)ords / (tab) list / (?) rules / (q)uit",
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

struct Popup {
    outer: Rect,
    inner: Rect,
    block: Block<'static>,
}

fn popup(area: Rect, width: u16, height: u16, title: &'static str) -> Popup {
    let outer = centered(area, width, height);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));
    let inner = block.inner(outer);
    Popup {
        outer,
        inner,
        block,
    }
}

fn entry_popup(area: Rect) -> Popup {
    popup(area, 60, 9, " Enter Your Spelling Words ")
}

fn render_rules(area: Rect, buf: &mut Buffer) {
    let p = popup(area, 60, 10, " How to Play ");
    Clear.render(p.outer, buf);
    p.block.render(p.outer, buf);

    Paragraph::new(vec![
        Line::from("Unscramble the letters to spell the word!"),
        Line::from(""),
        Line::from("Type a letter to move it from the pool into your answer."),
        Line::from("Enter checks the answer, Backspace puts the letters back."),
        Line::from("A wrong answer costs one of your three lives."),
        Line::from("Solve every word in the list to win."),
    ])
    .wrap(Wrap { trim: true })
    .render(p.inner, buf);
}

/// The longest suffix of `text` that fits in `max` columns
fn tail_to_width(text: &str, max: usize) -> &str {
    let mut width = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        width += c.width().unwrap_or(0);
        if width > max {
            break;
        }
        start = idx;
    }
    &text[start..]
}

fn render_entry(app: &App, area: Rect, buf: &mut Buffer) {
    let p = entry_popup(area);
    Clear.render(p.outer, buf);
    p.block.render(p.outer, buf);

    let avail = p.inner.width.saturating_sub(ENTRY_PROMPT.width() as u16 + 1) as usize;
    let error_style = Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD);

    Paragraph::new(vec![
        Line::from("Separate words with a comma or a space."),
        Line::from(Span::styled(
            "e.g. CAT, DOG, ELEPHANT",
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw(ENTRY_PROMPT),
            Span::styled(
                tail_to_width(&app.entry, avail).to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            app.entry_error.clone().unwrap_or_default(),
            error_style,
        )),
    ])
    .render(p.inner, buf);
}

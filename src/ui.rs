use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
};
use typesprint::{
    config::ConfigStore,
    scoring::{CharMark, Outcome},
    HistoryLog, Status,
};
use unicode_width::UnicodeWidthStr;

use crate::{App, View};

const HORIZONTAL_MARGIN: u16 = 4;
const VERTICAL_MARGIN: u16 = 1;

const CORRECT_COLOR: Color = Color::Rgb(74, 222, 128);
const INCORRECT_COLOR: Color = Color::Rgb(248, 113, 113);

struct Palette {
    bg: Color,
    fg: Color,
    card: Color,
    primary: Color,
}

impl Palette {
    fn new(dark: bool) -> Self {
        if dark {
            Self {
                bg: Color::Rgb(30, 41, 59),
                fg: Color::Rgb(248, 250, 252),
                card: Color::Rgb(51, 65, 85),
                primary: Color::Rgb(59, 130, 246),
            }
        } else {
            Self {
                bg: Color::Rgb(248, 250, 252),
                fg: Color::Rgb(30, 41, 59),
                card: Color::Rgb(226, 232, 240),
                primary: Color::Rgb(37, 99, 235),
            }
        }
    }
}

impl<S: ConfigStore> Widget for &App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = Palette::new(self.dark_mode);
        let base = Style::default().bg(palette.bg).fg(palette.fg);
        buf.set_style(area, base);

        let bold_style = base.add_modifier(Modifier::BOLD);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(1), // padding
                Constraint::Length(4), // stat cards
                Constraint::Min(3),    // sentence or history
                Constraint::Length(3), // input
                Constraint::Length(1), // result banner
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "Typing Speed Test",
            bold_style.fg(palette.primary),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        render_stat_cards(self, &palette, chunks[2], buf);

        match self.view {
            View::Test => render_sentence(self, base, chunks[3], buf),
            View::History => render_history(self.session.history(), &palette, chunks[3], buf),
        }

        let input_style = match self.session.status() {
            Status::Running => base,
            _ => base.add_modifier(Modifier::DIM),
        };
        Paragraph::new(Span::styled(
            format!("{}▏", self.session.typed_text()),
            input_style,
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(input_style))
        .render(chunks[4], buf);

        let banner = match (self.session.status(), self.session.history().last()) {
            (Status::Finished, Some(result)) => result.summary(),
            _ => String::new(),
        };
        Paragraph::new(Span::styled(banner, bold_style))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        let legend = match self.session.status() {
            Status::Running => "(enter) finish / (^n) new sentence / (^r) reset / (esc) quit",
            _ => "(enter) start / (^t) duration / (^n) new sentence / (tab) history / (^d) theme / (esc) quit",
        };
        Paragraph::new(Span::styled(legend, base.add_modifier(Modifier::ITALIC)))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);
    }
}

fn render_stat_cards<S: ConfigStore>(app: &App<S>, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let session = &app.session;
    let stats = session.live_stats();
    let time = match session.status() {
        Status::Idle => app.duration.secs(),
        _ => session.remaining_secs(),
    };
    let values = [
        ("TIME REMAINING", time.to_string()),
        ("CURRENT WPM", stats.wpm.to_string()),
        ("ACCURACY", format!("{:.0}%", stats.accuracy_percent)),
    ];

    let card_style = Style::default().bg(palette.card).fg(palette.fg);
    for ((title, value), rect) in values.iter().zip(cards.iter()) {
        Paragraph::new(vec![
            Line::from(Span::styled(*title, card_style)),
            Line::from(Span::styled(
                value.clone(),
                card_style.add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).style(card_style))
        .render(*rect, buf);
    }
}

fn mark_style(mark: &CharMark, base: Style) -> Style {
    match mark.outcome {
        Some(Outcome::Correct) => base.fg(CORRECT_COLOR),
        Some(Outcome::Incorrect) => base.fg(INCORRECT_COLOR).add_modifier(Modifier::BOLD),
        None => base,
    }
}

fn render_sentence<S: ConfigStore>(app: &App<S>, base: Style, area: Rect, buf: &mut Buffer) {
    let Some(sentence) = app.session.sentence() else {
        Paragraph::new(Span::styled("Press Enter to begin!", base))
            .alignment(Alignment::Center)
            .render(area, buf);
        return;
    };

    let spans: Vec<Span> = app
        .session
        .live_stats()
        .diff
        .iter()
        .map(|mark| Span::styled(mark.char.to_string(), mark_style(mark, base)))
        .collect();

    let fits_on_one_line = sentence.as_str().width() <= area.width as usize;
    Paragraph::new(Line::from(spans))
        .alignment(if fits_on_one_line {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn render_history(history: &HistoryLog, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let base = Style::default().bg(palette.bg).fg(palette.fg);

    if history.is_empty() {
        Paragraph::new(Span::styled("No test history yet.", base))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("History"))
            .render(area, buf);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("WPM"),
        Cell::from("Accuracy"),
    ])
    .style(base.fg(palette.primary).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = history
        .all()
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.completed_at.format("%a %b %d %H:%M").to_string()),
                Cell::from(r.wpm.to_string()),
                Cell::from(format!("{:.0}%", r.accuracy_percent)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(18),
        Constraint::Length(6),
        Constraint::Length(10),
    ];

    Table::new(rows, widths)
        .header(header)
        .style(base)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Test History ({})", history.len())),
        )
        .column_spacing(2)
        .render(area, buf);
}

use aurafy_controls::notification::Notification;
use ratatui::{layout::Flex, prelude::*, widgets::*};
use tui_input::Input;

use crate::{
    app::{App, AppState},
    now_playing,
};

impl App {
    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(12),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        now_playing::render(frame, chunks[0], &mut self.now_playing);
        self.search.render(frame, chunks[1]);
        frame.render_widget(status_line(self.status_line.as_ref()), chunks[2]);

        if matches!(self.app_state, AppState::Help) {
            render_help(frame);
        }
    }
}

pub(crate) fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
    area
}

fn status_line(notification: Option<&Notification>) -> Line<'static> {
    match notification {
        Some(Notification::Error(message)) => {
            Line::from(message.clone()).style(Style::new().fg(Color::Red))
        }
        Some(Notification::Info(message)) => {
            Line::from(message.clone()).style(Style::new().fg(Color::Green))
        }
        None => Line::from("h: help  q: quit").style(Style::new().dim()),
    }
}

const HELP_ROWS: [[&str; 2]; 12] = [
    ["Play / pause", "space"],
    ["Next song", "n"],
    ["Previous song", "p"],
    ["Toggle repeat", "r"],
    ["Toggle shuffle", "s"],
    ["Refresh now", "u"],
    ["Edit search", "e or /"],
    ["Run search", "enter"],
    ["Stop editing", "esc"],
    ["Select result", "up/down"],
    ["Queue selected", "enter"],
    ["Exit", "q"],
];

fn render_help(frame: &mut Frame) {
    let max_left = HELP_ROWS.iter().map(|x| x[0].len()).max().unwrap_or(0);
    let max_right = HELP_ROWS.iter().map(|x| x[1].len()).max().unwrap_or(0);
    let max = max_left + max_right;

    let rows: Vec<_> = HELP_ROWS.into_iter().map(Row::new).collect();

    let area = center(
        frame.area(),
        Constraint::Length(max as u16 + 2 + 9),
        Constraint::Length(rows.len() as u16 + 2),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(max_left as u16),
            Constraint::Length(max_right as u16),
        ],
    )
    .block(block("Help", false));

    frame.render_widget(Clear, area);
    frame.render_widget(table, area);
}

pub(crate) fn render_input(
    input: &Input,
    editing: bool,
    area: Rect,
    frame: &mut Frame,
    title: &str,
) {
    let width = area.width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    let style = match editing {
        true => Color::Blue.into(),
        _ => Style::default(),
    };

    let input_paragraph = Paragraph::new(input.value())
        .style(style)
        .scroll((0, scroll as u16))
        .block(block(title, false));

    frame.render_widget(input_paragraph, area);

    if editing {
        let x = input.visual_cursor().max(scroll) - scroll + 1;
        frame.set_cursor_position((area.x + x as u16, area.y + 1))
    }
}

const ROW_HIGHLIGHT_STYLE: Style = Style::new().bg(Color::Blue);

pub(crate) fn block(title: &str, selectable: bool) -> Block<'_> {
    let title = match selectable {
        true => format!(" <{title}> "),
        false => format!(" {title} "),
    };

    Block::bordered()
        .title(title)
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
}

pub(crate) fn basic_list_table<'a>(rows: Vec<Row<'a>>, title: &'a str) -> Table<'a> {
    Table::new(rows, [Constraint::Min(1)])
        .block(block(title, true))
        .row_highlight_style(ROW_HIGHLIGHT_STYLE)
}

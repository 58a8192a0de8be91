use aurafy_client::models::SearchHit;
use aurafy_controls::Action;
use ratatui::{
    crossterm::event::{Event, KeyCode, KeyEventKind},
    prelude::*,
    widgets::*,
};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    app::{Output, UnfilteredListState},
    ui::{basic_list_table, render_input},
};

#[derive(Default)]
pub(crate) struct SearchState {
    pub(crate) editing: bool,
    pub(crate) query: Input,
    pub(crate) results: UnfilteredListState<SearchHit>,
}

impl SearchState {
    pub(crate) fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        render_input(&self.query, self.editing, chunks[0], frame, "Search");

        let table = basic_list_table(
            self.results
                .items
                .iter()
                .map(|hit| Row::new(Line::from(hit.to_string())))
                .collect(),
            "Results",
        );

        frame.render_stateful_widget(table, chunks[1], &mut self.results.state);
    }

    pub(crate) fn handle_events(&mut self, event: &Event) -> Output {
        let Event::Key(key_event) = event else {
            return Output::NotConsumed;
        };

        if key_event.kind != KeyEventKind::Press {
            return Output::NotConsumed;
        }

        match self.editing {
            false => match key_event.code {
                KeyCode::Char('e') | KeyCode::Char('/') => {
                    self.start_editing();
                    Output::Consumed
                }
                KeyCode::Down => {
                    self.results.state.select_next();
                    Output::Consumed
                }
                KeyCode::Up => {
                    self.results.state.select_previous();
                    Output::Consumed
                }
                KeyCode::Enter => match self.selected() {
                    Some(hit) => Output::Action(Action::Queue(hit.uri())),
                    None => Output::Consumed,
                },
                _ => Output::NotConsumed,
            },
            true => match key_event.code {
                KeyCode::Esc => {
                    self.stop_editing();
                    Output::Consumed
                }
                KeyCode::Enter => {
                    self.stop_editing();
                    let query = self.query.value().trim().to_string();
                    match query.is_empty() {
                        true => Output::Consumed,
                        false => Output::Action(Action::Search(query)),
                    }
                }
                _ => {
                    self.query.handle_event(event);
                    Output::Consumed
                }
            },
        }
    }

    pub(crate) fn set_results(&mut self, hits: Vec<SearchHit>) {
        let first = (!hits.is_empty()).then_some(0);
        self.results.items = hits;
        self.results.state.select(first);
    }

    fn selected(&self) -> Option<&SearchHit> {
        self.results
            .state
            .selected()
            .and_then(|index| self.results.items.get(index))
    }

    fn start_editing(&mut self) {
        self.editing = true;
    }

    fn stop_editing(&mut self) {
        self.editing = false;
    }
}

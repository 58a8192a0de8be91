use crate::{now_playing::NowPlayingState, search::SearchState};
use aurafy_client::models::PlaybackState;
use aurafy_controls::{
    Action, Controller, Outcome,
    notification::Notification,
};
use ratatui::{
    DefaultTerminal,
    crossterm::event::{self, Event, KeyCode, KeyEventKind},
    widgets::*,
};
use std::io;
use tokio::{
    sync::broadcast::Receiver,
    time::{self, Duration, MissedTickBehavior},
};

pub(crate) struct App {
    pub(crate) controller: Controller,
    pub(crate) notifications: Receiver<Notification>,
    pub(crate) poll_interval: Duration,
    pub(crate) exit: bool,
    pub(crate) should_draw: bool,
    pub(crate) app_state: AppState,
    pub(crate) status_line: Option<Notification>,
    pub(crate) now_playing: NowPlayingState,
    pub(crate) search: SearchState,
}

#[derive(Default, PartialEq)]
pub(crate) enum AppState {
    #[default]
    Normal,
    Help,
}

pub(crate) enum Output {
    Consumed,
    NotConsumed,
    Action(Action),
}

pub(crate) struct UnfilteredListState<T> {
    pub(crate) items: Vec<T>,
    pub(crate) state: TableState,
}

impl<T> Default for UnfilteredListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            state: TableState::default(),
        }
    }
}

impl App {
    pub(crate) fn new(controller: Controller, poll_interval: Duration) -> Self {
        let notifications = controller.notifications();

        Self {
            controller,
            notifications,
            poll_interval,
            exit: Default::default(),
            should_draw: true,
            app_state: Default::default(),
            status_line: Default::default(),
            now_playing: Default::default(),
            search: Default::default(),
        }
    }

    pub(crate) async fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        let mut tick_interval = time::interval(Duration::from_millis(10));
        let mut poll_interval = time::interval(self.poll_interval);
        poll_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !self.exit {
            tokio::select! {
                Ok(notification) = self.notifications.recv() => {
                    self.status_line = Some(notification);
                    self.should_draw = true;
                },
                _ = poll_interval.tick() => {
                    self.refresh().await;
                },
                _ = tick_interval.tick() => {
                    if event::poll(Duration::from_millis(0))? {
                        self.handle_events().await?;
                    }
                }
            }

            if self.should_draw {
                terminal.draw(|frame| self.render(frame))?;
                self.should_draw = false;
            }
        }

        Ok(())
    }

    async fn handle_events(&mut self) -> io::Result<()> {
        let event = event::read()?;

        match event {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                if self.app_state == AppState::Help {
                    self.app_state = AppState::Normal;
                    self.should_draw = true;
                    return Ok(());
                }

                match self.search.handle_events(&event) {
                    Output::Consumed => {
                        self.should_draw = true;
                        return Ok(());
                    }
                    Output::NotConsumed => {}
                    Output::Action(action) => {
                        self.perform(action).await;
                        return Ok(());
                    }
                }

                match key_event.code {
                    KeyCode::Char('h') => {
                        self.app_state = AppState::Help;
                        self.should_draw = true;
                    }
                    KeyCode::Char('q') => {
                        self.should_draw = true;
                        self.exit()
                    }
                    KeyCode::Char(' ') => {
                        let outcome = self.controller.toggle_playback().await;
                        self.show_outcome(outcome).await;
                    }
                    KeyCode::Char('n') => self.perform(Action::Next).await,
                    KeyCode::Char('p') => self.perform(Action::Previous).await,
                    KeyCode::Char('r') => self.perform(Action::Repeat).await,
                    KeyCode::Char('s') => self.perform(Action::Shuffle).await,
                    KeyCode::Char('u') => self.refresh().await,
                    _ => {}
                };
            }

            Event::Resize(_, _) => self.should_draw = true,
            _ => {}
        };
        Ok(())
    }

    async fn perform(&mut self, action: Action) {
        let outcome = self.controller.run(action).await;
        self.show_outcome(outcome).await;
    }

    async fn show_outcome(&mut self, outcome: Option<Outcome>) {
        match outcome {
            Some(Outcome::Playback(playback)) => self.show_playback(playback).await,
            Some(Outcome::Matches(hits)) => self.search.set_results(hits),
            None => {}
        }

        self.should_draw = true;
    }

    async fn refresh(&mut self) {
        if let Some(playback) = self.controller.refresh().await {
            self.show_playback(playback).await;
        }

        self.should_draw = true;
    }

    async fn show_playback(&mut self, playback: Option<PlaybackState>) {
        self.now_playing.update(playback).await;
    }

    fn exit(&mut self) {
        self.exit = true;
    }
}

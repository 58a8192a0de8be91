use std::{io, time::Duration};

use app::App;
use aurafy_controls::Controller;
use ratatui::{prelude::*, widgets::*};
use ui::center;

mod app;
mod now_playing;
mod search;
mod ui;

pub async fn init(controller: Controller, poll_interval: Duration) -> io::Result<()> {
    let mut terminal = ratatui::init();

    draw_loading_screen(&mut terminal);

    let mut app = App::new(controller, poll_interval);

    let result = app.run(&mut terminal).await;
    ratatui::restore();
    result
}

fn draw_loading_screen<B: Backend>(terminal: &mut Terminal<B>) {
    let ascii_art = r#"
                         __
  __ _ _   _ _ __ __ _  / _|_   _
 / _` | | | | '__/ _` || |_| | | |
| (_| | |_| | | | (_| ||  _| |_| |
 \__,_|\__,_|_|  \__,_||_|  \__, |
                            |___/
"#;

    let result = terminal.draw(|f| {
        let area = center(f.area(), Constraint::Length(36), Constraint::Length(7));
        let paragraph = Paragraph::new(ascii_art)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    });

    if let Err(err) = result {
        tracing::warn!("Unable to draw loading screen: {err}");
    }
}

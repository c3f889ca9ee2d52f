pub mod theme;
pub mod widgets;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::{AppMode, AppState};

const MIN_WIDTH: u16 = 30;
const MIN_HEIGHT: u16 = 8;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new("Terminal too small. Resize to at least 30x8.")
            .block(Block::default().borders(Borders::ALL).title("gym-occupancy"));
        frame.render_widget(warning, area);
        return;
    }

    let panel = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(state.theme.muted_text))
        .style(Style::default().bg(state.theme.background));
    let inner = panel.inner(area);
    frame.render_widget(panel, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    widgets::header::render(frame, rows[0], state);
    render_body(frame, rows[2], state);
    widgets::footer::render(frame, rows[3], state);
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    let message = match state.snapshot.as_ref() {
        Some(snapshot) if snapshot.has_chart() => {
            widgets::chart::render(frame, area, state);
            return;
        }
        Some(_) => "No capacity data available.",
        None if state.mode == AppMode::Loading => "Fetching occupancy...",
        None => "No capacity data available.",
    };
    let text = Paragraph::new(message).style(Style::default().fg(state.theme.muted_text));
    frame.render_widget(text, area);
}

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
};

use crate::{
    app::state::{AppMode, AppState},
    domain::occupancy::{StatusTier, StudioStatus},
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme;
    let chip = status_chip_text(state);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(chip.chars().count() as u16),
        ])
        .split(area);

    let updated = Paragraph::new(Span::styled(
        updated_label(state),
        Style::default().fg(theme.muted_text),
    ));
    frame.render_widget(updated, columns[0]);

    let status = state
        .snapshot
        .as_ref()
        .map_or(StudioStatus::Tier(StatusTier::NoData), |s| s.status);
    let chip = Paragraph::new(Span::styled(
        chip,
        Style::default()
            .fg(theme.chip_text)
            .bg(theme.tier(status.tier()))
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(chip, columns[1]);
}

fn updated_label(state: &AppState) -> String {
    match (state.mode, state.updated_at) {
        (_, Some(at)) => format!("Updated: {}", at.format("%H:%M")),
        (AppMode::Loading, None) => "Loading...".to_string(),
        _ => String::new(),
    }
}

fn status_chip_text(state: &AppState) -> String {
    let label = state
        .snapshot
        .as_ref()
        .map_or("No data", |s| s.status.label());
    format!(" {label} ")
}

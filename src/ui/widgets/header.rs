use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::AppState;

const BRAND_MARK: &str = "FITX";
const TITLE: &str = "Current Capacity";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme;
    let pct = state
        .snapshot
        .as_ref()
        .map_or_else(|| "–".to_string(), |s| s.percentage_label());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BRAND_MARK.len() as u16 + 2),
            Constraint::Min(10),
            Constraint::Length(pct.chars().count() as u16 + 1),
        ])
        .split(area);

    let brand = Paragraph::new(Span::styled(
        BRAND_MARK,
        Style::default()
            .fg(theme.brand)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(brand, columns[0]);

    let titles = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            state.studio_name(),
            Style::default().fg(theme.muted_text),
        )),
    ]);
    frame.render_widget(titles, columns[1]);

    let pct = Paragraph::new(Span::styled(
        pct,
        Style::default()
            .fg(theme.brand)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right);
    frame.render_widget(pct, columns[2]);
}

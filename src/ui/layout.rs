use crate::ui::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use super::components::post::PostDetail;
use super::views::View;

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    app.update_status();

    if let Some(View::Detail(detail)) = app.view_stack.current_view() {
        let (video_area, _) = PostDetail::split(chunks[0]);
        f.render_widget(&PostDetail::new(detail), chunks[0]);
        app.video_area = video_area;
    }

    let status_style = if app.has_notice() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    f.render_widget(
        Paragraph::new(app.status_line.clone()).style(status_style),
        chunks[1],
    );
}

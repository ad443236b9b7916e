use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::client::types::Author;

use super::types::PostComponent;

pub struct PostHeader {
    display_name: String,
    handle: String,
}

impl PostHeader {
    pub fn new(author: &Author) -> Self {
        Self {
            display_name: author.user_name.clone(),
            handle: Self::handle_for(&author.user_name),
        }
    }

    fn handle_for(user_name: &str) -> String {
        user_name
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    }

    fn build_header_spans(&self) -> Vec<Span<'static>> {
        vec![
            Span::styled(
                self.display_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ✔".to_string(), Style::default().fg(Color::Blue)),
            Span::styled(" · ".to_string(), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("@{}", self.handle), Style::default().fg(Color::Gray)),
        ]
    }
}

impl PostComponent for PostHeader {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let header_line = Line::from(self.build_header_spans());
        Paragraph::new(header_line).render(area, buf);
    }

    fn height(&self, _area: Rect) -> u16 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_is_compacted_lowercase_name() {
        assert_eq!(PostHeader::handle_for("Sandy Shores"), "sandyshores");
    }
}

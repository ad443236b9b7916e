use ratatui::{buffer::Buffer, layout::Rect, style::{Color, Modifier, Style}};

use super::types::PostComponent;

pub struct PostAvatar {
    url: String,
    initial: char,
}

impl PostAvatar {
    pub fn new(url: &str, user_name: &str) -> Self {
        let initial = user_name
            .chars()
            .find(|c| c.is_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?');
        Self {
            url: url.to_string(),
            initial,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PostComponent for PostAvatar {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height == 0 {
            return;
        }
        // Placeholder badge; the image itself is not drawn in the terminal.
        let style = if self.url.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        buf.set_string(area.x, area.y, format!("({})", self.initial), style);
    }

    fn height(&self, _area: Rect) -> u16 {
        1
    }
}

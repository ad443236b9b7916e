use ratatui::{buffer::Buffer, layout::Rect, widgets::{Paragraph, Widget, Wrap}};

use super::types::PostComponent;

pub struct PostContent {
    text: String,
}

impl PostContent {
    pub fn new(caption: &str) -> Self {
        let text = if caption.trim().is_empty() {
            "(No caption)".to_string()
        } else {
            caption.to_string()
        };
        Self { text }
    }

    fn calculate_height(&self, width: u16) -> u16 {
        let chars_per_line = (width as usize).max(1);
        textwrap::wrap(&self.text, chars_per_line).len() as u16
    }
}

impl PostComponent for PostContent {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.text.clone())
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn height(&self, area: Rect) -> u16 {
        self.calculate_height(area.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_grows_with_wrapping() {
        let content = PostContent::new("one two three four five six");
        assert_eq!(content.height(Rect::new(0, 0, 80, 10)), 1);
        assert!(content.height(Rect::new(0, 0, 8, 10)) >= 3);
    }
}

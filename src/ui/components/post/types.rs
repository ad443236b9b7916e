use ratatui::{buffer::Buffer, layout::Rect};

/// A vertical slice of the detail panel.
pub trait PostComponent {
    fn render(&self, area: Rect, buf: &mut Buffer);
    fn height(&self, area: Rect) -> u16;
}

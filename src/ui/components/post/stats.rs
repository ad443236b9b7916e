use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::ui::detail::LikeControl;

use super::types::PostComponent;

/// Like control and comment count. The like half is absent entirely for
/// anonymous viewers.
pub struct PostStats {
    like: Option<LikeControl>,
    comments: usize,
}

impl PostStats {
    pub fn new(like: Option<LikeControl>, comments: usize) -> Self {
        Self { like, comments }
    }

    fn get_stats(&self) -> Line<'static> {
        let mut spans = Vec::new();

        if let Some(like) = &self.like {
            spans.push(Span::styled(
                if like.liked_by_viewer { "❤️ " } else { "🤍 " },
                Style::default(),
            ));
            spans.push(Span::styled(
                format!("{}", like.count),
                Style::default().fg(Color::White),
            ));
            if like.pending {
                spans.push(Span::styled(" …", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
        }

        spans.push(Span::styled("💭 ", Style::default()));
        spans.push(Span::styled(
            format!("{}", self.comments),
            Style::default().fg(Color::White),
        ));

        Line::from(spans)
    }
}

impl PostComponent for PostStats {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.get_stats().render(area, buf);
    }

    fn height(&self, _area: Rect) -> u16 {
        1
    }
}

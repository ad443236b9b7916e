use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::client::types::Comment;

/// Read-only list of the comments that came with the post.
pub struct CommentPanel {
    comments: Vec<Comment>,
}

impl CommentPanel {
    pub fn new(comments: &[Comment]) -> Self {
        Self {
            comments: comments.to_vec(),
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        if self.comments.is_empty() {
            return vec![Line::from(Span::styled(
                "No comments yet",
                Style::default().fg(Color::DarkGray),
            ))];
        }
        self.comments
            .iter()
            .map(|comment| {
                let author = comment
                    .posted_by
                    .as_ref()
                    .and_then(|a| a.user_name.clone())
                    .unwrap_or_else(|| "someone".to_string());
                Line::from(vec![
                    Span::styled(author, Style::default().fg(Color::Cyan)),
                    Span::raw(": "),
                    Span::raw(comment.comment.clone()),
                ])
            })
            .collect()
    }
}

impl Widget for &CommentPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .title(format!(" Comments ({}) ", self.comments.len()));
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(self.lines())
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

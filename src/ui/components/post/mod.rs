use avatar::PostAvatar;
use content::PostContent;
use header::PostHeader;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};
use stats::PostStats;
use types::PostComponent;

use super::{comments::CommentPanel, player::VideoSurface};
use crate::ui::detail::DetailView;

pub mod avatar;
pub mod content;
pub mod header;
pub mod stats;
pub mod types;

/// One frame's worth of the detail view, built from its current state.
pub struct PostDetail {
    video: VideoSurface,
    avatar: PostAvatar,
    header: PostHeader,
    content: PostContent,
    stats: PostStats,
    comments: CommentPanel,
}

impl PostDetail {
    pub fn new(view: &DetailView) -> Self {
        let post = view.post();
        Self {
            video: VideoSurface::new(view),
            avatar: PostAvatar::new(&post.posted_by.image, &post.posted_by.user_name),
            header: PostHeader::new(&post.posted_by),
            content: PostContent::new(&post.caption),
            stats: PostStats::new(view.like_control(), post.comment_count()),
            comments: CommentPanel::new(&post.comments),
        }
    }

    /// Splits the screen into the video surface and the side panel.
    pub fn split(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (chunks[0], chunks[1])
    }
}

impl Widget for &PostDetail {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let (video_area, panel_area) = PostDetail::split(area);
        self.video.render(video_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));
        let inner_area = block.inner(panel_area);
        block.render(panel_area, buf);

        let mut current_y = inner_area.y;
        let max_y = inner_area.y + inner_area.height;
        if current_y >= max_y {
            return;
        }

        let header_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(4), Constraint::Min(10)])
            .split(Rect {
                x: inner_area.x,
                y: current_y,
                width: inner_area.width,
                height: 1,
            });
        self.avatar.render(header_row[0], buf);
        self.header.render(header_row[1], buf);
        current_y += 2;

        for component in [&self.content as &dyn PostComponent, &self.stats as &dyn PostComponent] {
            let remaining_height = max_y.saturating_sub(current_y);
            if remaining_height == 0 {
                return;
            }
            let height = component.height(inner_area).min(remaining_height);
            component.render(
                Rect {
                    x: inner_area.x,
                    y: current_y,
                    width: inner_area.width,
                    height,
                },
                buf,
            );
            current_y += height + 1;
        }

        let remaining_height = max_y.saturating_sub(current_y);
        if remaining_height > 0 {
            self.comments.render(
                Rect {
                    x: inner_area.x,
                    y: current_y,
                    width: inner_area.width,
                    height: remaining_height,
                },
                buf,
            );
        }
    }
}

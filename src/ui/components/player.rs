use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::detail::{DetailView, PlaybackState};

/// The video area: play affordance, mute indicator and dismiss hint.
pub struct VideoSurface {
    playback: PlaybackState,
    show_play: bool,
    fault: Option<String>,
    media_url: Option<String>,
}

impl VideoSurface {
    pub fn new(view: &DetailView) -> Self {
        Self {
            playback: view.playback(),
            show_play: view.play_affordance_visible(),
            fault: view.playback_fault().map(str::to_string),
            media_url: view.post().media_url().map(str::to_string),
        }
    }

    fn centre_line(&self) -> Line<'static> {
        if let Some(fault) = &self.fault {
            return Line::from(Span::styled(
                format!("⚠ {}", fault),
                Style::default().fg(Color::Red),
            ));
        }
        if self.show_play {
            Line::from(vec![
                Span::styled(
                    "▶ ",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Press space to play"),
            ])
        } else {
            Line::from(Span::styled(
                "Playing (space to pause)",
                Style::default().fg(Color::Green),
            ))
        }
    }

    fn mute_label(&self) -> &'static str {
        if self.playback.muted {
            "🔇 m: unmute"
        } else {
            "🔊 m: mute"
        }
    }
}

impl Widget for &VideoSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" ✕ Esc ")
            .title(Line::from(" Video ").alignment(Alignment::Right));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if let Some(url) = &self.media_url {
            buf.set_stringn(
                inner.x,
                inner.y,
                url,
                inner.width as usize,
                Style::default().fg(Color::DarkGray),
            );
        }

        let centre = Rect {
            x: inner.x,
            y: inner.y + inner.height / 2,
            width: inner.width,
            height: 1,
        };
        Paragraph::new(self.centre_line())
            .alignment(Alignment::Center)
            .render(centre, buf);

        if inner.height > 1 {
            let label = self.mute_label();
            let width = (label.chars().count() as u16 + 1).min(inner.width);
            let mute_area = Rect {
                x: inner.right().saturating_sub(width),
                y: inner.bottom() - 1,
                width,
                height: 1,
            };
            Paragraph::new(label).render(mute_area, buf);
        }
    }
}

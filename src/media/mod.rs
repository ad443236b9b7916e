//! Playback handles the detail view drives.

#[cfg(test)]
use mockall::automock;

#[cfg(unix)]
pub mod mpv;

#[cfg(unix)]
pub use mpv::MpvPlayer;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Video unavailable: {0}")]
    Unavailable(String),

    #[error("Player disconnected")]
    Disconnected,
}

/// Control surface of whatever is showing the video.
///
/// State only ever flows into the handle. Nothing here reports playback
/// state back.
#[cfg_attr(test, automock)]
pub trait MediaHandle {
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self) -> Result<(), MediaError>;
    fn set_muted(&mut self, muted: bool) -> Result<(), MediaError>;
    fn set_looping(&mut self, looping: bool) -> Result<(), MediaError>;
}

/// Stand-in used when no player could be attached.
#[derive(Debug, Clone)]
pub struct DetachedMedia {
    reason: String,
}

impl DetachedMedia {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable(&self) -> Result<(), MediaError> {
        Err(MediaError::Unavailable(self.reason.clone()))
    }
}

impl MediaHandle for DetachedMedia {
    fn play(&mut self) -> Result<(), MediaError> {
        self.unavailable()
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        self.unavailable()
    }

    fn set_muted(&mut self, _muted: bool) -> Result<(), MediaError> {
        self.unavailable()
    }

    fn set_looping(&mut self, _looping: bool) -> Result<(), MediaError> {
        self.unavailable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_media_rejects_every_command() {
        let mut media = DetachedMedia::new("no player");
        assert!(matches!(media.play(), Err(MediaError::Unavailable(r)) if r == "no player"));
        assert!(media.pause().is_err());
        assert!(media.set_muted(true).is_err());
        assert!(media.set_looping(true).is_err());
    }
}

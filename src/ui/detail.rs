// In src/ui/detail.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{error, info, warn};

use crate::client::api::{ApiError, PostApi};
use crate::client::types::{LikeRequest, LikeResponse, Post};
use crate::media::{MediaError, MediaHandle};
use crate::session::{Session, ViewerIdentity};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub playing: bool,
    pub muted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Dislike,
}

impl LikeAction {
    pub fn as_bool(self) -> bool {
        matches!(self, LikeAction::Like)
    }
}

/// Cleared when a view is torn down. In-flight work checks it before
/// delivering results.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn is_same_view(&self, other: &Liveness) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn end(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A like/dislike write that has been issued but not yet answered.
#[derive(Debug, Clone)]
pub struct LikeTicket {
    pub seq: u64,
    pub request: LikeRequest,
    pub liveness: Liveness,
}

/// What happened to a like/dislike response when it reached the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Applied,
    Stale,
    Failed,
    Discarded,
}

/// What the like control shows. Only exists for a signed-in viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeControl {
    pub count: usize,
    pub liked_by_viewer: bool,
    pub pending: bool,
}

/// State of one open video detail view.
pub struct DetailView {
    post: Post,
    playback: PlaybackState,
    media: Box<dyn MediaHandle>,
    playback_fault: Option<String>,
    session: Session,
    next_seq: u64,
    applied_seq: u64,
    in_flight: usize,
    notice: Option<String>,
    liveness: Liveness,
}

impl DetailView {
    pub fn new(post: Post, media: Box<dyn MediaHandle>, session: Session) -> Self {
        let mut view = Self {
            post,
            playback: PlaybackState::default(),
            media,
            playback_fault: None,
            session,
            next_seq: 0,
            applied_seq: 0,
            in_flight: 0,
            notice: None,
            liveness: Liveness::new(),
        };
        view.mount();
        view
    }

    fn mount(&mut self) {
        info!("Opening detail view for post {}", self.post.id);
        if self.post.media_url().is_none() {
            self.playback_fault = Some("post has no video".to_string());
            warn!("Post {} has no media reference", self.post.id);
            return;
        }
        let result = self.media.set_looping(true);
        self.record_media_result(result);
        self.apply_mute();
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub fn playback_fault(&self) -> Option<&str> {
        self.playback_fault.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    pub fn viewer(&self) -> Option<ViewerIdentity> {
        self.session.viewer()
    }

    pub fn play_affordance_visible(&self) -> bool {
        !self.playback.playing
    }

    /// Activation of the video surface or the play affordance.
    pub fn toggle_playback(&mut self) {
        if self.playback.playing {
            self.playback.playing = false;
            if self.playback_fault.is_none() {
                let result = self.media.pause();
                self.record_media_result(result);
            }
        } else {
            self.playback.playing = true;
            if self.playback_fault.is_none() {
                let result = self.media.play();
                self.record_media_result(result);
            }
        }
        info!("Playback is now {}", if self.playback.playing { "playing" } else { "paused" });
    }

    pub fn toggle_mute(&mut self) {
        self.playback.muted = !self.playback.muted;
        self.apply_mute();
    }

    // One-way: state is pushed to the handle and never read back.
    fn apply_mute(&mut self) {
        if self.playback_fault.is_some() {
            return;
        }
        let result = self.media.set_muted(self.playback.muted);
        self.record_media_result(result);
    }

    fn record_media_result(&mut self, result: Result<(), MediaError>) {
        if let Err(e) = result {
            error!("Playback failed for post {}: {}", self.post.id, e);
            self.playback_fault = Some(e.to_string());
        }
    }

    pub fn like_control(&self) -> Option<LikeControl> {
        let viewer = self.session.viewer()?;
        Some(LikeControl {
            count: self.post.like_count(),
            liked_by_viewer: self.post.is_liked_by(&viewer.id),
            pending: self.in_flight > 0,
        })
    }

    /// Issues a like or dislike. Returns `None` when nobody is signed in
    /// or the view has been torn down.
    pub fn begin_like(&mut self, action: LikeAction) -> Option<LikeTicket> {
        if !self.liveness.is_live() {
            return None;
        }
        let viewer = self.session.viewer()?;
        self.next_seq += 1;
        self.in_flight += 1;
        info!("Issuing {:?} #{} for post {}", action, self.next_seq, self.post.id);
        Some(LikeTicket {
            seq: self.next_seq,
            request: LikeRequest {
                user_id: viewer.id,
                post_id: self.post.id.clone(),
                like: action.as_bool(),
            },
            liveness: self.liveness.clone(),
        })
    }

    /// Likes when the viewer doesn't already like the post, dislikes otherwise.
    pub fn toggle_like(&mut self) -> Option<LikeTicket> {
        let liked = self.like_control()?.liked_by_viewer;
        self.begin_like(if liked {
            LikeAction::Dislike
        } else {
            LikeAction::Like
        })
    }

    /// Reconciles a like/dislike response. The server's like set replaces
    /// ours wholesale, but only if no later request has already landed.
    pub fn complete_like(
        &mut self,
        seq: u64,
        result: Result<LikeResponse, ApiError>,
    ) -> LikeOutcome {
        if !self.liveness.is_live() {
            warn!("Dropping like response #{} for a closed view", seq);
            return LikeOutcome::Discarded;
        }
        self.in_flight = self.in_flight.saturating_sub(1);

        if seq <= self.applied_seq {
            warn!(
                "Ignoring stale like response #{} (already applied #{})",
                seq, self.applied_seq
            );
            return LikeOutcome::Stale;
        }

        match result {
            Ok(response) => {
                self.applied_seq = seq;
                self.post.likes = response.likes;
                self.notice = None;
                info!(
                    "Post {} now has {} likes (#{})",
                    self.post.id,
                    self.post.like_count(),
                    seq
                );
                LikeOutcome::Applied
            }
            Err(e) => {
                error!("Like request #{} failed: {}", seq, e);
                self.notice = Some(format!("Couldn't update like: {}", e));
                LikeOutcome::Failed
            }
        }
    }

    /// Issues and awaits a single like/dislike round trip.
    pub async fn like_with(
        &mut self,
        api: &dyn PostApi,
        action: LikeAction,
    ) -> Option<LikeOutcome> {
        let ticket = self.begin_like(action)?;
        let result = api.update_like(&ticket.request).await;
        Some(self.complete_like(ticket.seq, result))
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Ends the view. Nothing may be applied to it afterwards.
    pub fn teardown(&mut self) {
        if !self.liveness.is_live() {
            return;
        }
        self.liveness.end();
        if self.playback.playing && self.playback_fault.is_none() {
            let _ = self.media.pause();
        }
        self.playback = PlaybackState::default();
        info!("Closed detail view for post {}", self.post.id);
    }
}

impl Drop for DetailView {
    fn drop(&mut self) {
        self.teardown();
    }
}

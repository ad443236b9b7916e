//! Viewer session context.
//!
//! The signed-in viewer is owned by a [`SessionProvider`], which lives
//! outside the detail view. Views only ever hold a [`Session`], a read-only
//! handle that observes whatever the provider currently publishes.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerIdentity {
    pub id: String,
    #[serde(default)]
    pub user_name: Option<String>,
}

impl ViewerIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_name: None,
        }
    }
}

/// Owner side of the session. Login and logout happen through this.
#[derive(Debug)]
pub struct SessionProvider {
    sender: watch::Sender<Option<ViewerIdentity>>,
}

impl SessionProvider {
    pub fn new(initial: Option<ViewerIdentity>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    pub fn session(&self) -> Session {
        Session {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn sign_in(&self, viewer: ViewerIdentity) {
        log::info!("Viewer {} signed in", viewer.id);
        self.sender.send_replace(Some(viewer));
    }

    pub fn sign_out(&self) {
        log::info!("Viewer signed out");
        self.sender.send_replace(None);
    }
}

/// Read-only view of the current viewer.
#[derive(Debug, Clone)]
pub struct Session {
    receiver: watch::Receiver<Option<ViewerIdentity>>,
}

impl Session {
    /// A session that never has a viewer.
    pub fn anonymous() -> Self {
        SessionProvider::new(None).session()
    }

    pub fn viewer(&self) -> Option<ViewerIdentity> {
        self.receiver.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.receiver.borrow().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_session_has_no_viewer() {
        let session = Session::anonymous();
        assert!(!session.is_signed_in());
        assert_eq!(session.viewer(), None);
    }

    #[test]
    fn test_session_observes_provider_changes() {
        let provider = SessionProvider::new(None);
        let session = provider.session();

        provider.sign_in(ViewerIdentity::new("u1"));
        assert_eq!(session.viewer().map(|v| v.id), Some("u1".to_string()));

        provider.sign_out();
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_session_outlives_provider_with_last_value() {
        let provider = SessionProvider::new(Some(ViewerIdentity::new("u9")));
        let session = provider.session();
        drop(provider);
        assert!(session.is_signed_in());
    }
}

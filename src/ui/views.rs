// In src/ui/views.rs
use log::info;

use super::detail::{DetailView, Liveness};

pub enum View {
    Detail(DetailView),
}

impl View {
    pub fn detail_mut(&mut self) -> &mut DetailView {
        match self {
            View::Detail(detail) => detail,
        }
    }

    pub fn post_id(&self) -> &str {
        match self {
            View::Detail(detail) => &detail.post().id,
        }
    }

    fn teardown(&mut self) {
        match self {
            View::Detail(detail) => detail.teardown(),
        }
    }
}

/// Navigation history. Going back discards the top view without saving it.
#[derive(Default)]
pub struct ViewStack {
    views: Vec<View>,
}

impl ViewStack {
    pub fn new() -> Self {
        Self { views: Vec::new() }
    }

    pub fn push_detail_view(&mut self, detail: DetailView) {
        info!("Pushing detail view for post {}", detail.post().id);
        self.views.push(View::Detail(detail));
    }

    pub fn current_view(&mut self) -> Option<&mut View> {
        self.views.last_mut()
    }

    /// The open view a liveness token belongs to, wherever it sits.
    pub fn find_detail(&mut self, liveness: &Liveness) -> Option<&mut DetailView> {
        self.views
            .iter_mut()
            .map(View::detail_mut)
            .find(|detail| detail.liveness().is_same_view(liveness))
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Goes back one view, tearing the dismissed one down.
    pub fn pop_view(&mut self) -> Option<View> {
        let mut view = self.views.pop()?;
        info!("Dismissing view for post {}", view.post_id());
        view.teardown();
        Some(view)
    }
}

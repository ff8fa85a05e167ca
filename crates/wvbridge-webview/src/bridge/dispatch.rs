use tracing::debug;

use crate::content::ContentRequest;
use crate::intent::NavigationIntent;
use crate::widget::WebWidget;

use super::WidgetBridge;

impl<W: WebWidget> WidgetBridge<W> {
    /// Apply one queued intent to the widget.
    pub(super) fn apply(&mut self, intent: NavigationIntent) {
        debug!(kind = intent.kind(), "applying navigation intent");
        match intent {
            NavigationIntent::Back => self.widget.go_back(),
            NavigationIntent::Forward => self.widget.go_forward(),
            NavigationIntent::Reload => self.widget.reload(),
            NavigationIntent::StopLoading => self.widget.stop_loading(),
            NavigationIntent::LoadUrl { url, headers } => self.widget.navigate_url(&url, &headers),
            NavigationIntent::LoadHtml(load) => self.widget.load_markup(&load),
            NavigationIntent::PostUrl { url, body } => self.widget.submit_post(&url, &body),
            NavigationIntent::Unknown => debug!("unknown navigation intent ignored"),
        }
    }

    /// Initial load for a freshly attached widget.
    pub(super) fn load_content(&mut self, content: &ContentRequest) {
        match content {
            ContentRequest::Url { url, headers } => {
                debug!(url = %url, "loading initial url");
                self.widget.navigate_url(url, headers);
            }
            ContentRequest::Data(load) => {
                debug!(bytes = load.html.len(), "loading initial markup");
                self.widget.load_markup(load);
            }
            ContentRequest::Post { url, body } => {
                debug!(url = %url, bytes = body.len(), "submitting initial post");
                self.widget.submit_post(url, body);
            }
            ContentRequest::NavigatorOnly => {
                debug!("navigator-only content, nothing to load");
            }
        }
    }
}

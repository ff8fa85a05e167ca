//! Content requests: what the widget should display when it is created.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wvbridge_common::BridgeError;

/// Additional HTTP headers sent with a URL load.
pub type Headers = HashMap<String, String>;

/// Inline markup plus the parameters the widget needs to interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupLoad {
    pub html: String,
    pub base_url: Option<String>,
    #[serde(default = "default_encoding")]
    pub encoding: String,
    pub mime_type: Option<String>,
    pub history_url: Option<String>,
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

impl MarkupLoad {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            base_url: None,
            encoding: default_encoding(),
            mime_type: None,
            history_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_history_url(mut self, history_url: impl Into<String>) -> Self {
        self.history_url = Some(history_url.into());
        self
    }
}

impl From<&str> for MarkupLoad {
    fn from(html: &str) -> Self {
        Self::new(html)
    }
}

impl From<String> for MarkupLoad {
    fn from(html: String) -> Self {
        Self::new(html)
    }
}

/// The initial (or replacement) request for a view state.
///
/// Assigning a new request to a view state does not navigate by itself;
/// it is only loaded when a widget is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContentRequest {
    Url { url: String, headers: Headers },
    Data(MarkupLoad),
    /// `body` compares by content.
    Post { url: String, body: Vec<u8> },
    /// No initial content; everything is driven through the navigator.
    NavigatorOnly,
}

impl ContentRequest {
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url {
            url: url.into(),
            headers: Headers::new(),
        }
    }

    pub fn url_with_headers(url: impl Into<String>, headers: Headers) -> Self {
        Self::Url {
            url: url.into(),
            headers,
        }
    }

    pub fn data(load: impl Into<MarkupLoad>) -> Self {
        Self::Data(load.into())
    }

    pub fn post(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::Post {
            url: url.into(),
            body: body.into(),
        }
    }

    /// The URL this request points at.
    ///
    /// `Data` yields its base URL, which may be absent. `NavigatorOnly`
    /// carries no URL at all and is rejected as an invalid state; prefer
    /// `ViewState::last_loaded_url` for the URL actually shown.
    pub fn current_url(&self) -> Result<Option<&str>, BridgeError> {
        match self {
            Self::Url { url, .. } => Ok(Some(url.as_str())),
            Self::Data(load) => Ok(load.base_url.as_deref()),
            Self::Post { url, .. } => Ok(Some(url.as_str())),
            Self::NavigatorOnly => Err(BridgeError::InvalidState(
                "navigator-only content has no url".into(),
            )),
        }
    }

    /// Point this request at `url`. A `Url` request keeps its headers;
    /// every other kind becomes a plain `Url` request.
    pub fn with_url(self, url: impl Into<String>) -> Self {
        match self {
            Self::Url { headers, .. } => Self::Url {
                url: url.into(),
                headers,
            },
            Self::Data(_) | Self::Post { .. } | Self::NavigatorOnly => Self::url(url),
        }
    }

    pub fn is_navigator_only(&self) -> bool {
        matches!(self, Self::NavigatorOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_equality_compares_body_bytes() {
        let a = ContentRequest::post("https://b.test", vec![1, 2, 3]);
        let b = ContentRequest::post("https://b.test", [1u8, 2, 3].to_vec());
        let c = ContentRequest::post("https://b.test", vec![1, 2, 4]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn current_url_per_variant() {
        assert_eq!(
            ContentRequest::url("https://a.test").current_url().unwrap(),
            Some("https://a.test")
        );
        assert_eq!(
            ContentRequest::post("https://b.test", vec![]).current_url().unwrap(),
            Some("https://b.test")
        );
        assert_eq!(
            ContentRequest::data("<p>hi</p>").current_url().unwrap(),
            None
        );
        assert_eq!(
            ContentRequest::data(MarkupLoad::new("<p>hi</p>").with_base_url("https://base.test"))
                .current_url()
                .unwrap(),
            Some("https://base.test")
        );
    }

    #[test]
    fn current_url_rejects_navigator_only() {
        let err = ContentRequest::NavigatorOnly.current_url().unwrap_err();
        assert!(matches!(err, BridgeError::InvalidState(_)));
    }

    #[test]
    fn with_url_keeps_headers_of_url_requests() {
        let mut headers = Headers::new();
        headers.insert("X-Token".into(), "abc".into());
        let req = ContentRequest::url_with_headers("https://a.test", headers.clone())
            .with_url("https://b.test");
        assert_eq!(req, ContentRequest::url_with_headers("https://b.test", headers));
    }

    #[test]
    fn with_url_replaces_other_variants() {
        let req = ContentRequest::post("https://a.test", vec![9]).with_url("https://b.test");
        assert_eq!(req, ContentRequest::url("https://b.test"));

        let req = ContentRequest::NavigatorOnly.with_url("https://c.test");
        assert_eq!(req, ContentRequest::url("https://c.test"));
    }

    #[test]
    fn markup_load_defaults_to_utf8() {
        let load = MarkupLoad::new("<h1>x</h1>");
        assert_eq!(load.encoding, "utf-8");
        assert!(load.base_url.is_none());
        assert!(load.mime_type.is_none());
        assert!(load.history_url.is_none());
    }
}

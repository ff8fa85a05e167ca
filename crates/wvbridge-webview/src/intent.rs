//! Navigation intents queued by the navigator.
//!
//! Intents are serializable so that they can also arrive from a script
//! channel as JSON, e.g. `{"type": "LoadUrl", "data": {"url": "..."}}`.

use serde::{Deserialize, Serialize};

use crate::content::{Headers, MarkupLoad};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum NavigationIntent {
    Back,
    Forward,
    Reload,
    StopLoading,
    LoadUrl {
        url: String,
        #[serde(default)]
        headers: Headers,
    },
    LoadHtml(MarkupLoad),
    /// `body` compares by content.
    PostUrl { url: String, body: Vec<u8> },
    /// Any tag this version does not know. Applying it does nothing.
    #[serde(other)]
    Unknown,
}

impl NavigationIntent {
    /// Parse an intent from a raw JSON string. Malformed input yields `None`;
    /// a well-formed but unrecognised tag yields `Unknown`.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Forward => "forward",
            Self::Reload => "reload",
            Self::StopLoading => "stop_loading",
            Self::LoadUrl { .. } => "load_url",
            Self::LoadHtml(_) => "load_html",
            Self::PostUrl { .. } => "post_url",
            Self::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unit_intent() {
        let intent = NavigationIntent::from_json(r#"{"type":"Back","data":null}"#).unwrap();
        assert_eq!(intent, NavigationIntent::Back);
    }

    #[test]
    fn parses_load_url_without_headers() {
        let intent =
            NavigationIntent::from_json(r#"{"type":"LoadUrl","data":{"url":"https://a.test"}}"#)
                .unwrap();
        assert_eq!(
            intent,
            NavigationIntent::LoadUrl {
                url: "https://a.test".into(),
                headers: Headers::new(),
            }
        );
    }

    #[test]
    fn unrecognised_tag_is_unknown() {
        let intent = NavigationIntent::from_json(r#"{"type":"OpenDevTools","data":null}"#).unwrap();
        assert_eq!(intent, NavigationIntent::Unknown);
    }

    #[test]
    fn malformed_json_is_none() {
        assert!(NavigationIntent::from_json("not json").is_none());
        assert!(NavigationIntent::from_json(r#"{"data":{}}"#).is_none());
    }

    #[test]
    fn post_equality_compares_body_bytes() {
        let a = NavigationIntent::PostUrl {
            url: "https://b.test".into(),
            body: vec![1, 2, 3],
        };
        let b = NavigationIntent::PostUrl {
            url: "https://b.test".into(),
            body: vec![1, 2, 3],
        };
        assert_eq!(a, b);
    }

    #[test]
    fn kind_names() {
        assert_eq!(NavigationIntent::StopLoading.kind(), "stop_loading");
        assert_eq!(
            NavigationIntent::LoadHtml(MarkupLoad::new("<p/>")).kind(),
            "load_html"
        );
    }
}

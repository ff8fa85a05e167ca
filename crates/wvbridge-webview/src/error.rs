//! Errors reported by the widget while loading content.
//!
//! These are observational data appended to the view state, never
//! propagated as `Err` values.

use serde::{Deserialize, Serialize};

use crate::content::Headers;

/// The request a load error originated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRequest {
    pub url: String,
    pub method: String,
    /// True for the top-level document, false for sub-resources.
    pub is_main_frame: bool,
    pub headers: Headers,
}

impl ResourceRequest {
    /// A `GET` for the top-level document.
    pub fn main_frame(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            is_main_frame: true,
            headers: Headers::new(),
        }
    }

    /// A `GET` for an image, script, frame or other sub-resource.
    pub fn sub_resource(url: impl Into<String>) -> Self {
        Self {
            is_main_frame: false,
            ..Self::main_frame(url)
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }
}

/// What went wrong, as described by the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceError {
    /// Widget-specific error code. Negative codes are network failures,
    /// positive codes HTTP statuses.
    pub code: i32,
    pub description: String,
}

impl ResourceError {
    pub fn new(code: i32, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}

/// One error captured during the current load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebError {
    /// `None` when the error is not tied to a specific request.
    pub request: Option<ResourceRequest>,
    pub error: ResourceError,
}

impl WebError {
    pub fn is_main_frame(&self) -> bool {
        self.request.as_ref().is_some_and(|r| r.is_main_frame)
    }
}

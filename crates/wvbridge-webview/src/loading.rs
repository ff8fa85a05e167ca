//! Main-frame loading state.

use serde::{Deserialize, Serialize};

/// Loading state of the widget's main frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum LoadingState {
    /// The widget has not loaded anything yet.
    #[default]
    Initializing,
    /// Between load-start and load-finish. `progress` is in `[0, 1]`.
    Loading { progress: f32 },
    /// The last load finished.
    Finished,
}

impl LoadingState {
    /// A `Loading` state with `progress` clamped into `[0, 1]`.
    pub fn loading(progress: f32) -> Self {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        Self::Loading { progress }
    }

    /// True until the first load finishes, and again while any later load runs.
    pub fn is_loading(&self) -> bool {
        !matches!(self, Self::Finished)
    }

    pub fn progress(&self) -> Option<f32> {
        match self {
            Self::Loading { progress } => Some(*progress),
            Self::Initializing | Self::Finished => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_initializing() {
        assert_eq!(LoadingState::default(), LoadingState::Initializing);
    }

    #[test]
    fn initializing_counts_as_loading() {
        assert!(LoadingState::Initializing.is_loading());
        assert!(LoadingState::loading(0.4).is_loading());
        assert!(!LoadingState::Finished.is_loading());
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(LoadingState::loading(1.7).progress(), Some(1.0));
        assert_eq!(LoadingState::loading(-0.2).progress(), Some(0.0));
        assert_eq!(LoadingState::loading(f32::NAN).progress(), Some(0.0));
        assert_eq!(LoadingState::loading(0.25).progress(), Some(0.25));
    }

    #[test]
    fn progress_is_none_outside_loading() {
        assert_eq!(LoadingState::Initializing.progress(), None);
        assert_eq!(LoadingState::Finished.progress(), None);
    }
}

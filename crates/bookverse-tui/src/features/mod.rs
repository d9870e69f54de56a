//! Feature slices for the TUI (state/update/render per slice).

pub mod admin;
pub mod showcase;

use crate::effects::UiEffect;
use crate::overlays::OverlayRequest;

/// Outcome of a view key press: effects to run and/or an overlay to open.
#[derive(Debug, Default)]
pub struct KeyOutcome {
    pub effects: Vec<UiEffect>,
    pub open: Option<OverlayRequest>,
}

impl KeyOutcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn open(request: OverlayRequest) -> Self {
        Self {
            effects: Vec::new(),
            open: Some(request),
        }
    }

    pub fn effects(effects: Vec<UiEffect>) -> Self {
        Self {
            effects,
            open: None,
        }
    }
}

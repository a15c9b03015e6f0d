//! Cost tier classification, service badge markup and loading-state toggling.

pub mod badge;
pub mod cli;
pub mod error;
pub mod formatting;
pub mod loading;
pub mod logging;
pub mod progress;

pub use badge::{render_service_badge, service_slug};
pub use error::ThresholdError;
pub use formatting::{CostThresholds, CostTier, classify_cost};
pub use loading::{
    Overlay, RefreshControl, ViewTree, hide_loading, set_loading_visible, show_loading,
};

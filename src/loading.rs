//! Loading overlay and refresh control toggling.
//!
//! The overlay and the refresh control are owned by whoever renders the
//! view. Callers hand both in as explicit handles; `ViewTree` covers the
//! case where they have to be found by their fixed identifiers first.
//! Either way the pair is always written together: overlay shown, control
//! disabled and dimmed, or overlay hidden, control enabled at full opacity.

use maud::{Markup, html};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

pub const LOADING_OVERLAY_ID: &str = "loading";
pub const REFRESH_CONTROL_CLASS: &str = "refresh-btn";
pub const DIMMED_OPACITY: f32 = 0.6;
pub const FULL_OPACITY: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Hidden,
    Flex,
}

impl Display {
    #[must_use]
    pub const fn css_value(self) -> &'static str {
        match self {
            Self::Hidden => "none",
            Self::Flex => "flex",
        }
    }
}

pub trait Overlay {
    fn set_display(&mut self, display: Display);
}

pub trait RefreshControl {
    fn set_disabled(&mut self, disabled: bool);
    fn set_opacity(&mut self, opacity: f32);
}

/// Shows or hides the loading state. Does nothing when either handle is
/// missing.
pub fn set_loading_visible<O, C>(overlay: Option<&mut O>, control: Option<&mut C>, visible: bool)
where
    O: Overlay + ?Sized,
    C: RefreshControl + ?Sized,
{
    let (Some(overlay), Some(control)) = (overlay, control) else {
        debug!(visible, "loading overlay or refresh control missing; skipping toggle");
        return;
    };

    if visible {
        overlay.set_display(Display::Flex);
        control.set_disabled(true);
        control.set_opacity(DIMMED_OPACITY);
    } else {
        overlay.set_display(Display::Hidden);
        control.set_disabled(false);
        control.set_opacity(FULL_OPACITY);
    }
    trace!(visible, "loading state applied");
}

pub fn show_loading<O, C>(overlay: Option<&mut O>, control: Option<&mut C>)
where
    O: Overlay + ?Sized,
    C: RefreshControl + ?Sized,
{
    set_loading_visible(overlay, control, true);
}

pub fn hide_loading<O, C>(overlay: Option<&mut O>, control: Option<&mut C>)
where
    O: Overlay + ?Sized,
    C: RefreshControl + ?Sized,
{
    set_loading_visible(overlay, control, false);
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlayElement {
    pub display: Display,
}

impl OverlayElement {
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self.display, Display::Flex)
    }

    #[must_use]
    pub fn render(&self, id: &str) -> Markup {
        html! {
            div id=(id) class="loading-overlay" style=(format!("display: {}", self.display.css_value())) {
                div class="spinner" {}
            }
        }
    }
}

impl Overlay for OverlayElement {
    fn set_display(&mut self, display: Display) {
        self.display = display;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshButton {
    pub disabled: bool,
    pub opacity: f32,
}

impl Default for RefreshButton {
    fn default() -> Self {
        Self {
            disabled: false,
            opacity: FULL_OPACITY,
        }
    }
}

impl RefreshButton {
    #[must_use]
    pub fn render(&self, class: &str) -> Markup {
        html! {
            button class=(class) disabled[self.disabled] style=(format!("opacity: {}", self.opacity)) {
                "Refresh"
            }
        }
    }
}

impl RefreshControl for RefreshButton {
    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }
}

/// Elements owned by the surrounding view, addressable by identifier.
#[derive(Debug, Clone, Default)]
pub struct ViewTree {
    overlays: FxHashMap<String, OverlayElement>,
    controls: FxHashMap<String, RefreshButton>,
}

impl ViewTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree holding the overlay and refresh control under their fixed
    /// identifiers, both in the idle state.
    #[must_use]
    pub fn with_loading_elements() -> Self {
        let mut tree = Self::new();
        tree.insert_overlay(LOADING_OVERLAY_ID, OverlayElement::default());
        tree.insert_control(REFRESH_CONTROL_CLASS, RefreshButton::default());
        tree
    }

    pub fn insert_overlay(&mut self, id: impl Into<String>, element: OverlayElement) {
        self.overlays.insert(id.into(), element);
    }

    pub fn insert_control(&mut self, class: impl Into<String>, element: RefreshButton) {
        self.controls.insert(class.into(), element);
    }

    pub fn remove_overlay(&mut self, id: &str) -> Option<OverlayElement> {
        self.overlays.remove(id)
    }

    pub fn remove_control(&mut self, class: &str) -> Option<RefreshButton> {
        self.controls.remove(class)
    }

    #[must_use]
    pub fn overlay(&self, id: &str) -> Option<&OverlayElement> {
        self.overlays.get(id)
    }

    #[must_use]
    pub fn control(&self, class: &str) -> Option<&RefreshButton> {
        self.controls.get(class)
    }

    /// Looks both elements up again on every call, then toggles them.
    pub fn set_loading_visible(&mut self, visible: bool) {
        set_loading_visible(
            self.overlays.get_mut(LOADING_OVERLAY_ID),
            self.controls.get_mut(REFRESH_CONTROL_CLASS),
            visible,
        );
    }

    pub fn show_loading(&mut self) {
        self.set_loading_visible(true);
    }

    #[must_use]
    pub fn render_loading_elements(&self) -> Markup {
        html! {
            @if let Some(overlay) = self.overlay(LOADING_OVERLAY_ID) {
                (overlay.render(LOADING_OVERLAY_ID))
            }
            @if let Some(control) = self.control(REFRESH_CONTROL_CLASS) {
                (control.render(REFRESH_CONTROL_CLASS))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_pair() -> (OverlayElement, RefreshButton) {
        (OverlayElement::default(), RefreshButton::default())
    }

    #[test]
    fn test_show_sets_paired_state() {
        let (mut overlay, mut button) = idle_pair();
        set_loading_visible(Some(&mut overlay), Some(&mut button), true);
        assert_eq!(overlay.display, Display::Flex);
        assert!(button.disabled);
        assert!((button.opacity - DIMMED_OPACITY).abs() < f32::EPSILON);
    }

    #[test]
    fn test_hide_restores_idle_state() {
        let (mut overlay, mut button) = idle_pair();
        set_loading_visible(Some(&mut overlay), Some(&mut button), true);
        set_loading_visible(Some(&mut overlay), Some(&mut button), false);
        assert_eq!(overlay, OverlayElement::default());
        assert_eq!(button, RefreshButton::default());
    }

    #[test]
    fn test_show_loading_matches_visible_true() {
        let (mut a_overlay, mut a_button) = idle_pair();
        let (mut b_overlay, mut b_button) = idle_pair();
        show_loading(Some(&mut a_overlay), Some(&mut a_button));
        set_loading_visible(Some(&mut b_overlay), Some(&mut b_button), true);
        assert_eq!(a_overlay, b_overlay);
        assert_eq!(a_button, b_button);
    }

    #[test]
    fn test_missing_control_is_noop() {
        let mut overlay = OverlayElement::default();
        show_loading(Some(&mut overlay), None::<&mut RefreshButton>);
        assert_eq!(overlay, OverlayElement::default());
    }

    #[test]
    fn test_missing_overlay_is_noop() {
        let mut button = RefreshButton::default();
        show_loading(None::<&mut OverlayElement>, Some(&mut button));
        assert_eq!(button, RefreshButton::default());
    }

    #[test]
    fn test_show_is_idempotent() {
        let (mut once_overlay, mut once_button) = idle_pair();
        show_loading(Some(&mut once_overlay), Some(&mut once_button));

        let (mut twice_overlay, mut twice_button) = idle_pair();
        show_loading(Some(&mut twice_overlay), Some(&mut twice_button));
        show_loading(Some(&mut twice_overlay), Some(&mut twice_button));

        assert_eq!(once_overlay, twice_overlay);
        assert_eq!(once_button, twice_button);
    }

    #[test]
    fn test_last_call_wins() {
        let (mut overlay, mut button) = idle_pair();
        for visible in [true, false, true, true, false] {
            set_loading_visible(Some(&mut overlay), Some(&mut button), visible);
        }
        assert!(!overlay.is_visible());
        assert!(!button.disabled);
    }

    #[test]
    fn test_trait_objects_accepted() {
        let (mut overlay, mut button) = idle_pair();
        {
            let overlay: &mut dyn Overlay = &mut overlay;
            let control: &mut dyn RefreshControl = &mut button;
            show_loading(Some(overlay), Some(control));
        }
        assert!(overlay.is_visible());
        assert!(button.disabled);
    }

    #[test]
    fn test_view_tree_toggles_by_identifier() {
        let mut tree = ViewTree::with_loading_elements();
        tree.show_loading();
        assert!(tree.overlay(LOADING_OVERLAY_ID).unwrap().is_visible());
        assert!(tree.control(REFRESH_CONTROL_CLASS).unwrap().disabled);

        tree.set_loading_visible(false);
        assert!(!tree.overlay(LOADING_OVERLAY_ID).unwrap().is_visible());
        assert!(!tree.control(REFRESH_CONTROL_CLASS).unwrap().disabled);
    }

    #[test]
    fn test_view_tree_missing_element_leaves_other_untouched() {
        let mut tree = ViewTree::with_loading_elements();
        tree.remove_control(REFRESH_CONTROL_CLASS);
        tree.show_loading();
        assert_eq!(
            tree.overlay(LOADING_OVERLAY_ID),
            Some(&OverlayElement::default())
        );
    }

    #[test]
    fn test_view_tree_ignores_other_identifiers() {
        let mut tree = ViewTree::new();
        tree.insert_overlay("spinner", OverlayElement::default());
        tree.insert_control(REFRESH_CONTROL_CLASS, RefreshButton::default());
        tree.show_loading();
        assert!(!tree.overlay("spinner").unwrap().is_visible());
        assert!(!tree.control(REFRESH_CONTROL_CLASS).unwrap().disabled);
    }

    #[test]
    fn test_render_visible_elements() {
        let mut tree = ViewTree::with_loading_elements();
        tree.show_loading();
        let markup = tree.render_loading_elements().into_string();
        assert!(markup.contains(r#"id="loading""#));
        assert!(markup.contains("display: flex"));
        assert!(markup.contains("disabled"));
        assert!(markup.contains("opacity: 0.6"));
    }

    #[test]
    fn test_render_hidden_elements() {
        let tree = ViewTree::with_loading_elements();
        let markup = tree.render_loading_elements().into_string();
        assert!(markup.contains("display: none"));
        assert!(!markup.contains("disabled"));
        assert!(markup.contains("opacity: 1\""));
    }
}

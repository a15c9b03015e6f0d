//! Inline markup badges labelling a service.
//!
//! The visible text keeps the caller's casing; the styling class carries a
//! lowercased, whitespace-free slug of the same label. Both go through maud,
//! so markup-significant characters in a label are escaped.

use maud::{Markup, html};

pub const BADGE_CLASS: &str = "service-badge";
pub const SERVICE_CLASS_PREFIX: &str = "service-";

/// Lowercased label with whitespace runs collapsed to `-`.
#[must_use]
pub fn service_slug(service: &str) -> String {
    service
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[must_use]
pub fn service_class(service: &str) -> String {
    format!("{SERVICE_CLASS_PREFIX}{}", service_slug(service))
}

#[must_use]
pub fn render_service_badge(service: &str) -> Markup {
    let class = format!("{BADGE_CLASS} {}", service_class(service));
    html! {
        span class=(class) { (service) }
    }
}

#[must_use]
pub fn render_service_badges<'a>(services: impl IntoIterator<Item = &'a str>) -> Markup {
    html! {
        @for (index, service) in services.into_iter().enumerate() {
            @if index > 0 { " " }
            (render_service_badge(service))
        }
    }
}

use crate::loading::{Display, Overlay};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_TICKS_BRAILLE_COLORED: [&str; 8] = [
    "\x1b[1;96m⠁\x1b[0m",
    "\x1b[1;96m⠂\x1b[0m",
    "\x1b[1;96m⠄\x1b[0m",
    "\x1b[1;96m⡀\x1b[0m",
    "\x1b[1;96m⢀\x1b[0m",
    "\x1b[1;96m⠠\x1b[0m",
    "\x1b[1;96m⠐\x1b[0m",
    "\x1b[1;96m⠈\x1b[0m",
];

const SPINNER_TICKS_BRAILLE_PLAIN: [&str; 8] = ["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈"];
const SPINNER_TICKS_ASCII: &str = "|/-\\";
const SPINNER_TEMPLATE: &str = "{spinner} {msg}";
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Terminal stand-in for the loading overlay: `Flex` spins, `Hidden` clears.
pub struct SpinnerOverlay {
    bar: Option<ProgressBar>,
    style: ProgressStyle,
    target: fn() -> ProgressDrawTarget,
    message: String,
}

impl SpinnerOverlay {
    pub fn new(message: impl Into<String>, use_color: bool) -> Self {
        Self::with_target(message, use_color, || ProgressDrawTarget::stderr_with_hz(15))
    }

    pub fn hidden(message: impl Into<String>) -> Self {
        Self::with_target(message, false, ProgressDrawTarget::hidden)
    }

    fn with_target(
        message: impl Into<String>,
        use_color: bool,
        target: fn() -> ProgressDrawTarget,
    ) -> Self {
        let style = ProgressStyle::with_template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let style = if is_dumb_term() {
            style.tick_chars(SPINNER_TICKS_ASCII)
        } else if use_color {
            style.tick_strings(&SPINNER_TICKS_BRAILLE_COLORED)
        } else {
            style.tick_strings(&SPINNER_TICKS_BRAILLE_PLAIN)
        };
        let message = message.into();
        let message = if use_color {
            message.bright_white().bold().to_string()
        } else {
            message
        };
        Self {
            bar: None,
            style,
            target,
            message,
        }
    }

    #[must_use]
    pub const fn is_spinning(&self) -> bool {
        self.bar.is_some()
    }

    fn start(&mut self) {
        if self.bar.is_some() {
            return;
        }
        let bar = ProgressBar::with_draw_target(None, (self.target)());
        bar.set_style(self.style.clone());
        bar.set_message(self.message.clone());
        bar.enable_steady_tick(TICK_INTERVAL);
        self.bar = Some(bar);
    }

    fn stop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Overlay for SpinnerOverlay {
    fn set_display(&mut self, display: Display) {
        match display {
            Display::Flex => self.start(),
            Display::Hidden => self.stop(),
        }
    }
}

impl Drop for SpinnerOverlay {
    fn drop(&mut self) {
        self.stop();
    }
}

fn is_dumb_term() -> bool {
    std::env::var("TERM").is_ok_and(|term| term.eq_ignore_ascii_case("dumb"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::{RefreshButton, set_loading_visible};

    #[test]
    fn test_spinner_follows_loading_state() {
        let mut spinner = SpinnerOverlay::hidden("Refreshing costs");
        let mut button = RefreshButton::default();

        set_loading_visible(Some(&mut spinner), Some(&mut button), true);
        assert!(spinner.is_spinning());
        assert!(button.disabled);

        set_loading_visible(Some(&mut spinner), Some(&mut button), false);
        assert!(!spinner.is_spinning());
        assert!(!button.disabled);
    }

    #[test]
    fn test_spinner_show_twice_keeps_single_bar() {
        let mut spinner = SpinnerOverlay::hidden("Refreshing costs");
        spinner.set_display(Display::Flex);
        spinner.set_display(Display::Flex);
        assert!(spinner.is_spinning());
        spinner.set_display(Display::Hidden);
        spinner.set_display(Display::Hidden);
        assert!(!spinner.is_spinning());
    }
}

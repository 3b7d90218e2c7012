//! Panic handling while the TUI owns the terminal.
//!
//! A panic unwinding past `TerminalSession` would leave raw mode and the
//! alternate screen behind before the default hook prints anything, so the
//! message ends up on a screen that is about to be discarded. The hook
//! restores the terminal first, logs the panic, then defers to the previous
//! hook.

use std::panic::{self, PanicHookInfo};

/// Longest payload written to the log.
const MAX_PAYLOAD_CHARS: usize = 512;

pub fn install() {
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        crate::restore_terminal();
        tracing::error!(
            location = %panic_location(info),
            payload = %payload_summary(info.payload()),
            "Panic"
        );
        previous_hook(info);
    }));
}

fn panic_location(info: &PanicHookInfo<'_>) -> String {
    info.location()
        .map_or_else(|| "unknown".to_string(), |loc| format!("{}:{}", loc.file(), loc.line()))
}

fn payload_summary(payload: &(dyn std::any::Any + Send)) -> String {
    let message = if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        return "non-string panic payload".to_string();
    };

    let one_line = message.replace(['\n', '\r'], " ");
    if one_line.chars().count() > MAX_PAYLOAD_CHARS {
        let truncated: String = one_line.chars().take(MAX_PAYLOAD_CHARS).collect();
        format!("{truncated}...")
    } else {
        one_line
    }
}

//! Runtime configuration for spec-bdd.
//!
//! The module exposes the default for each suite's `verbose` flag. The
//! `SPEC_BDD_VERBOSE` environment variable supplies it; an in-process
//! override set through [`set_verbose_default`] takes precedence.

use std::sync::atomic::{AtomicU8, Ordering};

/// Environment variable holding the default verbose setting.
pub const VERBOSE_ENV: &str = "SPEC_BDD_VERBOSE";

const OVERRIDE_UNSET: u8 = 0;
const OVERRIDE_FALSE: u8 = 1;
const OVERRIDE_TRUE: u8 = 2;

static VERBOSE_OVERRIDE: AtomicU8 = AtomicU8::new(OVERRIDE_UNSET);

fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "Yes" | "on" | "ON" | "On" => Some(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "No" | "off" | "OFF" | "Off" => {
            Some(false)
        }
        _ => None,
    }
}

fn env_verbose() -> Option<bool> {
    std::env::var(VERBOSE_ENV)
        .ok()
        .as_deref()
        .and_then(parse_env_bool)
}

fn override_state() -> Option<bool> {
    match VERBOSE_OVERRIDE.load(Ordering::Relaxed) {
        OVERRIDE_FALSE => Some(false),
        OVERRIDE_TRUE => Some(true),
        _ => None,
    }
}

/// Determine whether newly created suites echo log messages immediately.
#[must_use]
pub fn verbose_default() -> bool {
    override_state().or_else(env_verbose).unwrap_or(false)
}

/// Override the verbose default for the current process.
///
/// Call [`clear_verbose_override`] to return to environment driven
/// behaviour.
pub fn set_verbose_default(enabled: bool) {
    let value = if enabled {
        OVERRIDE_TRUE
    } else {
        OVERRIDE_FALSE
    };
    VERBOSE_OVERRIDE.store(value, Ordering::Relaxed);
}

/// Remove any in-process override of the verbose default.
pub fn clear_verbose_override() {
    VERBOSE_OVERRIDE.store(OVERRIDE_UNSET, Ordering::Relaxed);
}

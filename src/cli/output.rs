//! Console rendering for shell messages, view notifications and category badges.

use colored::Colorize;
use std::fmt;
use std::sync::RwLock;

use crate::config::Config;
use crate::notify::{Notification, NotificationLevel, Notifier};
use crate::views::BadgeVariant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

impl MessageKind {
    fn label(self) -> &'static str {
        match self {
            MessageKind::Success => "SUCCESS",
            MessageKind::Warning => "WARNING",
            MessageKind::Error => "ERROR",
            MessageKind::Info | MessageKind::Section => "INFO",
        }
    }

    fn icon(self) -> Option<&'static str> {
        match self {
            MessageKind::Info => Some("[i]"),
            MessageKind::Success => Some("[✓]"),
            MessageKind::Warning => Some("[!]"),
            MessageKind::Error => Some("[x]"),
            MessageKind::Section => None,
        }
    }
}

impl From<NotificationLevel> for MessageKind {
    fn from(level: NotificationLevel) -> Self {
        match level {
            NotificationLevel::Success => MessageKind::Success,
            NotificationLevel::Error => MessageKind::Error,
        }
    }
}

/// Rendering switches persisted in [`Config`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputPreferences {
    pub plain_mode: bool,
    pub screen_reader_mode: bool,
}

impl OutputPreferences {
    const INITIAL: Self = Self {
        plain_mode: false,
        screen_reader_mode: false,
    };

    /// No ANSI colors and ASCII-only rules.
    pub fn is_plain(&self) -> bool {
        self.plain_mode || self.screen_reader_mode
    }
}

impl From<&Config> for OutputPreferences {
    fn from(config: &Config) -> Self {
        Self {
            plain_mode: config.plain_mode,
            screen_reader_mode: config.screen_reader_mode,
        }
    }
}

static PREFERENCES: RwLock<OutputPreferences> = RwLock::new(OutputPreferences::INITIAL);

pub fn set_preferences(prefs: OutputPreferences) {
    if let Ok(mut guard) = PREFERENCES.write() {
        *guard = prefs;
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES.read().map(|guard| *guard).unwrap_or_default()
}

pub(crate) fn apply_style(
    kind: MessageKind,
    message: impl fmt::Display,
    prefs: &OutputPreferences,
) -> String {
    let text = message.to_string();
    let line = match (kind, kind.icon()) {
        (MessageKind::Section, _) => format!("=== {} ===", text.trim()),
        (_, Some(icon)) if !prefs.screen_reader_mode => format!("{}: {icon} {text}", kind.label()),
        _ => format!("{}: {text}", kind.label()),
    };
    if prefs.is_plain() {
        return line;
    }
    match kind {
        MessageKind::Success => line.bright_green().to_string(),
        MessageKind::Warning => line.bright_yellow().to_string(),
        MessageKind::Error => line.bright_red().to_string(),
        MessageKind::Section => line.bold().to_string(),
        MessageKind::Info => line,
    }
}

/// Colors a card badge label by its variant.
pub fn paint_badge(label: &str, variant: BadgeVariant, prefs: &OutputPreferences) -> String {
    if prefs.is_plain() {
        return label.to_string();
    }
    match variant {
        BadgeVariant::Success => label.green().to_string(),
        BadgeVariant::Error => label.red().to_string(),
        BadgeVariant::Info => label.blue().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message, &current_preferences());
    if kind == MessageKind::Section {
        println!();
    }
    println!("{formatted}");
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Prints view notifications as styled console lines.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        print(notification.level.into(), notification.message);
    }
}

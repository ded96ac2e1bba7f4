//! Toast notifications
//!
//! `NotificationService` is provided once by `App`; any component pushes
//! messages through it and `NotificationHost` renders the stack. Each toast
//! dismisses itself after its `life_ms`.

use crate::shared::icons::icon;
use leptos::prelude::*;
use uuid::Uuid;

pub const DEFAULT_LIFE_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn css_modifier(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "check",
            Severity::Info | Severity::Warning => "alert",
            Severity::Error => "x",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub life_ms: u32,
}

impl Notification {
    pub fn new(severity: Severity, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            severity,
            summary: summary.into(),
            detail: detail.into(),
            life_ms: DEFAULT_LIFE_MS,
        }
    }

    pub fn with_life(mut self, life_ms: u32) -> Self {
        self.life_ms = life_ms;
        self
    }

    pub fn css_class(&self) -> String {
        format!("toast toast--{}", self.severity.css_modifier())
    }
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    items: RwSignal<Vec<Notification>>,
    default_life_ms: RwSignal<u32>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            default_life_ms: RwSignal::new(DEFAULT_LIFE_MS),
        }
    }

    /// Lifetime used by the `success`/`info`/`warning`/`error` shortcuts
    pub fn set_default_life(&self, life_ms: u32) {
        self.default_life_ms.set(life_ms);
    }

    pub fn push(&self, notification: Notification) {
        let id = notification.id;
        let life_ms = notification.life_ms;
        self.items.update(|items| items.push(notification));

        if life_ms > 0 {
            let service = *self;
            gloo_timers::callback::Timeout::new(life_ms, move || service.dismiss(id)).forget();
        }
    }

    fn push_with_default_life(&self, severity: Severity, summary: &str, detail: &str) {
        let life_ms = self.default_life_ms.get_untracked();
        self.push(Notification::new(severity, summary, detail).with_life(life_ms));
    }

    pub fn success(&self, summary: &str, detail: &str) {
        self.push_with_default_life(Severity::Success, summary, detail);
    }

    pub fn info(&self, summary: &str, detail: &str) {
        self.push_with_default_life(Severity::Info, summary, detail);
    }

    pub fn warning(&self, summary: &str, detail: &str) {
        log::warn!("{}: {}", summary, detail);
        self.push_with_default_life(Severity::Warning, summary, detail);
    }

    pub fn error(&self, summary: &str, detail: &str) {
        log::error!("{}: {}", summary, detail);
        self.push_with_default_life(Severity::Error, summary, detail);
    }

    pub fn dismiss(&self, id: Uuid) {
        self.items.update(|items| items.retain(|n| n.id != id));
    }

    pub fn items(&self) -> Vec<Notification> {
        self.items.get()
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService context not found")
}

#[component]
pub fn NotificationHost() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || service.items()
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.css_class()>
                            <span class="toast__icon">{icon(n.severity.icon())}</span>
                            <div class="toast__body">
                                <div class="toast__summary">{n.summary.clone()}</div>
                                {(!n.detail.is_empty())
                                    .then(|| view! { <div class="toast__detail">{n.detail.clone()}</div> })}
                            </div>
                            <button
                                class="toast__close"
                                title="Close"
                                on:click=move |_| service.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_defaults() {
        let n = Notification::new(Severity::Error, "Search failed", "HTTP 502");
        assert_eq!(n.summary, "Search failed");
        assert_eq!(n.detail, "HTTP 502");
        assert_eq!(n.life_ms, DEFAULT_LIFE_MS);
        assert_eq!(n.css_class(), "toast toast--error");
    }

    #[test]
    fn test_notification_ids_are_unique() {
        let a = Notification::new(Severity::Info, "a", "");
        let b = Notification::new(Severity::Info, "a", "");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_with_life() {
        let n = Notification::new(Severity::Warning, "Partial import", "2 skipped").with_life(8000);
        assert_eq!(n.life_ms, 8000);
        assert_eq!(n.severity.css_modifier(), "warning");
    }
}

//! Transient notifications shown over the page.
//!
//! [`ToastProvider`] owns a [`ToastQueue`] signal and renders it. Anything below
//! it pushes with [`toast`] or [`toast_error`] and forgets about it: each toast
//! removes itself after the configured duration, or when clicked.

use dioxus::prelude::*;

const TOAST_CSS: Asset = asset!("/assets/styling/toast.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    entries: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Toast {
            id,
            level,
            message: message.into(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|toast| toast.id != id);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[Toast] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ToastDuration(u32);

pub fn use_toasts() -> Signal<ToastQueue> {
    use_context::<Signal<ToastQueue>>()
}

pub fn toast(toasts: &mut Signal<ToastQueue>, level: ToastLevel, message: &str) {
    tracing::debug!(?level, "toast: {}", message);
    toasts.write().push(level, message);
}

pub fn toast_error(toasts: &mut Signal<ToastQueue>, message: &str) {
    toast(toasts, ToastLevel::Error, message);
}

/// Provides the toast queue to `children` and renders it on top.
#[component]
pub fn ToastProvider(
    /// Auto-dismiss delay; 0 keeps toasts until clicked.
    #[props(default = 4000)]
    duration_ms: u32,
    children: Element,
) -> Element {
    let toasts = use_signal(ToastQueue::default);
    use_context_provider(|| toasts);
    use_context_provider(|| ToastDuration(duration_ms));

    rsx! {
        {children}
        Toaster {}
    }
}

#[component]
fn Toaster() -> Element {
    let toasts = use_toasts();
    let entries = toasts.read().entries().to_vec();

    rsx! {
        document::Link { rel: "stylesheet", href: TOAST_CSS }
        div {
            class: "toaster",
            "aria-live": "polite",
            for entry in entries {
                ToastItem { key: "{entry.id}", toast: entry }
            }
        }
    }
}

#[component]
fn ToastItem(toast: Toast) -> Element {
    let mut toasts = use_toasts();
    let ToastDuration(duration_ms) = use_context::<ToastDuration>();
    let id = toast.id;

    use_hook(move || {
        if duration_ms > 0 {
            spawn(async move {
                sleep_ms(duration_ms).await;
                toasts.write().dismiss(id);
            });
        }
    });

    rsx! {
        div {
            class: toast_class(toast.level),
            role: if toast.level == ToastLevel::Error { "alert" } else { "status" },
            onclick: move |_| {
                toasts.write().dismiss(id);
            },
            "{toast.message}"
        }
    }
}

fn toast_class(level: ToastLevel) -> &'static str {
    match level {
        ToastLevel::Info => "toast toast-info",
        ToastLevel::Success => "toast toast-success",
        ToastLevel::Error => "toast toast-error",
    }
}

async fn sleep_ms(ms: u32) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(ms).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(ms.into())).await;
}

use super::queue::{ToastKind, ToastQueue};
use crate::util::{delay_until, now_ms, set_timeout};
use leptos::prelude::*;

/// Reactive front of a [`ToastQueue`]; shared through context.
#[derive(Clone, Copy)]
pub(crate) struct Notifier {
    pub queue: RwSignal<ToastQueue>,
    ttl_ms: i64,
}

impl Notifier {
    pub fn new(ttl_ms: i64) -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
            ttl_ms,
        }
    }

    pub fn show(&self, message: &str, icon: Option<&str>, kind: ToastKind) -> u64 {
        let now = now_ms();
        let ttl = self.ttl_ms;
        let mut id = 0;
        self.queue.update(|q| {
            id = q.push(message, icon, kind, now, ttl);
        });
        tracing::debug!(id, message, "toast");

        let queue = self.queue;
        set_timeout(delay_until(now + ttl, now), move || {
            let now = now_ms();
            // The toaster may be gone by now.
            let _ = queue.try_update(|q| q.expire(now));
        });
        id
    }

    pub fn blank(&self, message: &str, icon: &str) -> u64 {
        self.show(message, Some(icon), ToastKind::Blank)
    }

    pub fn success(&self, message: &str) -> u64 {
        self.show(message, Some("✅"), ToastKind::Success)
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| {
            q.dismiss(id);
        });
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Blank,
    Success,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub id: u64,
    pub message: String,
    pub icon: Option<String>,
    pub kind: ToastKind,
    pub expires_ms: i64,
}

/// Transient notifications, oldest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
    max_visible: usize,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(3)
    }
}

impl ToastQueue {
    pub fn new(max_visible: usize) -> Self {
        Self {
            next_id: 1,
            items: Vec::new(),
            max_visible: max_visible.max(1),
        }
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn push(
        &mut self,
        message: impl Into<String>,
        icon: Option<&str>,
        kind: ToastKind,
        now_ms: i64,
        ttl_ms: i64,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            message: message.into(),
            icon: icon.map(str::to_string),
            kind,
            expires_ms: now_ms + ttl_ms,
        });
        if self.items.len() > self.max_visible {
            let overflow = self.items.len() - self.max_visible;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    /// Removes expired toasts; returns whether anything changed.
    pub fn expire(&mut self, now_ms: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.expires_ms > now_ms);
        self.items.len() != before
    }

    #[cfg(test)]
    pub fn next_deadline(&self) -> Option<i64> {
        self.items.iter().map(|t| t.expires_ms).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire_in_order() {
        let mut q = ToastQueue::default();
        q.push("No notes found", Some("🔍"), ToastKind::Blank, 0, 2000);
        q.push("Note created", None, ToastKind::Success, 500, 2000);
        assert_eq!(q.next_deadline(), Some(2000));

        assert!(q.expire(2000));
        assert_eq!(q.items().len(), 1);
        assert_eq!(q.items()[0].message, "Note created");
        assert!(!q.expire(2001));
    }

    #[test]
    fn test_queue_keeps_newest_when_full() {
        let mut q = ToastQueue::new(2);
        for i in 0..4 {
            q.push(format!("t{i}"), None, ToastKind::Blank, 0, 1000);
        }
        let msgs: Vec<_> = q.items().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(msgs, vec!["t2", "t3"]);
    }

    #[test]
    fn test_dismiss_by_id() {
        let mut q = ToastQueue::default();
        let id = q.push("x", None, ToastKind::Success, 0, 1000);
        assert!(q.dismiss(id));
        assert!(!q.dismiss(id));
        assert_eq!(q.next_deadline(), None);
    }
}

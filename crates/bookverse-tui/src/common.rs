//! Shared UI plumbing: async task bookkeeping, toasts, text helpers.

/// Identifier for a spawned request task.
///
/// Results arriving with an id that is no longer active are discarded.
/// This is the liveness check that makes late responses harmless no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

/// Monotonic task id generator.
#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Lifecycle state for one request slot (mutated only by the reducer).
#[derive(Debug, Default)]
pub struct TaskState {
    active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, id: TaskId) {
        self.active = Some(id);
    }

    /// Clears the slot if `id` is the active task. Returns whether it was;
    /// callers drop the result otherwise.
    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }
}

/// One slot per request kind; a newer request supersedes the older one.
#[derive(Debug, Default)]
pub struct Tasks {
    pub books: TaskState,
    pub categories: TaskState,
    pub auth: TaskState,
    pub save: TaskState,
    pub delete: TaskState,
}

impl Tasks {
    /// Returns true if any backend request is in flight (drives the spinner).
    pub fn any_running(&self) -> bool {
        self.books.is_running()
            || self.categories.is_running()
            || self.auth.is_running()
            || self.save.is_running()
            || self.delete.is_running()
    }
}

/// Severity of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

/// Transient status-line notification, expired by ticks.
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    pub ticks_left: u16,
}

/// Tick budget for a toast (ticks arrive roughly every 100ms).
const TOAST_TICKS: u16 = 40;

impl Toast {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: ToastLevel::Info,
            ticks_left: TOAST_TICKS,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: ToastLevel::Error,
            ticks_left: TOAST_TICKS,
        }
    }
}

/// Truncates a string to `max_width` columns, appending an ellipsis.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if max_width == 0 {
        return String::new();
    }

    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += ch_width;
        out.push(ch);
    }
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: stale task ids are rejected by the liveness check.
    #[test]
    fn test_finish_if_active_rejects_stale() {
        let mut seq = TaskSeq::default();
        let mut slot = TaskState::default();

        let first = seq.next_id();
        slot.on_started(first);
        let second = seq.next_id();
        slot.on_started(second);

        assert!(!slot.finish_if_active(first));
        assert!(slot.is_running());
        assert!(slot.finish_if_active(second));
        assert!(!slot.is_running());
    }

    /// Test: truncation keeps short strings intact.
    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("a longer title", 8), "a longe…");
        assert_eq!(truncate_with_ellipsis("anything", 0), "");
    }
}

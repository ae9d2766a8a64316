use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

pub const DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

/// Message area holding at most one notice.
///
/// Every notice schedules its own removal. A timer whose notice has since
/// been replaced finds nothing of its own to remove and leaves the slot alone.
pub struct Notifier {
    slot: Arc<Mutex<Option<Notice>>>,
    issued: Arc<AtomicU64>,
    dismiss_after: Duration,
}

fn lock(slot: &Mutex<Option<Notice>>) -> MutexGuard<'_, Option<Notice>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Notifier {
    pub fn new(dismiss_after: Duration) -> Self {
        Notifier {
            slot: Arc::new(Mutex::new(None)),
            issued: Arc::new(AtomicU64::new(0)),
            dismiss_after,
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.notify(text, NoticeKind::Success);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.notify(text, NoticeKind::Error);
    }

    /// Replaces the visible notice. Must be called inside a tokio runtime.
    pub fn notify(&self, text: impl Into<String>, kind: NoticeKind) {
        let id = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let notice = Notice { id, kind, text: text.into() };
        match kind {
            NoticeKind::Success => debug!("notice: {}", notice.text),
            NoticeKind::Error => debug!("error notice: {}", notice.text),
        }
        *lock(&self.slot) = Some(notice);

        let slot = Arc::clone(&self.slot);
        let delay = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut current = lock(&slot);
            if current.as_ref().map(|n| n.id) == Some(id) {
                *current = None;
            }
        });
    }

    pub fn current(&self) -> Option<Notice> {
        lock(&self.slot).clone()
    }

    /// Number of notices shown so far.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub fn issued_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.issued)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Notifier::new(DISMISS_AFTER)
    }
}

/// The busy indicator. A loader built with [`Loader::detached`] has no
/// element behind it and ignores every toggle.
#[derive(Debug, Clone)]
pub struct Loader {
    indicator: Option<Arc<AtomicBool>>,
}

impl Loader {
    pub fn new() -> Self {
        Loader {
            indicator: Some(Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn detached() -> Self {
        Loader { indicator: None }
    }

    pub fn set_busy(&self, active: bool) {
        if let Some(indicator) = &self.indicator {
            indicator.store(active, Ordering::SeqCst);
        }
    }

    pub fn is_busy(&self) -> bool {
        self.indicator
            .as_ref()
            .map(|indicator| indicator.load(Ordering::SeqCst))
            .unwrap_or(false)
    }

    /// Shows the indicator until the returned guard is dropped.
    pub fn busy(&self) -> Busy {
        self.set_busy(true);
        Busy { loader: self.clone() }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Loader::new()
    }
}

#[must_use = "the indicator is hidden again as soon as the guard is dropped"]
pub struct Busy {
    loader: Loader,
}

impl Drop for Busy {
    fn drop(&mut self) {
        self.loader.set_busy(false);
    }
}

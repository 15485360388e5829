//! Toast and modal notifications.
//!
//! Both are presentation primitives over the [`Document`]. The toast hides
//! itself after a delay using a [`Timers`] implementation; the modal stays
//! open until the shopper closes it.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use crate::config::{Messages, Selectors};
use crate::document::Document;

/// Work scheduled to run after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimerTask {
    /// Hide the toast, if it is still showing the message of `generation`.
    HideToast { generation: u64 },
}

/// Deferred execution of [`TimerTask`]s.
///
/// In a browser this is `setTimeout`; the storefront is told when a task is
/// due via `Storefront::fire_timer`.
pub trait Timers {
    fn schedule(&mut self, delay: Duration, task: TimerTask);
}

/// Timers driven by a virtual clock.
///
/// Nothing fires until [`ManualTimers::advance`] moves the clock past a
/// task's due time.
#[derive(Debug, Clone, Default)]
pub struct ManualTimers {
    now: Duration,
    seq: u64,
    pending: BinaryHeap<Reverse<(Duration, u64, TimerTask)>>,
}

impl ManualTimers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks not yet fired.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward and return the tasks that came due, earliest
    /// first (ties in scheduling order).
    pub fn advance(&mut self, by: Duration) -> Vec<TimerTask> {
        self.now = self.now.saturating_add(by);
        let mut due = Vec::new();
        while let Some(Reverse((at, _, task))) = self.pending.peek().copied() {
            if at > self.now {
                break;
            }
            self.pending.pop();
            due.push(task);
        }
        due
    }
}

impl Timers for ManualTimers {
    fn schedule(&mut self, delay: Duration, task: TimerTask) {
        let at = self.now.saturating_add(delay);
        self.seq += 1;
        self.pending.push(Reverse((at, self.seq, task)));
    }
}

/// Transient, auto-dismissing status message.
///
/// Showing a new message while one is visible replaces it and restarts the
/// countdown: only the timer belonging to the latest message can hide it.
#[derive(Debug, Clone, Default)]
pub struct Toast {
    generation: u64,
}

impl Toast {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` and schedule it to hide after `duration`.
    ///
    /// Without a toast element nothing is shown or scheduled.
    pub fn show(
        &mut self,
        doc: &mut impl Document,
        timers: &mut impl Timers,
        selectors: &Selectors,
        message: &str,
        duration: Duration,
    ) {
        if !doc.contains(&selectors.toast) {
            return;
        }
        doc.set_text(&selectors.toast, message);
        doc.set_hidden(&selectors.toast, false);
        self.generation += 1;
        timers.schedule(
            duration,
            TimerTask::HideToast {
                generation: self.generation,
            },
        );
    }

    /// Hide the toast if `generation` is still the current message.
    ///
    /// Returns whether the toast was hidden.
    pub fn expire(&self, doc: &mut impl Document, selectors: &Selectors, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        doc.set_hidden(&selectors.toast, true) && doc.set_text(&selectors.toast, "")
    }
}

/// Modal visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// Add-to-cart confirmation dialog.
///
/// There is a single modal; opening it again while open just replaces the
/// sentence it shows.
#[derive(Debug, Clone, Default)]
pub struct Modal {
    state: ModalState,
}

impl Modal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> ModalState {
        self.state
    }

    /// Open the modal with the confirmation sentence for `product_title`.
    ///
    /// Requires both the modal and its overlay; otherwise nothing happens.
    pub fn open(
        &mut self,
        doc: &mut impl Document,
        selectors: &Selectors,
        messages: &Messages,
        product_title: &str,
    ) {
        if !doc.contains(&selectors.modal) || !doc.contains(&selectors.modal_overlay) {
            return;
        }
        doc.set_text(
            &selectors.modal_description,
            &messages.modal_added_for(product_title),
        );
        for selector in [&selectors.modal_overlay, &selectors.modal] {
            doc.set_hidden(selector, false);
            doc.set_class(selector, "visible", true);
        }
        doc.focus(&selectors.modal);
        self.state = ModalState::Open;
    }

    /// Close the modal.
    pub fn close(&mut self, doc: &mut impl Document, selectors: &Selectors) {
        if !doc.contains(&selectors.modal) || !doc.contains(&selectors.modal_overlay) {
            return;
        }
        for selector in [&selectors.modal_overlay, &selectors.modal] {
            doc.set_hidden(selector, true);
            doc.set_class(selector, "visible", false);
        }
        self.state = ModalState::Closed;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::document::HeadlessDocument;

    const MS: Duration = Duration::from_millis(1);

    fn doc() -> HeadlessDocument {
        HeadlessDocument::layout(&Selectors::default())
    }

    #[test]
    fn test_manual_timers_fire_in_due_order() {
        let mut timers = ManualTimers::new();
        timers.schedule(MS * 300, TimerTask::HideToast { generation: 2 });
        timers.schedule(MS * 100, TimerTask::HideToast { generation: 1 });
        assert!(timers.advance(MS * 50).is_empty());
        assert_eq!(
            timers.advance(MS * 300),
            vec![
                TimerTask::HideToast { generation: 1 },
                TimerTask::HideToast { generation: 2 },
            ]
        );
        assert_eq!(timers.pending(), 0);
        assert_eq!(timers.now(), MS * 350);
    }

    #[test]
    fn test_toast_shows_then_hides() {
        let selectors = Selectors::default();
        let mut doc = doc();
        let mut timers = ManualTimers::new();
        let mut toast = Toast::new();

        toast.show(&mut doc, &mut timers, &selectors, "Added", MS * 1800);
        assert_eq!(doc.is_hidden("#toast"), Some(false));
        assert_eq!(doc.text("#toast").unwrap(), "Added");

        for task in timers.advance(MS * 1800) {
            let TimerTask::HideToast { generation } = task;
            assert!(toast.expire(&mut doc, &selectors, generation));
        }
        assert_eq!(doc.is_hidden("#toast"), Some(true));
        assert_eq!(doc.text("#toast").unwrap(), "");
    }

    #[test]
    fn test_newer_toast_outlives_older_timer() {
        let selectors = Selectors::default();
        let mut doc = doc();
        let mut timers = ManualTimers::new();
        let mut toast = Toast::new();

        toast.show(&mut doc, &mut timers, &selectors, "first", MS * 1800);
        timers.advance(MS * 1000);
        toast.show(&mut doc, &mut timers, &selectors, "second", MS * 1800);

        // The first timer fires at 1800ms but belongs to a stale message
        for task in timers.advance(MS * 800) {
            let TimerTask::HideToast { generation } = task;
            assert!(!toast.expire(&mut doc, &selectors, generation));
        }
        assert_eq!(doc.text("#toast").unwrap(), "second");
        assert_eq!(doc.is_hidden("#toast"), Some(false));
    }

    #[test]
    fn test_toast_without_element_schedules_nothing() {
        let selectors = Selectors::default();
        let mut doc = HeadlessDocument::new();
        let mut timers = ManualTimers::new();
        Toast::new().show(&mut doc, &mut timers, &selectors, "x", MS);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_modal_open_close() {
        let selectors = Selectors::default();
        let messages = Messages::default();
        let mut doc = doc();
        let mut modal = Modal::new();

        modal.open(&mut doc, &selectors, &messages, "Speaker");
        assert_eq!(modal.state(), ModalState::Open);
        assert_eq!(doc.text("#modal-desc").unwrap(), "Speaker added to cart");
        assert_eq!(doc.is_hidden("#modal"), Some(false));
        assert_eq!(doc.is_hidden("#modal-overlay"), Some(false));
        assert_eq!(doc.has_class("#modal", "visible"), Some(true));
        assert!(doc.is_focused("#modal"));

        modal.close(&mut doc, &selectors);
        assert_eq!(modal.state(), ModalState::Closed);
        assert_eq!(doc.is_hidden("#modal"), Some(true));
        assert_eq!(doc.has_class("#modal-overlay", "visible"), Some(false));
    }

    #[test]
    fn test_modal_does_not_stack() {
        let selectors = Selectors::default();
        let messages = Messages::default();
        let mut doc = doc();
        let mut modal = Modal::new();

        modal.open(&mut doc, &selectors, &messages, "Headphones");
        modal.open(&mut doc, &selectors, &messages, "Watch");
        assert_eq!(doc.text("#modal-desc").unwrap(), "Watch added to cart");
        assert_eq!(modal.state(), ModalState::Open);

        // One close is enough
        modal.close(&mut doc, &selectors);
        assert_eq!(doc.is_hidden("#modal"), Some(true));
    }

    #[test]
    fn test_modal_requires_overlay() {
        let selectors = Selectors::default();
        let mut doc = HeadlessDocument::new();
        doc.append(None, crate::document::Element::new("div").id("modal").hidden(true));
        let mut modal = Modal::new();
        modal.open(&mut doc, &selectors, &Messages::default(), "X");
        assert_eq!(modal.state(), ModalState::Closed);
        assert_eq!(doc.is_hidden("#modal"), Some(true));
    }
}

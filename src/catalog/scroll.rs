//! Infinite Scroll Trigger
//!
//! Watches the last rendered store. Each arm event allows at most one page
//! advance. A new arm comes from a page landing, or from the watched store
//! leaving the viewport after it already fired.

use crate::models::StoreId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerState {
    /// Nothing to watch (empty list)
    #[default]
    Idle,
    /// Watching `item`; `fired` once it has requested a page
    Armed { item: StoreId, fired: bool },
}

#[derive(Debug, Clone, Default)]
pub struct ScrollTrigger {
    state: TriggerState,
}

impl ScrollTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch the new last item, dropping any previous watch
    pub fn arm(&mut self, last: Option<StoreId>) {
        self.state = match last {
            Some(item) => TriggerState::Armed { item, fired: false },
            None => TriggerState::Idle,
        };
    }

    pub fn disarm(&mut self) {
        self.state = TriggerState::Idle;
    }

    /// Visibility report for `item`. Returns true when a page advance
    /// should be issued, and consumes this arm event.
    pub fn on_visible(&mut self, item: StoreId, has_more: bool) -> bool {
        match &mut self.state {
            TriggerState::Armed { item: watched, fired }
                if *watched == item && !*fired && has_more =>
            {
                *fired = true;
                true
            }
            _ => false,
        }
    }

    /// The watched item scrolled out of view; the next appearance counts again
    pub fn on_hidden(&mut self, item: StoreId) {
        if let TriggerState::Armed { item: watched, fired } = &mut self.state {
            if *watched == item {
                *fired = false;
            }
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> TriggerState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_never_fires() {
        let mut trigger = ScrollTrigger::new();
        assert!(!trigger.on_visible(1, true));
        trigger.arm(None);
        assert_eq!(trigger.state(), TriggerState::Idle);
    }

    #[test]
    fn test_fires_once_per_arm() {
        let mut trigger = ScrollTrigger::new();
        trigger.arm(Some(6));
        assert!(trigger.on_visible(6, true));
        assert!(!trigger.on_visible(6, true));

        trigger.arm(Some(12));
        assert!(trigger.on_visible(12, true));
    }

    #[test]
    fn test_ignores_other_items_and_exhausted_lists() {
        let mut trigger = ScrollTrigger::new();
        trigger.arm(Some(6));
        assert!(!trigger.on_visible(5, true));
        assert!(!trigger.on_visible(6, false));
        // Still armed after a rejected report
        assert_eq!(trigger.state(), TriggerState::Armed { item: 6, fired: false });
    }

    #[test]
    fn test_hidden_rearms_watched_item_only() {
        let mut trigger = ScrollTrigger::new();
        trigger.arm(Some(6));
        assert!(trigger.on_visible(6, true));

        trigger.on_hidden(5);
        assert!(!trigger.on_visible(6, true));

        trigger.on_hidden(6);
        assert!(trigger.on_visible(6, true));
    }

    #[test]
    fn test_hidden_while_idle_stays_idle() {
        let mut trigger = ScrollTrigger::new();
        trigger.on_hidden(6);
        assert_eq!(trigger.state(), TriggerState::Idle);
    }

    #[test]
    fn test_disarm() {
        let mut trigger = ScrollTrigger::new();
        trigger.arm(Some(3));
        trigger.disarm();
        assert!(!trigger.on_visible(3, true));
    }
}

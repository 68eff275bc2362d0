//! Resize notifications
//!
//! The window side holds a [`ResizeNotifier`]; the viewport owns the matching
//! [`ResizeSubscription`] and drains it once per frame, so any number of
//! resize events between two frames costs a single resize.

use std::sync::mpsc::{channel, Receiver, Sender};

pub fn resize_channel() -> (ResizeNotifier, ResizeSubscription) {
    let (sender, receiver) = channel();
    (ResizeNotifier(sender), ResizeSubscription(receiver))
}

#[derive(Debug, Clone)]
pub struct ResizeNotifier(Sender<()>);

impl ResizeNotifier {
    /// Signals that the container changed size; a dropped viewport is ignored
    pub fn notify(&self) {
        let _ = self.0.send(());
    }
}

#[derive(Debug)]
pub struct ResizeSubscription(Receiver<()>);

impl ResizeSubscription {
    /// Consumes pending notifications and returns how many there were
    pub fn drain(&self) -> usize {
        self.0.try_iter().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_collapses_pending_notifications() {
        let (notifier, subscription) = resize_channel();
        assert_eq!(subscription.drain(), 0);

        notifier.notify();
        notifier.clone().notify();
        assert_eq!(subscription.drain(), 2);
        assert_eq!(subscription.drain(), 0);
    }

    #[test]
    fn notifying_after_the_subscription_is_gone_is_harmless() {
        let (notifier, subscription) = resize_channel();
        drop(subscription);
        notifier.notify();
    }
}

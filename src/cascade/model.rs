//! Event and cascade data structures

use std::collections::{BTreeSet, HashMap};
use serde::{Serialize, Deserialize};

/// Identifier of a user taking part in a cascade
pub type UserId = i64;

/// Identifier of a cascade (the original message)
pub type CascadeId = i64;

/// A single retweet: `user` retweeted from `parent` at `time`
///
/// `time` is measured in seconds since the message was published.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// The user who retweeted
    pub user: UserId,
    /// The user retweeted from
    pub parent: UserId,
    /// Seconds since publication
    pub time: f64,
}

impl Event {
    /// Create a new event
    pub fn new(user: UserId, parent: UserId, time: f64) -> Self {
        Event { user, parent, time }
    }
}

/// The diffusion record of one message
///
/// - `root` is the publisher
/// - `events` are not kept in any particular order until
///   [`Cascade::sort_events`] is called
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cascade {
    /// Message identifier
    pub id: CascadeId,
    /// Publishing user
    pub root: UserId,
    /// Publication timestamp
    pub publish_time: f64,
    /// Retweet events
    pub events: Vec<Event>,
}

impl Cascade {
    /// Create a cascade with no events
    pub fn new(id: CascadeId, root: UserId, publish_time: f64) -> Self {
        Cascade {
            id,
            root,
            publish_time,
            events: Vec::new(),
        }
    }

    /// Append an event. No duplicate check is performed.
    pub fn add_event(&mut self, user: UserId, parent: UserId, time: f64) {
        self.events.push(Event::new(user, parent, time));
    }

    /// Stable in-place sort of the events by time
    pub fn sort_events(&mut self) {
        self.events.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Number of retweet events
    pub fn n_events(&self) -> usize {
        self.events.len()
    }

    /// New cascade holding only the earliest `k` events
    ///
    /// Sorts `self` first. Returns `None` when fewer than `k` events exist.
    pub fn get_k_prefix(&mut self, k: usize) -> Option<Cascade> {
        self.sort_events();
        if self.events.len() < k {
            return None;
        }

        Some(Cascade {
            id: self.id,
            root: self.root,
            publish_time: self.publish_time,
            events: self.events[..k].to_vec(),
        })
    }

    /// Sorted distinct users, root included
    pub fn unique_users(&self) -> Vec<UserId> {
        let mut users = BTreeSet::new();
        users.insert(self.root);
        users.extend(self.events.iter().map(|e| e.user));
        users.into_iter().collect()
    }
}

/// Keep only the earliest event of every user
///
/// A user may show up in several retweet paths. On equal times the event
/// seen first wins. The result lists users in first-seen order.
pub fn earliest_event_by_user(events: &[Event]) -> Vec<Event> {
    let mut order: Vec<UserId> = Vec::new();
    let mut by_user: HashMap<UserId, Event> = HashMap::new();

    for event in events {
        match by_user.get_mut(&event.user) {
            Some(kept) => {
                if event.time < kept.time {
                    *kept = *event;
                }
            }
            None => {
                order.push(event.user);
                by_user.insert(event.user, *event);
            }
        }
    }

    order.into_iter()
        .filter_map(|user| by_user.remove(&user))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_cascade() -> Cascade {
        let mut cascade = Cascade::new(7, 1, 1000.0);
        cascade.add_event(3, 1, 40.0);
        cascade.add_event(2, 1, 10.0);
        cascade.add_event(4, 2, 25.0);
        cascade
    }

    #[test]
    fn test_sort_events() {
        let mut cascade = sample_cascade();
        cascade.sort_events();
        let times: Vec<f64> = cascade.events.iter().map(|e| e.time).collect();
        assert_eq!(times, vec![10.0, 25.0, 40.0]);

        cascade.sort_events();
        let again: Vec<f64> = cascade.events.iter().map(|e| e.time).collect();
        assert_eq!(times, again);
    }

    #[test]
    fn test_k_prefix() {
        let mut cascade = sample_cascade();
        let prefix = cascade.get_k_prefix(2).unwrap();

        assert_eq!(prefix.id, 7);
        assert_eq!(prefix.root, 1);
        assert_eq!(prefix.publish_time, 1000.0);
        assert_eq!(prefix.n_events(), 2);
        assert_eq!(prefix.events[0].user, 2);
        assert_eq!(prefix.events[1].user, 4);

        // source keeps all of its events
        assert_eq!(cascade.n_events(), 3);
    }

    #[test]
    fn test_k_prefix_too_short() {
        let mut cascade = sample_cascade();
        assert!(cascade.get_k_prefix(4).is_none());
        assert_eq!(cascade.get_k_prefix(3).unwrap().n_events(), 3);
    }

    #[test]
    fn test_unique_users() {
        let mut cascade = sample_cascade();
        cascade.add_event(2, 4, 50.0);
        assert_eq!(cascade.unique_users(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_earliest_event_by_user() {
        let events = vec![
            Event::new(5, 1, 30.0),
            Event::new(6, 1, 12.0),
            Event::new(5, 6, 20.0),
            Event::new(6, 5, 40.0),
        ];
        let deduped = earliest_event_by_user(&events);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0], Event::new(5, 6, 20.0));
        assert_eq!(deduped[1], Event::new(6, 1, 12.0));
    }

    #[test]
    fn test_earliest_event_tie_keeps_first_seen() {
        let events = vec![Event::new(5, 1, 10.0), Event::new(5, 9, 10.0)];
        let deduped = earliest_event_by_user(&events);
        assert_eq!(deduped, vec![Event::new(5, 1, 10.0)]);
    }

    proptest! {
        #[test]
        fn prop_dedup_idempotent(raw in prop::collection::vec((-10i64..20, -10i64..20, 0u32..1000), 0..60)) {
            let events: Vec<Event> = raw.into_iter()
                .map(|(u, p, t)| Event::new(u, p, t as f64))
                .collect();
            let once = earliest_event_by_user(&events);
            let twice = earliest_event_by_user(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_prefix_length(times in prop::collection::vec(0u32..10_000, 0..40), k in 0usize..50) {
            let mut cascade = Cascade::new(1, 0, 0.0);
            for (i, t) in times.iter().enumerate() {
                cascade.add_event(i as i64 + 1, 0, *t as f64);
            }
            match cascade.get_k_prefix(k) {
                Some(prefix) => {
                    prop_assert!(times.len() >= k);
                    prop_assert_eq!(prefix.n_events(), k);
                }
                None => prop_assert!(times.len() < k),
            }
        }
    }
}

//! Data store holding the current record of one workflow
//!
//! The store never validates: any value the update carries is stored as-is.
//! Every mutation notifies subscribers synchronously before returning, so a
//! bound render surface has repainted by the time the caller regains control.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::model::Record;

/// Change notification callback.
pub type ChangeHandler<R> = Arc<dyn Fn(&R) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct DataStore<R: Record> {
    record: R,
    revision: u64,
    next_subscription: u64,
    subscribers: Vec<(SubscriptionId, ChangeHandler<R>)>,
}

impl<R: Record> DataStore<R> {
    pub fn new(record: R) -> Self {
        Self {
            record,
            revision: 0,
            next_subscription: 0,
            subscribers: Vec::new(),
        }
    }

    /// Borrow the current record.
    pub fn get(&self) -> &R {
        &self.record
    }

    /// Owned copy of the current record.
    pub fn snapshot(&self) -> R {
        self.record.clone()
    }

    /// Number of mutations applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply one field update, preserving all other fields.
    pub fn set(&mut self, update: R::Update) -> &R {
        debug!("{} update: {:?}", R::KIND, update);
        self.record.apply(update);
        self.changed()
    }

    /// Apply several field updates with a single notification.
    pub fn set_all<I>(&mut self, updates: I) -> &R
    where
        I: IntoIterator<Item = R::Update>,
    {
        for update in updates {
            debug!("{} update: {:?}", R::KIND, update);
            self.record.apply(update);
        }
        self.changed()
    }

    /// Replace the whole record (used by the sample generator).
    pub fn replace(&mut self, record: R) -> &R {
        debug!("{} replaced", R::KIND);
        self.record = record;
        self.changed()
    }

    /// Register a callback invoked after every mutation.
    pub fn subscribe<F>(&mut self, cb: F) -> SubscriptionId
    where
        F: Fn(&R) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Arc::new(cb)));
        id
    }

    /// Remove a callback. Returns false when the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn changed(&mut self) -> &R {
        self.revision += 1;
        for (_, cb) in &self.subscribers {
            cb(&self.record);
        }
        &self.record
    }
}

impl<R: Record> fmt::Debug for DataStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataStore")
            .field("record", &self.record)
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

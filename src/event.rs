/*
    ALICE-CDO
    Copyright (C) 2026 Moroya Sakamoto
*/

/// A recorded pool event for external indexers.
#[derive(Debug, Clone)]
pub struct EventRecord {
    /// Sequential record number.
    pub sequence: u64,
    /// The event payload.
    pub event: PoolEvent,
}

/// Events emitted by the engine. Not consumed internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolEvent {
    /// A new pool was instantiated by the factory.
    PoolCreated {
        creator: u64,
        pool_id: u64,
        pool_account: u64,
    },
    /// A pool's obligation set was frozen; carries the full tranche
    /// token lists as confirmation.
    PoolFinalized {
        pool_id: u64,
        senior_tokens: Vec<u64>,
        mezzanine_tokens: Vec<u64>,
    },
}

/// Append-only event log.
///
/// Sequence numbers start at 1 and increment monotonically with each
/// recorded event. The log never removes entries.
pub struct EventLog {
    entries: Vec<EventRecord>,
    next_seq: u64,
}

impl EventLog {
    /// Create a new, empty log. The first recorded event will have sequence 1.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 1,
        }
    }

    /// Append an event to the log.
    pub fn record(&mut self, event: PoolEvent) {
        let sequence = self.next_seq;
        self.next_seq += 1;
        self.entries.push(EventRecord { sequence, event });
    }

    /// Return a slice of all records in order.
    #[inline(always)]
    pub fn entries(&self) -> &[EventRecord] {
        &self.entries
    }

    /// Return the number of records in the log.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return true when the log contains no records.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return a reference to the most recent record, or `None` if the log
    /// is empty.
    #[inline(always)]
    pub fn last_entry(&self) -> Option<&EventRecord> {
        self.entries.last()
    }
}

impl Default for EventLog {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

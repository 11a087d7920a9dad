//! Table of in-flight requests, keyed by id

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::protocol::{MoveResponse, RequestId};

/// Issues request ids and matches responses back to them.
///
/// An id is inserted when a request is sent and removed when its response
/// is resolved. A response whose id is not in the table (stale, cancelled,
/// or never issued) is dropped.
#[derive(Debug)]
pub struct PendingTable {
    next_id: RequestId,
    slots: HashMap<RequestId, Instant>,
}

impl Default for PendingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingTable {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            slots: HashMap::new(),
        }
    }

    /// Allocate the next id and mark it in flight.
    pub fn issue(&mut self) -> RequestId {
        let id = self.next_id;
        self.next_id += 1;
        self.slots.insert(id, Instant::now());
        id
    }

    /// Accept a response if it answers a request still in flight.
    pub fn resolve(&mut self, response: MoveResponse) -> Option<MoveResponse> {
        match self.slots.remove(&response.id) {
            Some(issued) => {
                log::trace!("request {} resolved after {:?}", response.id, issued.elapsed());
                Some(response)
            }
            None => {
                log::warn!("dropping response for unknown request {}", response.id);
                None
            }
        }
    }

    /// Forget one request; its response will be dropped.
    pub fn cancel(&mut self, id: RequestId) -> bool {
        self.slots.remove(&id).is_some()
    }

    /// Forget every request in flight. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.slots.len();
        self.slots.clear();
        n
    }

    #[inline]
    pub fn is_pending(&self, id: RequestId) -> bool {
        self.slots.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// How long `id` has been in flight
    pub fn age(&self, id: RequestId) -> Option<Duration> {
        self.slots.get(&id).map(Instant::elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase() {
        let mut table = PendingTable::new();
        let a = table.issue();
        let b = table.issue();
        assert!(b > a);
        assert_eq!(table.len(), 2);
        assert!(table.age(a).is_some());
    }

    #[test]
    fn test_resolve_out_of_order() {
        let mut table = PendingTable::new();
        let a = table.issue();
        let b = table.issue();

        let rb = table.resolve(MoveResponse::with_move(b, Some(5))).unwrap();
        assert_eq!(rb.id, b);
        assert!(table.is_pending(a));
        assert!(!table.is_pending(b));

        assert!(table.resolve(MoveResponse::with_move(a, Some(6))).is_some());
        assert!(table.is_empty());
    }

    #[test]
    fn test_unknown_and_duplicate_dropped() {
        let mut table = PendingTable::new();
        let id = table.issue();
        assert!(table.resolve(MoveResponse::with_move(id + 100, Some(1))).is_none());
        assert!(table.resolve(MoveResponse::with_move(id, Some(1))).is_some());
        // Second answer for the same id
        assert!(table.resolve(MoveResponse::with_move(id, Some(2))).is_none());
    }

    #[test]
    fn test_cancel() {
        let mut table = PendingTable::new();
        let a = table.issue();
        let b = table.issue();
        assert!(table.cancel(a));
        assert!(!table.cancel(a));
        assert!(table.resolve(MoveResponse::with_move(a, Some(0))).is_none());

        assert_eq!(table.cancel_all(), 1);
        assert!(table.resolve(MoveResponse::with_move(b, Some(0))).is_none());
        // Ids are not reused after teardown
        assert!(table.issue() > b);
    }
}

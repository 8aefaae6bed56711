//! Record store
//!
//! Holds the authoritative snapshot of customer records for the session and
//! publishes every replacement to subscribers.
//!
//! # Design
//!
//! The snapshot lives in a `tokio::sync::watch` channel. Replacing it is a
//! single atomic swap, so a subscriber either sees the old snapshot or the
//! new one, never a mix. Consumers receive a read-only `watch::Receiver`;
//! only the store writes.
//!
//! # Sequencing
//!
//! Refreshes may overlap. Each refresh takes a ticket from a monotonically
//! increasing counter when it is issued, and its result is applied only if
//! no later-issued refresh has been applied already. A slow refresh that
//! completes after a newer one is dropped instead of overwriting fresher
//! data. The applied ticket becomes the snapshot's `version`.

use crate::types::{ClientError, Customer};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Immutable, versioned view of the record set
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Ticket of the refresh that produced this snapshot; 0 for the
    /// initial empty snapshot
    pub version: u64,
    pub customers: Arc<[Customer]>,
}

impl Snapshot {
    fn empty() -> Self {
        Snapshot {
            version: 0,
            customers: Arc::from(Vec::new()),
        }
    }
}

/// Outcome of a refresh that reached the backend successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The snapshot was replaced; carries the new version
    Applied(u64),
    /// A later-issued refresh had already been applied; result dropped
    Superseded(u64),
}

/// Owned, versioned store with subscribe/notify semantics
#[derive(Debug)]
pub struct RecordStore {
    sender: watch::Sender<Snapshot>,
    issued: AtomicU64,
}

impl RecordStore {
    /// Create an empty store (session start)
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Snapshot::empty());
        RecordStore {
            sender,
            issued: AtomicU64::new(0),
        }
    }

    /// The last applied snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.sender.borrow().clone()
    }

    /// The last applied record set
    pub fn current(&self) -> Arc<[Customer]> {
        Arc::clone(&self.sender.borrow().customers)
    }

    pub fn version(&self) -> u64 {
        self.sender.borrow().version
    }

    /// Read-only handle that observes every applied snapshot
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.sender.subscribe()
    }

    /// Issue a refresh backed by `fetch` and replace the snapshot with its
    /// result
    ///
    /// The ticket is taken when this method is called, before `fetch` is
    /// first polled, so issue order (not completion order) decides which
    /// result survives. On error the previous snapshot stays in place.
    pub fn refresh_with<'a, F>(
        &'a self,
        fetch: F,
    ) -> impl Future<Output = Result<RefreshOutcome, ClientError>> + 'a
    where
        F: Future<Output = Result<Vec<Customer>, ClientError>> + 'a,
    {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            let customers = fetch.await?;
            Ok(self.apply(ticket, customers))
        }
    }

    fn apply(&self, ticket: u64, customers: Vec<Customer>) -> RefreshOutcome {
        let count = customers.len();
        let mut incoming = Some(customers);
        let applied = self.sender.send_if_modified(|snapshot| {
            if ticket <= snapshot.version {
                return false;
            }
            if let Some(customers) = incoming.take() {
                *snapshot = Snapshot {
                    version: ticket,
                    customers: Arc::from(customers),
                };
            }
            true
        });

        if applied {
            log::debug!("record store: applied snapshot v{} ({} customers)", ticket, count);
            RefreshOutcome::Applied(ticket)
        } else {
            log::warn!(
                "record store: dropped refresh #{} superseded by v{}",
                ticket,
                self.version()
            );
            RefreshOutcome::Superseded(ticket)
        }
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Address;
    use std::time::Duration;

    fn customer(id: &str) -> Customer {
        Customer {
            customer_id: id.to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email_id: "a@b.com".to_string(),
            phone_no: "555".to_string(),
            address: Address::new("X", "Y", "Z"),
            total_balance: None,
            join_date: None,
            card_number: None,
            loan_account_number: None,
        }
    }

    fn ids(customers: &[Customer]) -> Vec<String> {
        customers.iter().map(|c| c.customer_id.clone()).collect()
    }

    #[test]
    fn test_starts_empty() {
        let store = RecordStore::new();
        assert!(store.current().is_empty());
        assert_eq!(store.version(), 0);
    }

    #[tokio::test]
    async fn test_refresh_replaces_wholesale() {
        let store = RecordStore::new();
        store
            .refresh_with(async { Ok(vec![customer("1"), customer("2")]) })
            .await
            .unwrap();
        let outcome = store
            .refresh_with(async { Ok(vec![customer("3")]) })
            .await
            .unwrap();

        assert_eq!(outcome, RefreshOutcome::Applied(2));
        assert_eq!(ids(&store.current()), vec!["3"]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let store = RecordStore::new();
        store
            .refresh_with(async { Ok(vec![customer("1")]) })
            .await
            .unwrap();

        let result = store
            .refresh_with(async { Err(ClientError::transport(0, "Unknown Error")) })
            .await;

        assert!(result.is_err());
        assert_eq!(ids(&store.current()), vec!["1"]);
        assert_eq!(store.version(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_observe_new_snapshot() {
        let store = RecordStore::new();
        let mut receiver = store.subscribe();

        store
            .refresh_with(async { Ok(vec![customer("1")]) })
            .await
            .unwrap();

        assert!(receiver.has_changed().unwrap());
        let snapshot = receiver.borrow_and_update().clone();
        assert_eq!(snapshot.version, 1);
        assert_eq!(ids(&snapshot.customers), vec!["1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_issued_refresh_wins_over_slower_earlier_one() {
        let store = RecordStore::new();

        let slow_old = store.refresh_with(async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(vec![customer("stale")])
        });
        let fast_new = store.refresh_with(async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(vec![customer("fresh")])
        });

        let (old, new) = tokio::join!(slow_old, fast_new);

        assert_eq!(old.unwrap(), RefreshOutcome::Superseded(1));
        assert_eq!(new.unwrap(), RefreshOutcome::Applied(2));
        assert_eq!(ids(&store.current()), vec!["fresh"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_order_completion_applies_both() {
        let store = RecordStore::new();
        let mut receiver = store.subscribe();

        let first = store.refresh_with(async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(vec![customer("1")])
        });
        let second = store.refresh_with(async {
            tokio::time::sleep(Duration::from_millis(300)).await;
            Ok(vec![customer("1"), customer("2")])
        });

        let (a, b) = tokio::join!(first, second);

        assert_eq!(a.unwrap(), RefreshOutcome::Applied(1));
        assert_eq!(b.unwrap(), RefreshOutcome::Applied(2));
        assert_eq!(receiver.borrow_and_update().version, 2);
    }
}

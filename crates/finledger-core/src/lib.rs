//! Core ledger store and aggregation logic
//!
//! The [`LedgerStore`] owns the ordered transaction collection (newest
//! first), persists it as one JSON payload in a named slot, and derives
//! aggregate totals on demand. It is a pure data module: no HTTP, no
//! rendering, no async. The presentation layer decides how results and
//! errors are surfaced.

pub mod error;
pub mod models;
pub mod storage;

use chrono::Local;
use std::time::{SystemTime, UNIX_EPOCH};

pub use error::{CoreError, CoreResult, ErrorCode, ErrorSeverity};
pub use models::{Totals, Transaction, TransactionKind};
pub use storage::{FileStore, MemoryStore, StateStore};

/// Name of the logical slot holding the serialized collection
pub const TRANSACTIONS_SLOT: &str = "transactions";

/// The ledger store: the full ordered collection of transactions plus
/// its persistence slot. The entire collection is the unit of
/// persistence; every mutation writes it back in full.
pub struct LedgerStore {
    store: Box<dyn StateStore>,
    transactions: Vec<Transaction>,
    recovered: bool,
}

impl LedgerStore {
    /// Open the store, loading the persisted collection.
    ///
    /// An absent slot yields an empty ledger. A malformed payload is
    /// discarded to an empty ledger with a logged warning rather than
    /// failing; `recovered()` reports that this happened.
    pub fn open(store: Box<dyn StateStore>) -> Self {
        let mut recovered = false;
        let transactions = match store.read(TRANSACTIONS_SLOT) {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<Transaction>>(&payload) {
                Ok(list) => list,
                Err(e) => {
                    log::warn!(
                        "Discarding malformed transaction data, starting empty: {}",
                        e
                    );
                    recovered = true;
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Failed to read persisted state, starting empty: {}", e);
                recovered = true;
                Vec::new()
            }
        };

        Self {
            store,
            transactions,
            recovered,
        }
    }

    /// Whether loading had to discard malformed persisted data
    pub fn recovered(&self) -> bool {
        self.recovered
    }

    /// Validate inputs and record a new transaction.
    ///
    /// The amount arrives as the raw form text; it must parse as a
    /// finite number strictly greater than zero. The description must
    /// be non-empty after trimming. An empty category defaults to
    /// "other". On any validation failure the collection is left
    /// untouched and nothing is written.
    pub fn add(
        &mut self,
        kind: TransactionKind,
        amount: &str,
        description: &str,
        category: &str,
    ) -> CoreResult<Transaction> {
        let description = description.trim();
        if description.is_empty() {
            return Err(CoreError::validation("Description must not be empty"));
        }

        let amount_text = amount.trim();
        if amount_text.is_empty() {
            return Err(CoreError::validation("Amount must not be empty"));
        }
        let amount: f64 = amount_text
            .parse()
            .map_err(|_| CoreError::validation(format!("Amount '{}' is not a number", amount_text)))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::validation(
                "Amount must be a positive number",
            ));
        }

        let category = category.trim();
        let category = if category.is_empty() {
            "other".to_string()
        } else {
            category.to_string()
        };

        let now_ms = now_millis();
        // Timestamp-derived id, bumped past the newest entry on collision
        let id = match self.transactions.iter().map(|t| t.id).max() {
            Some(max_id) if now_ms <= max_id => max_id + 1,
            _ => now_ms,
        };

        let transaction = Transaction {
            id,
            kind,
            amount,
            description: description.to_string(),
            category,
            date: Local::now().format("%d/%m/%Y").to_string(),
            created_at: now_ms,
        };

        // Newest first
        self.transactions.insert(0, transaction.clone());
        if let Err(e) = self.persist() {
            self.transactions.remove(0);
            return Err(e);
        }

        Ok(transaction)
    }

    /// Aggregate totals over the current collection
    pub fn totals(&self) -> Totals {
        Totals::compute(&self.transactions)
    }

    /// Empty the collection and persist the empty state.
    ///
    /// Irreversible; refuses without explicit confirmation.
    pub fn clear(&mut self, confirmed: bool) -> CoreResult<()> {
        if !confirmed {
            return Err(CoreError::validation(
                "Clearing the ledger requires explicit confirmation",
            ));
        }
        let previous = std::mem::take(&mut self.transactions);
        if let Err(e) = self.persist() {
            self.transactions = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Serialize the full collection as CSV.
    ///
    /// Header `Date,Description,Category,Kind,Amount`, one quoted row
    /// per transaction, amounts to two decimals. An empty ledger is an
    /// error so the caller can report the empty-state condition.
    pub fn export_csv(&self) -> CoreResult<String> {
        if self.transactions.is_empty() {
            return Err(CoreError::EmptyLedger);
        }
        let mut csv = String::from("Date,Description,Category,Kind,Amount\n");
        for transaction in &self.transactions {
            csv.push_str(&transaction.csv_row());
            csv.push('\n');
        }
        Ok(csv)
    }

    /// The newest entries, bounded for display. Storage is never
    /// truncated by this view.
    pub fn recent(&self, limit: usize) -> &[Transaction] {
        &self.transactions[..self.transactions.len().min(limit)]
    }

    /// Full ordered snapshot, newest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn persist(&self) -> CoreResult<()> {
        let payload = serde_json::to_string(&self.transactions)?;
        self.store.write(TRANSACTIONS_SLOT, &payload)
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_store() -> LedgerStore {
        LedgerStore::open(Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_add_valid_transaction() {
        let mut store = empty_store();
        let tx = store
            .add(TransactionKind::Income, "100.00", "Salary", "salary")
            .unwrap();
        assert_eq!(tx.amount, 100.0);
        assert_eq!(tx.kind, TransactionKind::Income);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_empty_description_rejected() {
        let mut store = empty_store();
        let err = store
            .add(TransactionKind::Expense, "10", "   ", "food")
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_non_numeric_amount_rejected() {
        let mut store = empty_store();
        assert!(store
            .add(TransactionKind::Expense, "abc", "Lunch", "food")
            .is_err());
        assert!(store
            .add(TransactionKind::Expense, "", "Lunch", "food")
            .is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_non_positive_amount_rejected() {
        let mut store = empty_store();
        assert!(store
            .add(TransactionKind::Expense, "0", "Lunch", "food")
            .is_err());
        assert!(store
            .add(TransactionKind::Expense, "-5", "Lunch", "food")
            .is_err());
        assert!(store
            .add(TransactionKind::Expense, "NaN", "Lunch", "food")
            .is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_category_defaults_to_other() {
        let mut store = empty_store();
        let tx = store
            .add(TransactionKind::Expense, "10", "Lunch", "")
            .unwrap();
        assert_eq!(tx.category, "other");
    }

    #[test]
    fn test_newest_first_ordering_and_unique_ids() {
        let mut store = empty_store();
        let t1 = store
            .add(TransactionKind::Income, "1", "first", "")
            .unwrap();
        let t2 = store
            .add(TransactionKind::Income, "2", "second", "")
            .unwrap();
        assert_ne!(t1.id, t2.id);
        assert_eq!(store.transactions()[0].id, t2.id);
        assert_eq!(store.transactions()[1].id, t1.id);
    }

    #[test]
    fn test_totals_match_adds() {
        let mut store = empty_store();
        store
            .add(TransactionKind::Income, "100.00", "Salary", "salary")
            .unwrap();
        store
            .add(TransactionKind::Expense, "40.50", "Lunch", "food")
            .unwrap();
        let totals = store.totals();
        assert_eq!(totals.count, 2);
        assert_eq!(totals.income, 100.0);
        assert_eq!(totals.expense, 40.5);
        assert_eq!(totals.balance, totals.income - totals.expense);
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut store = empty_store();
        store.add(TransactionKind::Income, "1", "x", "").unwrap();
        assert!(store.clear(false).is_err());
        assert_eq!(store.len(), 1);
        store.clear(true).unwrap();
        assert_eq!(store.totals(), Totals::default());
    }

    #[test]
    fn test_export_csv_empty_ledger_errors() {
        let store = empty_store();
        assert!(matches!(store.export_csv(), Err(CoreError::EmptyLedger)));
    }

    #[test]
    fn test_export_csv_format() {
        let mut store = empty_store();
        store
            .add(TransactionKind::Income, "100.00", "Salary", "salary")
            .unwrap();
        store
            .add(TransactionKind::Expense, "40.50", "Lunch", "food")
            .unwrap();
        let csv = store.export_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Date,Description,Category,Kind,Amount");
        // Newest first: Lunch precedes Salary
        assert!(lines[1].contains("\"Lunch\",\"food\",\"expense\",\"40.50\""));
        assert!(lines[2].contains("\"Salary\",\"salary\",\"income\",\"100.00\""));
    }

    #[test]
    fn test_recent_is_bounded_but_storage_is_not() {
        let mut store = empty_store();
        for i in 0..8 {
            store
                .add(TransactionKind::Income, "1", &format!("tx {}", i), "")
                .unwrap();
        }
        assert_eq!(store.recent(5).len(), 5);
        assert_eq!(store.recent(5)[0].description, "tx 7");
        assert_eq!(store.len(), 8);
    }

    #[test]
    fn test_malformed_payload_recovers_to_empty() {
        let store = LedgerStore::open(Box::new(MemoryStore::with_slot(
            TRANSACTIONS_SLOT,
            "not valid json {{",
        )));
        assert!(store.is_empty());
        assert!(store.recovered());
    }
}

//! Core data models for the ledger

use serde::{Deserialize, Serialize};

/// Transaction kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (salary, sales, gifts)
    Income,
    /// Money going out (food, rent, transport)
    Expense,
}

impl std::str::FromStr for TransactionKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" | "receita" => Ok(TransactionKind::Income),
            "expense" | "despesa" => Ok(TransactionKind::Expense),
            _ => Err(format!("Invalid transaction kind: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

/// One recorded income or expense entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, derived from the creation timestamp
    pub id: i64,
    /// Income or expense
    pub kind: TransactionKind,
    /// Positive amount, currency-agnostic
    pub amount: f64,
    /// Free-text description (never empty)
    pub description: String,
    /// Category label, defaults to "other"
    pub category: String,
    /// Display-formatted creation date (DD/MM/YYYY)
    pub date: String,
    /// Creation timestamp in milliseconds, used for ordering
    pub created_at: i64,
}

impl Transaction {
    /// One CSV row with every field individually quoted
    pub fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{}",
            csv_quote(&self.date),
            csv_quote(&self.description),
            csv_quote(&self.category),
            csv_quote(&self.kind.to_string()),
            csv_quote(&format!("{:.2}", self.amount)),
        )
    }
}

/// Aggregate totals derived from the full transaction list.
/// Recomputed on every read, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Totals {
    /// Income minus expense
    pub balance: f64,
    /// Sum of income amounts
    pub income: f64,
    /// Sum of expense amounts
    pub expense: f64,
    /// Number of transactions
    pub count: usize,
}

impl Totals {
    /// Compute totals over an ordered transaction sequence
    pub fn compute(transactions: &[Transaction]) -> Self {
        let income: f64 = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Income)
            .map(|t| t.amount)
            .sum();
        let expense: f64 = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .map(|t| t.amount)
            .sum();

        Self {
            balance: income - expense,
            income,
            expense,
            count: transactions.len(),
        }
    }
}

/// Quote a CSV field, doubling embedded quotes
fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn tx(kind: TransactionKind, amount: f64) -> Transaction {
        Transaction {
            id: 1,
            kind,
            amount,
            description: "test".to_string(),
            category: "other".to_string(),
            date: "01/01/2026".to_string(),
            created_at: 1,
        }
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            TransactionKind::from_str("income").unwrap(),
            TransactionKind::Income
        );
        assert_eq!(
            TransactionKind::from_str("EXPENSE").unwrap(),
            TransactionKind::Expense
        );
        assert_eq!(
            TransactionKind::from_str("receita").unwrap(),
            TransactionKind::Income
        );
        assert!(TransactionKind::from_str("transfer").is_err());
    }

    #[test]
    fn test_kind_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Income).unwrap(),
            "\"income\""
        );
        let kind: TransactionKind = serde_json::from_str("\"expense\"").unwrap();
        assert_eq!(kind, TransactionKind::Expense);
    }

    #[test]
    fn test_totals_empty() {
        let totals = Totals::compute(&[]);
        assert_eq!(totals, Totals::default());
        assert_eq!(totals.count, 0);
    }

    #[test]
    fn test_totals_partition_and_balance() {
        let list = vec![
            tx(TransactionKind::Income, 100.0),
            tx(TransactionKind::Expense, 40.5),
            tx(TransactionKind::Income, 9.5),
        ];
        let totals = Totals::compute(&list);
        assert_eq!(totals.income, 109.5);
        assert_eq!(totals.expense, 40.5);
        assert_eq!(totals.balance, totals.income - totals.expense);
        assert_eq!(totals.count, 3);
    }

    #[test]
    fn test_csv_row_quotes_every_field() {
        let mut t = tx(TransactionKind::Expense, 40.5);
        t.description = "Lunch".to_string();
        t.category = "food".to_string();
        assert_eq!(
            t.csv_row(),
            "\"01/01/2026\",\"Lunch\",\"food\",\"expense\",\"40.50\""
        );
    }

    #[test]
    fn test_csv_row_escapes_embedded_quotes() {
        let mut t = tx(TransactionKind::Income, 10.0);
        t.description = "said \"hi\"".to_string();
        assert!(t.csv_row().contains("\"said \"\"hi\"\"\""));
    }
}

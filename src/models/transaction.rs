//! Transaction model
//!
//! A dated, amount-bearing record linked to a payee and to a specific
//! month's item instance.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ItemId, PayeeId, TransactionId};
use super::money::Money;
use super::month::Month;

/// A single ledger entry against a monthly item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Transaction amount
    pub amount: Money,

    /// Optional memo text
    #[serde(default)]
    pub memo: String,

    /// Transaction date
    pub date: NaiveDate,

    /// True if this is an expense (the default), false for a refund/credit
    pub expense: bool,

    /// The payee this transaction belongs to
    pub payee_id: PayeeId,

    /// The monthly item instance this transaction is recorded against
    pub item_id: ItemId,

    /// When this transaction was created
    pub created_at: DateTime<Utc>,

    /// When this transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        item_id: ItemId,
        payee_id: PayeeId,
        amount: Money,
        memo: impl Into<String>,
        date: NaiveDate,
        expense: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            amount,
            memo: memo.into(),
            date,
            expense,
            payee_id,
            item_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether this transaction's date falls within the given month
    /// (closed interval: `month.start <= date <= month.end`)
    pub fn is_within(&self, month: &Month) -> bool {
        month.contains(self.date)
    }
}

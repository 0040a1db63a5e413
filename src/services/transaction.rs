//! Transaction service
//!
//! Every transaction hangs off a monthly instance. The instance is resolved
//! at create and edit time: find or create the month containing the date,
//! then join from the budget line's template to that month's instance by
//! identity. Payees are resolved by name, find-or-create.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Item, ItemId, Money, Month, Transaction, TransactionId};
use crate::services::month::MonthService;
use crate::services::payee::PayeeService;
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> BudgetResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Record a new transaction
    ///
    /// `item_id` may name the template or any month's instance of a budget
    /// line; the transaction lands on the instance belonging to the month
    /// containing `date`, which is created and seeded if missing.
    pub fn create(
        &self,
        item_id: ItemId,
        payee_name: &str,
        amount: Money,
        memo: &str,
        date: NaiveDate,
        expense: bool,
    ) -> BudgetResult<Transaction> {
        let instance = self.resolve_instance(item_id, date)?;
        let payee = PayeeService::new(self.storage).find_or_create(payee_name)?;

        let transaction = Transaction::new(instance.id, payee.id, amount, memo, date, expense);

        self.storage.transactions.upsert(transaction.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            transaction.id.to_string(),
            Some(payee.name),
        )?;

        Ok(transaction)
    }

    /// Edit a transaction
    ///
    /// A date or budget-line change re-resolves the month and instance the
    /// same way `create` does.
    #[allow(clippy::too_many_arguments)]
    pub fn edit(
        &self,
        id: TransactionId,
        item_id: Option<ItemId>,
        payee_name: Option<&str>,
        amount: Option<Money>,
        memo: Option<&str>,
        date: Option<NaiveDate>,
        expense: Option<bool>,
    ) -> BudgetResult<Transaction> {
        let mut transaction = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| BudgetError::transaction_not_found(id.to_string()))?;

        if let Some(amount) = amount {
            transaction.amount = amount;
        }
        if let Some(memo) = memo {
            transaction.memo = memo.to_string();
        }
        if let Some(expense) = expense {
            transaction.expense = expense;
        }
        if let Some(payee_name) = payee_name {
            let payee = PayeeService::new(self.storage).find_or_create(payee_name)?;
            transaction.payee_id = payee.id;
        }

        if item_id.is_some() || date.is_some() {
            let target_item = item_id.unwrap_or(transaction.item_id);
            let target_date = date.unwrap_or(transaction.date);
            let instance = self.resolve_instance(target_item, target_date)?;
            transaction.item_id = instance.id;
            transaction.date = target_date;
        }

        transaction.updated_at = chrono::Utc::now();

        self.storage.transactions.upsert(transaction.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            transaction.id.to_string(),
            None,
            None,
        )?;

        Ok(transaction)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> BudgetResult<()> {
        let transaction = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| BudgetError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            transaction.id.to_string(),
            None,
        )?;

        Ok(())
    }

    /// List all transactions, ascending by date
    pub fn list(&self) -> BudgetResult<Vec<Transaction>> {
        self.storage.transactions.get_all()
    }

    /// List transactions recorded against a budget line instance
    pub fn list_for_item(&self, item_id: ItemId) -> BudgetResult<Vec<Transaction>> {
        self.storage.transactions.for_item(item_id)
    }

    /// List the transactions dated within a month (inclusive of both ends)
    pub fn list_for_month(&self, month: &Month) -> BudgetResult<Vec<Transaction>> {
        Ok(self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .filter(|t| t.is_within(month))
            .collect())
    }

    /// Check proposed field values without mutating anything
    pub fn validate(&self, payee: Option<&str>, amount: Option<&str>) -> bool {
        if let Some(payee) = payee {
            if payee.trim().is_empty() {
                return false;
            }
        }
        if let Some(amount) = amount {
            if Money::parse(amount).is_err() {
                return false;
            }
        }
        true
    }

    /// Resolve a budget line and date to the owning month's instance
    fn resolve_instance(&self, item_id: ItemId, date: NaiveDate) -> BudgetResult<Item> {
        let item = self
            .storage
            .items
            .get(item_id)?
            .ok_or_else(|| BudgetError::item_not_found(item_id.to_string()))?;
        let template_id = item.template_id().unwrap_or(item.id);

        let month = MonthService::new(self.storage).find_or_create(date)?;

        match self.storage.items.instance_for(month.id, template_id)? {
            Some(instance) => Ok(instance),
            None => {
                // The template predates seeding for this month
                let template = self
                    .storage
                    .items
                    .get(template_id)?
                    .ok_or_else(|| BudgetError::item_not_found(template_id.to_string()))?;
                let instance = Item::new_instance(&template, month.id, Money::zero());
                self.storage.items.upsert(instance.clone())?;
                self.storage.items.save()?;
                Ok(instance)
            }
        }
    }
}

//! Payee service
//!
//! Payee names are unique case-insensitively. Renaming a payee onto a name
//! that already exists merges the two: the existing payee's transactions
//! move onto the renamed payee, the emptied payee is deleted, and the
//! renamed payee takes the name. Deleting a payee removes its transactions.

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{ItemId, Money, Month, Payee, PayeeId, Transaction};
use crate::storage::Storage;

/// Service for payee management
pub struct PayeeService<'a> {
    storage: &'a Storage,
}

impl<'a> PayeeService<'a> {
    /// Create a new payee service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Find a payee by name (case-insensitive), creating it if missing
    pub fn find_or_create(&self, name: &str) -> BudgetResult<Payee> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BudgetError::Validation("Payee name cannot be empty".into()));
        }

        if let Some(existing) = self.storage.payees.get_by_name(name)? {
            return Ok(existing);
        }

        let payee = Payee::new(name);
        payee.validate().map_err(BudgetError::Validation)?;

        self.storage.payees.upsert(payee.clone())?;
        self.storage.payees.save()?;

        self.storage.log_create(
            EntityType::Payee,
            payee.id.to_string(),
            Some(payee.name.clone()),
        )?;

        Ok(payee)
    }

    /// Get a payee by ID
    pub fn get(&self, id: PayeeId) -> BudgetResult<Option<Payee>> {
        self.storage.payees.get(id)
    }

    /// Get a payee by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> BudgetResult<Option<Payee>> {
        self.storage.payees.get_by_name(name)
    }

    /// List all payees, sorted by name
    pub fn list(&self) -> BudgetResult<Vec<Payee>> {
        self.storage.payees.get_all()
    }

    /// Rename a payee, merging into an existing payee on name collision
    ///
    /// When the new name belongs to a different payee, that payee's
    /// transactions move onto the renamed one, the emptied payee is deleted,
    /// and the renamed payee takes the name.
    pub fn rename(&self, id: PayeeId, new_name: &str) -> BudgetResult<Payee> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(BudgetError::Validation("Payee name cannot be empty".into()));
        }

        let mut payee = self
            .storage
            .payees
            .get(id)?
            .ok_or_else(|| BudgetError::payee_not_found(id.to_string()))?;

        if let Some(existing) = self.storage.payees.get_by_name(new_name)? {
            if existing.id != id {
                let moved = self.storage.transactions.reassign_payee(existing.id, id)?;
                if self.storage.transactions.for_payee(existing.id)?.is_empty() {
                    self.storage.payees.delete(existing.id)?;
                }

                self.storage.log_update(
                    EntityType::Payee,
                    id.to_string(),
                    Some(new_name.to_string()),
                    Some(format!(
                        "merged '{}' ({} transactions moved)",
                        existing.name, moved
                    )),
                )?;
            }
        }

        let old_name = payee.name.clone();
        payee.name = new_name.to_string();
        payee.updated_at = chrono::Utc::now();

        self.storage.payees.upsert(payee.clone())?;
        self.storage.transactions.save()?;
        self.storage.payees.save()?;

        self.storage.log_update(
            EntityType::Payee,
            payee.id.to_string(),
            Some(payee.name.clone()),
            Some(format!("name: '{}' -> '{}'", old_name, payee.name)),
        )?;

        Ok(payee)
    }

    /// Delete a payee and every transaction belonging to it
    pub fn delete(&self, id: PayeeId) -> BudgetResult<()> {
        let payee = self
            .storage
            .payees
            .get(id)?
            .ok_or_else(|| BudgetError::payee_not_found(id.to_string()))?;

        self.storage.transactions.delete_for_payee(id)?;
        self.storage.payees.delete(id)?;

        self.storage.transactions.save()?;
        self.storage.payees.save()?;

        self.storage.log_delete(
            EntityType::Payee,
            payee.id.to_string(),
            Some(payee.name.clone()),
        )?;

        Ok(())
    }

    /// A payee's transactions, optionally restricted by month and/or budget
    /// line
    ///
    /// The item filter is template-aware: naming any member of a budget
    /// line's family (the template or one month's instance) matches the
    /// whole family.
    pub fn transactions_from(
        &self,
        id: PayeeId,
        month: Option<&Month>,
        item: Option<ItemId>,
    ) -> BudgetResult<Vec<Transaction>> {
        let family: Option<Vec<ItemId>> = match item {
            Some(item_id) => {
                let item = self
                    .storage
                    .items
                    .get(item_id)?
                    .ok_or_else(|| BudgetError::item_not_found(item_id.to_string()))?;
                let template_id = item.template_id().unwrap_or(item.id);
                let mut ids: Vec<ItemId> = self
                    .storage
                    .items
                    .instances_of(template_id)?
                    .iter()
                    .map(|i| i.id)
                    .collect();
                ids.push(template_id);
                Some(ids)
            }
            None => None,
        };

        let transactions = self
            .storage
            .transactions
            .for_payee(id)?
            .into_iter()
            .filter(|t| month.map_or(true, |m| t.is_within(m)))
            .filter(|t| match &family {
                Some(ids) => ids.contains(&t.item_id),
                None => true,
            })
            .collect();

        Ok(transactions)
    }

    /// Net spending at a payee, with the same optional filters as
    /// [`transactions_from`](Self::transactions_from)
    pub fn total_spent(
        &self,
        id: PayeeId,
        month: Option<&Month>,
        item: Option<ItemId>,
    ) -> BudgetResult<Money> {
        let mut total = Money::zero();
        for transaction in self.transactions_from(id, month, item)? {
            if transaction.expense {
                total += transaction.amount;
            } else {
                total -= transaction.amount;
            }
        }
        Ok(total)
    }
}

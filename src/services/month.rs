//! Month service
//!
//! Months are find-or-create only and are never deleted. Materializing a new
//! month seeds one zero-amount instance of every template, so every month
//! carries the full set of budget lines.

use chrono::{Local, NaiveDate};

use crate::audit::EntityType;
use crate::error::BudgetResult;
use crate::models::{CategoryId, Item, ItemId, Money, Month, MonthId};
use crate::storage::Storage;

/// Service for month management and monthly rollups
pub struct MonthService<'a> {
    storage: &'a Storage,
}

impl<'a> MonthService<'a> {
    /// Create a new month service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Find the month containing a date, creating and seeding it if missing
    ///
    /// A newly created month receives one zero-amount instance of every
    /// template, so its budget lines match every other month's.
    pub fn find_or_create(&self, date: NaiveDate) -> BudgetResult<Month> {
        let probe = Month::containing(date);
        if let Some(existing) = self
            .storage
            .months
            .get_by_year_month(probe.year, probe.month)?
        {
            return Ok(existing);
        }

        let month = probe;
        self.storage.months.upsert(month.clone())?;

        for template in self.storage.items.templates()? {
            let instance = Item::new_instance(&template, month.id, Money::zero());
            self.storage.items.upsert(instance)?;
        }

        self.storage.months.save()?;
        self.storage.items.save()?;

        self.storage.log_create(
            EntityType::Month,
            month.id.to_string(),
            Some(month.label()),
        )?;

        Ok(month)
    }

    /// Find or create the month containing today's date
    pub fn current(&self) -> BudgetResult<Month> {
        self.find_or_create(Local::now().date_naive())
    }

    /// Get a month by ID
    pub fn get(&self, id: MonthId) -> BudgetResult<Option<Month>> {
        self.storage.months.get(id)
    }

    /// Get the month containing a date without creating it
    pub fn for_date(&self, date: NaiveDate) -> BudgetResult<Option<Month>> {
        let probe = Month::containing(date);
        self.storage.months.get_by_year_month(probe.year, probe.month)
    }

    /// List all months, ascending
    pub fn list(&self) -> BudgetResult<Vec<Month>> {
        self.storage.months.get_all()
    }

    /// Get this month's instance of a template (identity join)
    pub fn instance_for_template(
        &self,
        month_id: MonthId,
        template_id: ItemId,
    ) -> BudgetResult<Option<Item>> {
        self.storage.items.instance_for(month_id, template_id)
    }

    /// Sum of budgeted amounts across the month's instances
    pub fn total_budgeted(&self, month_id: MonthId) -> BudgetResult<Money> {
        let instances = self.storage.items.in_month(month_id)?;
        Ok(instances.iter().map(|i| i.amount).sum())
    }

    /// Net spending across the month's instances
    ///
    /// Expenses add to the total; income transactions subtract from it.
    pub fn total_spent(&self, month_id: MonthId) -> BudgetResult<Money> {
        let instances = self.storage.items.in_month(month_id)?;
        self.spent_for(&instances)
    }

    /// Budgeted minus spent for the month
    pub fn total_balance(&self, month_id: MonthId) -> BudgetResult<Money> {
        Ok(self.total_budgeted(month_id)? - self.total_spent(month_id)?)
    }

    /// Net spending within one category for the month
    pub fn category_spent(
        &self,
        month_id: MonthId,
        category_id: CategoryId,
    ) -> BudgetResult<Money> {
        let instances: Vec<Item> = self
            .storage
            .items
            .in_month(month_id)?
            .into_iter()
            .filter(|i| i.category_id == category_id)
            .collect();
        self.spent_for(&instances)
    }

    fn spent_for(&self, instances: &[Item]) -> BudgetResult<Money> {
        let mut total = Money::zero();
        for instance in instances {
            for transaction in self.storage.transactions.for_item(instance.id)? {
                if transaction.expense {
                    total += transaction.amount;
                } else {
                    total -= transaction.amount;
                }
            }
        }
        Ok(total)
    }
}

//! Item service
//!
//! Templates define the recurring budget lines; instances carry the
//! per-month amounts. Edits to an instance's name or category propagate to
//! the template and every sibling instance. Amounts never propagate.
//! Deletion always resolves to the template and cascades through instances
//! and their transactions.

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryId, Item, ItemId, Money, MonthId, Payee};
use crate::storage::Storage;

/// Service for budget item management
pub struct ItemService<'a> {
    storage: &'a Storage,
}

impl<'a> ItemService<'a> {
    /// Create a new item service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Get an item by ID
    pub fn get(&self, id: ItemId) -> BudgetResult<Option<Item>> {
        self.storage.items.get(id)
    }

    /// Create a new template item within a category
    ///
    /// The template receives the next ordering number within its category.
    pub fn create_template(
        &self,
        name: &str,
        category_id: CategoryId,
    ) -> BudgetResult<Item> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BudgetError::Validation("Item name cannot be empty".into()));
        }
        if self.storage.categories.get(category_id)?.is_none() {
            return Err(BudgetError::category_not_found(category_id.to_string()));
        }

        let mut template = Item::new_template(name, category_id);
        template.sort_order = self
            .storage
            .items
            .templates_in_category(category_id)?
            .iter()
            .map(|i| i.sort_order)
            .max()
            .map_or(0, |n| n + 1);

        self.storage.items.upsert(template.clone())?;
        self.storage.items.save()?;

        self.storage.log_create(
            EntityType::Item,
            template.id.to_string(),
            Some(template.name.clone()),
        )?;

        Ok(template)
    }

    /// Materialize a template into a month with the given amount
    ///
    /// With `seed_months`, every other existing month that lacks an instance
    /// of this template is back-filled with a zero-amount one, keeping the
    /// budget lines identical across months.
    pub fn create_instance(
        &self,
        template_id: ItemId,
        month_id: MonthId,
        amount: Money,
        seed_months: bool,
    ) -> BudgetResult<Item> {
        let template = self
            .storage
            .items
            .get(template_id)?
            .ok_or_else(|| BudgetError::item_not_found(template_id.to_string()))?;
        if !template.is_template() {
            return Err(BudgetError::Validation(
                "Instances can only be created from a template".into(),
            ));
        }
        if self.storage.months.get(month_id)?.is_none() {
            return Err(BudgetError::month_not_found(month_id.to_string()));
        }

        // Seeding may already have placed a zero instance in this month
        let instance = match self.storage.items.instance_for(month_id, template_id)? {
            Some(mut existing) => {
                existing.amount = amount;
                existing.updated_at = chrono::Utc::now();
                existing
            }
            None => Item::new_instance(&template, month_id, amount),
        };
        self.storage.items.upsert(instance.clone())?;

        if seed_months {
            for month in self.storage.months.get_all()? {
                if month.id == month_id {
                    continue;
                }
                if self
                    .storage
                    .items
                    .instance_for(month.id, template_id)?
                    .is_none()
                {
                    let seeded = Item::new_instance(&template, month.id, Money::zero());
                    self.storage.items.upsert(seeded)?;
                }
            }
        }

        self.storage.items.save()?;

        self.storage.log_create(
            EntityType::Item,
            instance.id.to_string(),
            Some(instance.name.clone()),
        )?;

        Ok(instance)
    }

    /// Edit an item's name, category, or amount
    ///
    /// Name and category changes always propagate to the template and all of
    /// its instances. An amount change applies only to the edited instance;
    /// supplying one for a template is an error.
    pub fn edit(
        &self,
        id: ItemId,
        name: Option<&str>,
        category_id: Option<CategoryId>,
        amount: Option<Money>,
    ) -> BudgetResult<Item> {
        let mut item = self
            .storage
            .items
            .get(id)?
            .ok_or_else(|| BudgetError::item_not_found(id.to_string()))?;

        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(BudgetError::Validation("Item name cannot be empty".into()));
            }
        }
        if let Some(category_id) = category_id {
            if self.storage.categories.get(category_id)?.is_none() {
                return Err(BudgetError::category_not_found(category_id.to_string()));
            }
        }
        if amount.is_some() && item.is_template() {
            return Err(BudgetError::Validation(
                "Amounts are set per month, not on the budget line itself".into(),
            ));
        }

        let template_id = item.template_id().unwrap_or(item.id);

        if name.is_some() || category_id.is_some() {
            let mut family = vec![];
            if let Some(template) = self.storage.items.get(template_id)? {
                family.push(template);
            }
            family.extend(self.storage.items.instances_of(template_id)?);

            for mut member in family {
                if let Some(name) = name {
                    member.name = name.trim().to_string();
                }
                if let Some(category_id) = category_id {
                    member.category_id = category_id;
                }
                member.updated_at = chrono::Utc::now();
                self.storage.items.upsert(member)?;
            }
        }

        if let Some(amount) = amount {
            // Re-read: the propagation pass above may have touched this item
            item = self
                .storage
                .items
                .get(id)?
                .ok_or_else(|| BudgetError::item_not_found(id.to_string()))?;
            item.amount = amount;
            item.updated_at = chrono::Utc::now();
            self.storage.items.upsert(item)?;
        }

        self.storage.items.save()?;

        let updated = self
            .storage
            .items
            .get(id)?
            .ok_or_else(|| BudgetError::item_not_found(id.to_string()))?;

        self.storage.log_update(
            EntityType::Item,
            updated.id.to_string(),
            Some(updated.name.clone()),
            None,
        )?;

        Ok(updated)
    }

    /// Set a monthly instance's budgeted amount
    ///
    /// Fails on templates: amounts only exist per month.
    pub fn edit_amount(&self, id: ItemId, amount: Money) -> BudgetResult<Item> {
        let mut item = self
            .storage
            .items
            .get(id)?
            .ok_or_else(|| BudgetError::item_not_found(id.to_string()))?;

        if item.is_template() {
            return Err(BudgetError::Validation(
                "Amounts are set per month, not on the budget line itself".into(),
            ));
        }

        let old_amount = item.amount;
        item.amount = amount;
        item.updated_at = chrono::Utc::now();

        self.storage.items.upsert(item.clone())?;
        self.storage.items.save()?;

        self.storage.log_update(
            EntityType::Item,
            item.id.to_string(),
            Some(item.name.clone()),
            Some(format!("amount: {} -> {}", old_amount, item.amount)),
        )?;

        Ok(item)
    }

    /// Delete an item and its whole family
    ///
    /// Resolves to the template regardless of which member was named, then
    /// removes the template, every monthly instance, and every transaction
    /// recorded against those instances.
    pub fn delete(&self, id: ItemId) -> BudgetResult<()> {
        let item = self
            .storage
            .items
            .get(id)?
            .ok_or_else(|| BudgetError::item_not_found(id.to_string()))?;

        let template_id = item.template_id().unwrap_or(item.id);
        let name = self
            .storage
            .items
            .get(template_id)?
            .map_or(item.name.clone(), |t| t.name);

        let mut doomed: Vec<ItemId> = self
            .storage
            .items
            .instances_of(template_id)?
            .iter()
            .map(|i| i.id)
            .collect();
        doomed.push(template_id);

        for &item_id in &doomed {
            self.storage.transactions.delete_for_item(item_id)?;
        }
        self.storage.items.delete_many(&doomed)?;

        self.storage.transactions.save()?;
        self.storage.items.save()?;

        self.storage.log_delete(
            EntityType::Item,
            template_id.to_string(),
            Some(name),
        )?;

        Ok(())
    }

    /// Reassign template ordering numbers 0..N-1 within a category
    ///
    /// Instances mirror their template's ordering so month views sort the
    /// same way.
    pub fn reorder(&self, order: &[ItemId]) -> BudgetResult<()> {
        for (i, &id) in order.iter().enumerate() {
            let template = match self.storage.items.get(id)? {
                Some(t) if t.is_template() => t,
                _ => continue,
            };

            let mut template = template;
            template.sort_order = i as i32;
            template.updated_at = chrono::Utc::now();
            let template_id = template.id;
            self.storage.items.upsert(template)?;

            for mut instance in self.storage.items.instances_of(template_id)? {
                instance.sort_order = i as i32;
                self.storage.items.upsert(instance)?;
            }
        }
        self.storage.items.save()?;
        Ok(())
    }

    /// Check proposed field values without mutating anything
    ///
    /// `None` fields are skipped; provided fields must each be acceptable
    /// (non-empty name, parseable amount).
    pub fn validate(&self, name: Option<&str>, amount: Option<&str>) -> bool {
        if let Some(name) = name {
            if name.trim().is_empty() {
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

    /// Net spending recorded against an item
    ///
    /// Expenses add; income transactions subtract. For a template this
    /// aggregates across every monthly instance.
    pub fn total_spent(&self, id: ItemId) -> BudgetResult<Money> {
        let item = self
            .storage
            .items
            .get(id)?
            .ok_or_else(|| BudgetError::item_not_found(id.to_string()))?;

        let mut reachable = vec![item.id];
        if item.is_template() {
            reachable.extend(self.storage.items.instances_of(item.id)?.iter().map(|i| i.id));
        }

        let mut total = Money::zero();
        for item_id in reachable {
            for transaction in self.storage.transactions.for_item(item_id)? {
                if transaction.expense {
                    total += transaction.amount;
                } else {
                    total -= transaction.amount;
                }
            }
        }
        Ok(total)
    }

    /// Budgeted amount minus net spending for an instance
    pub fn total_remaining(&self, id: ItemId) -> BudgetResult<Money> {
        let item = self
            .storage
            .items
            .get(id)?
            .ok_or_else(|| BudgetError::item_not_found(id.to_string()))?;
        Ok(item.amount - self.total_spent(id)?)
    }

    /// The payee of the most recent transaction against an item, if any
    pub fn most_recent_payee(&self, id: ItemId) -> BudgetResult<Option<Payee>> {
        let transactions = self.storage.transactions.for_item(id)?;
        match transactions.last() {
            Some(transaction) => self.storage.payees.get(transaction.payee_id),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::models::{Category, Payee, Transaction};
    use crate::services::month::MonthService;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seed_category(storage: &Storage, name: &str) -> Category {
        let category = Category::new(name);
        storage.categories.upsert(category.clone()).unwrap();
        category
    }

    #[test]
    fn test_create_template_orders_within_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ItemService::new(&storage);
        let housing = seed_category(&storage, "Housing");
        let savings = seed_category(&storage, "Savings");

        let rent = service.create_template("Rent", housing.id).unwrap();
        let power = service.create_template("Power", housing.id).unwrap();
        let invest = service.create_template("Investing", savings.id).unwrap();

        assert_eq!(rent.sort_order, 0);
        assert_eq!(power.sort_order, 1);
        assert_eq!(invest.sort_order, 0);
    }

    #[test]
    fn test_create_instance_backfills_other_months() {
        let (_temp_dir, storage) = create_test_storage();
        let items = ItemService::new(&storage);
        let months = MonthService::new(&storage);
        let category = seed_category(&storage, "Housing");

        let march = months.find_or_create(date(2024, 3, 1)).unwrap();
        let april = months.find_or_create(date(2024, 4, 1)).unwrap();

        let template = items.create_template("Rent", category.id).unwrap();
        let instance = items
            .create_instance(template.id, march.id, Money::from_cents(120000), true)
            .unwrap();

        assert_eq!(instance.amount.cents(), 120000);

        let backfilled = storage
            .items
            .instance_for(april.id, template.id)
            .unwrap()
            .unwrap();
        assert!(backfilled.amount.is_zero());
    }

    #[test]
    fn test_create_instance_reuses_seeded_zero_instance() {
        let (_temp_dir, storage) = create_test_storage();
        let items = ItemService::new(&storage);
        let months = MonthService::new(&storage);
        let category = seed_category(&storage, "Housing");

        let template = items.create_template("Rent", category.id).unwrap();
        // Month creation after the template exists seeds a zero instance
        let march = months.find_or_create(date(2024, 3, 1)).unwrap();

        let instance = items
            .create_instance(template.id, march.id, Money::from_cents(5000), false)
            .unwrap();

        assert_eq!(storage.items.in_month(march.id).unwrap().len(), 1);
        assert_eq!(instance.amount.cents(), 5000);
    }

    #[test]
    fn test_edit_propagates_name_but_not_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let items = ItemService::new(&storage);
        let months = MonthService::new(&storage);
        let category = seed_category(&storage, "Housing");

        let template = items.create_template("Rent", category.id).unwrap();
        let march = months.find_or_create(date(2024, 3, 1)).unwrap();
        let april = months.find_or_create(date(2024, 4, 1)).unwrap();

        let march_instance = storage
            .items
            .instance_for(march.id, template.id)
            .unwrap()
            .unwrap();

        items
            .edit(
                march_instance.id,
                Some("Mortgage"),
                None,
                Some(Money::from_cents(150000)),
            )
            .unwrap();

        let template = storage.items.get(template.id).unwrap().unwrap();
        assert_eq!(template.name, "Mortgage");

        let april_instance = storage
            .items
            .instance_for(april.id, template.id)
            .unwrap()
            .unwrap();
        assert_eq!(april_instance.name, "Mortgage");
        assert!(april_instance.amount.is_zero());

        let march_instance = storage.items.get(march_instance.id).unwrap().unwrap();
        assert_eq!(march_instance.amount.cents(), 150000);
    }

    #[test]
    fn test_edit_category_moves_whole_family() {
        let (_temp_dir, storage) = create_test_storage();
        let items = ItemService::new(&storage);
        let months = MonthService::new(&storage);
        let housing = seed_category(&storage, "Housing");
        let savings = seed_category(&storage, "Savings");

        let template = items.create_template("Rent", housing.id).unwrap();
        let march = months.find_or_create(date(2024, 3, 1)).unwrap();
        let instance = storage
            .items
            .instance_for(march.id, template.id)
            .unwrap()
            .unwrap();

        items.edit(instance.id, None, Some(savings.id), None).unwrap();

        assert_eq!(
            storage.items.get(template.id).unwrap().unwrap().category_id,
            savings.id
        );
        assert_eq!(
            storage.items.get(instance.id).unwrap().unwrap().category_id,
            savings.id
        );
    }

    #[test]
    fn test_edit_amount_rejects_template() {
        let (_temp_dir, storage) = create_test_storage();
        let items = ItemService::new(&storage);
        let category = seed_category(&storage, "Housing");

        let template = items.create_template("Rent", category.id).unwrap();
        let result = items.edit_amount(template.id, Money::from_cents(100));
        assert!(matches!(result, Err(BudgetError::Validation(_))));
    }

    #[test]
    fn test_delete_instance_cascades_via_template() {
        let (_temp_dir, storage) = create_test_storage();
        let items = ItemService::new(&storage);
        let months = MonthService::new(&storage);
        let category = seed_category(&storage, "Housing");

        let template = items.create_template("Rent", category.id).unwrap();
        let march = months.find_or_create(date(2024, 3, 1)).unwrap();
        let april = months.find_or_create(date(2024, 4, 1)).unwrap();
        let march_instance = storage
            .items
            .instance_for(march.id, template.id)
            .unwrap()
            .unwrap();

        let payee = Payee::new("Landlord");
        storage.payees.upsert(payee.clone()).unwrap();
        storage
            .transactions
            .upsert(Transaction::new(
                march_instance.id,
                payee.id,
                Money::from_cents(1000),
                "",
                date(2024, 3, 5),
                true,
            ))
            .unwrap();

        // Deleting one month's instance removes the template, every
        // instance, and all of their transactions
        items.delete(march_instance.id).unwrap();

        assert_eq!(storage.items.count().unwrap(), 0);
        assert_eq!(storage.transactions.count().unwrap(), 0);
        assert!(storage
            .items
            .instance_for(april.id, template.id)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_validate() {
        let (_temp_dir, storage) = create_test_storage();
        let items = ItemService::new(&storage);

        assert!(items.validate(Some("Rent"), Some("1200.50")));
        assert!(items.validate(None, None));
        assert!(!items.validate(Some("  "), None));
        assert!(!items.validate(None, Some("abc")));
        assert!(!items.validate(None, Some("1.\u{20AC}5")));
    }

    #[test]
    fn test_spent_and_remaining() {
        let (_temp_dir, storage) = create_test_storage();
        let items = ItemService::new(&storage);
        let months = MonthService::new(&storage);
        let category = seed_category(&storage, "Housing");

        let template = items.create_template("Rent", category.id).unwrap();
        let march = months.find_or_create(date(2024, 3, 1)).unwrap();
        let instance = items
            .create_instance(template.id, march.id, Money::from_cents(120000), false)
            .unwrap();

        let payee = Payee::new("Landlord");
        storage.payees.upsert(payee.clone()).unwrap();
        storage
            .transactions
            .upsert(Transaction::new(
                instance.id,
                payee.id,
                Money::from_cents(45000),
                "first half",
                date(2024, 3, 5),
                true,
            ))
            .unwrap();

        assert_eq!(items.total_spent(instance.id).unwrap().cents(), 45000);
        assert_eq!(items.total_remaining(instance.id).unwrap().cents(), 75000);

        let recent = items.most_recent_payee(instance.id).unwrap().unwrap();
        assert_eq!(recent.name, "Landlord");
    }

    #[test]
    fn test_template_spent_aggregates_all_months() {
        let (_temp_dir, storage) = create_test_storage();
        let items = ItemService::new(&storage);
        let months = MonthService::new(&storage);
        let category = seed_category(&storage, "Housing");

        let template = items.create_template("Rent", category.id).unwrap();
        let march = months.find_or_create(date(2024, 3, 1)).unwrap();
        let april = months.find_or_create(date(2024, 4, 1)).unwrap();

        let march_instance = storage
            .items
            .instance_for(march.id, template.id)
            .unwrap()
            .unwrap();
        let april_instance = storage
            .items
            .instance_for(april.id, template.id)
            .unwrap()
            .unwrap();

        let payee = Payee::new("Landlord");
        storage.payees.upsert(payee.clone()).unwrap();
        storage
            .transactions
            .upsert(Transaction::new(
                march_instance.id,
                payee.id,
                Money::from_cents(120000),
                "",
                date(2024, 3, 1),
                true,
            ))
            .unwrap();
        storage
            .transactions
            .upsert(Transaction::new(
                april_instance.id,
                payee.id,
                Money::from_cents(125000),
                "",
                date(2024, 4, 1),
                true,
            ))
            .unwrap();

        assert_eq!(items.total_spent(template.id).unwrap().cents(), 245000);
        assert_eq!(items.total_spent(march_instance.id).unwrap().cents(), 120000);
    }

    #[test]
    fn test_reorder_mirrors_instances() {
        let (_temp_dir, storage) = create_test_storage();
        let items = ItemService::new(&storage);
        let months = MonthService::new(&storage);
        let category = seed_category(&storage, "Housing");

        let rent = items.create_template("Rent", category.id).unwrap();
        let power = items.create_template("Power", category.id).unwrap();
        let march = months.find_or_create(date(2024, 3, 1)).unwrap();

        items.reorder(&[power.id, rent.id]).unwrap();

        assert_eq!(storage.items.get(power.id).unwrap().unwrap().sort_order, 0);
        assert_eq!(storage.items.get(rent.id).unwrap().unwrap().sort_order, 1);

        let instance = storage
            .items
            .instance_for(march.id, rent.id)
            .unwrap()
            .unwrap();
        assert_eq!(instance.sort_order, 1);
    }
}

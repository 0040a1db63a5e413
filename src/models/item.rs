//! Budget item model
//!
//! An item is either a template (the recurring budget-line definition) or a
//! monthly instance of a template. The two roles share one shape; the role is
//! a tagged enum so there is no ambiguity about which fields are meaningful
//! in which state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ItemId, MonthId};
use super::money::Money;

/// Role of a budget item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ItemRole {
    /// The recurring budget-line definition, independent of any month
    Template,

    /// One month's occurrence of a template
    Instance {
        /// The template this instance was materialized from
        template_id: ItemId,
        /// The month this instance belongs to
        month_id: MonthId,
    },
}

/// A budget line item, either a template or a monthly instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,

    /// Display name (kept in sync between a template and its instances)
    pub name: String,

    /// Budgeted amount; independently editable per instance, always zero on
    /// templates
    pub amount: Money,

    /// Ordering number, meaningful for templates within their category
    pub sort_order: i32,

    /// Owning category
    pub category_id: CategoryId,

    /// Template or instance role
    #[serde(flatten)]
    pub role: ItemRole,

    /// When this item was created
    pub created_at: DateTime<Utc>,

    /// When this item was last modified
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Create a new template item
    pub fn new_template(name: impl Into<String>, category_id: CategoryId) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            name: name.into(),
            amount: Money::zero(),
            sort_order: 0,
            category_id,
            role: ItemRole::Template,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a monthly instance of a template, copying name and category
    pub fn new_instance(template: &Item, month_id: MonthId, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            name: template.name.clone(),
            amount,
            sort_order: template.sort_order,
            category_id: template.category_id,
            role: ItemRole::Instance {
                template_id: template.id,
                month_id,
            },
            created_at: now,
            updated_at: now,
        }
    }

    /// True if this item is a template
    pub fn is_template(&self) -> bool {
        matches!(self.role, ItemRole::Template)
    }

    /// The template this instance descends from, if any
    pub fn template_id(&self) -> Option<ItemId> {
        match self.role {
            ItemRole::Template => None,
            ItemRole::Instance { template_id, .. } => Some(template_id),
        }
    }

    /// The month this instance belongs to, if any
    pub fn month_id(&self) -> Option<MonthId> {
        match self.role {
            ItemRole::Template => None,
            ItemRole::Instance { month_id, .. } => Some(month_id),
        }
    }

    /// Validate the item
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Item name cannot be empty".into());
        }
        Ok(())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_template() {
        let item = Item::new_template("Rent", CategoryId::new());
        assert!(item.is_template());
        assert!(item.template_id().is_none());
        assert!(item.month_id().is_none());
        assert!(item.amount.is_zero());
    }

    #[test]
    fn test_new_instance_copies_template_fields() {
        let mut template = Item::new_template("Groceries", CategoryId::new());
        template.sort_order = 3;

        let month_id = MonthId::new();
        let instance = Item::new_instance(&template, month_id, Money::from_cents(40000));

        assert!(!instance.is_template());
        assert_eq!(instance.name, "Groceries");
        assert_eq!(instance.category_id, template.category_id);
        assert_eq!(instance.template_id(), Some(template.id));
        assert_eq!(instance.month_id(), Some(month_id));
        assert_eq!(instance.amount.cents(), 40000);
    }

    #[test]
    fn test_validate_empty_name() {
        let item = Item::new_template("", CategoryId::new());
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_role_serialization() {
        let template = Item::new_template("Rent", CategoryId::new());
        let json = serde_json::to_string(&template).unwrap();
        assert!(json.contains("\"role\":\"template\""));

        let instance = Item::new_instance(&template, MonthId::new(), Money::zero());
        let json = serde_json::to_string(&instance).unwrap();
        let deserialized: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.template_id(), Some(template.id));
    }
}

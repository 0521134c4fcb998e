//! Inventory Operations

use super::{DataStore, StoreError, StoreResult, next_id};
use crate::money;
use crate::storage::INVENTORY;
use shared::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use shared::util::today_string;

fn validate_create(data: &InventoryItemCreate) -> StoreResult<()> {
    if data.name.trim().is_empty() {
        return Err(StoreError::Validation("name is required".into()));
    }
    money::require_non_negative(data.price, "price")?;
    if data.quantity < 0 {
        return Err(StoreError::Validation(format!(
            "quantity must be non-negative, got {}",
            data.quantity
        )));
    }
    if data.reorder_level < 0 {
        return Err(StoreError::Validation(format!(
            "reorder_level must be non-negative, got {}",
            data.reorder_level
        )));
    }
    Ok(())
}

fn validate_update(data: &InventoryItemUpdate) -> StoreResult<()> {
    if let Some(ref name) = data.name
        && name.trim().is_empty()
    {
        return Err(StoreError::Validation("name must not be empty".into()));
    }
    if let Some(price) = data.price {
        money::require_non_negative(price, "price")?;
    }
    if let Some(quantity) = data.quantity
        && quantity < 0
    {
        return Err(StoreError::Validation(format!(
            "quantity must be non-negative, got {quantity}"
        )));
    }
    if let Some(reorder_level) = data.reorder_level
        && reorder_level < 0
    {
        return Err(StoreError::Validation(format!(
            "reorder_level must be non-negative, got {reorder_level}"
        )));
    }
    Ok(())
}

impl DataStore {
    /// All inventory items, in insertion order
    pub fn inventory(&self) -> StoreResult<Vec<InventoryItem>> {
        self.load(INVENTORY)
    }

    /// Find an inventory item by id
    pub fn inventory_item(&self, id: i64) -> StoreResult<Option<InventoryItem>> {
        Ok(self.inventory()?.into_iter().find(|item| item.id == id))
    }

    /// Add an inventory item, assigning the next id and stamping the
    /// update date. Returns the stored record.
    pub fn add_inventory_item(&self, data: InventoryItemCreate) -> StoreResult<InventoryItem> {
        validate_create(&data)?;

        let mut inventory = self.inventory()?;
        let item = InventoryItem {
            id: next_id(inventory.iter().map(|i| i.id)),
            name: data.name,
            category: data.category,
            sku: data.sku,
            price: data.price,
            quantity: data.quantity,
            reorder_level: data.reorder_level,
            supplier: data.supplier,
            description: data.description,
            last_updated: today_string(),
        };
        inventory.push(item.clone());
        self.save(INVENTORY, &inventory)?;

        tracing::debug!(id = item.id, name = %item.name, "Inventory item added");
        Ok(item)
    }

    /// Patch an inventory item: supplied fields overwrite, absent fields
    /// are retained, and the update date is refreshed. `Ok(None)` when the
    /// id is unknown; the collection is left untouched in that case.
    pub fn update_inventory_item(
        &self,
        id: i64,
        data: InventoryItemUpdate,
    ) -> StoreResult<Option<InventoryItem>> {
        validate_update(&data)?;

        let mut inventory = self.inventory()?;
        let Some(item) = inventory.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };

        if let Some(name) = data.name {
            item.name = name;
        }
        if let Some(category) = data.category {
            item.category = category;
        }
        if let Some(sku) = data.sku {
            item.sku = Some(sku);
        }
        if let Some(price) = data.price {
            item.price = price;
        }
        if let Some(quantity) = data.quantity {
            item.quantity = quantity;
        }
        if let Some(reorder_level) = data.reorder_level {
            item.reorder_level = reorder_level;
        }
        if let Some(supplier) = data.supplier {
            item.supplier = Some(supplier);
        }
        if let Some(description) = data.description {
            item.description = Some(description);
        }
        item.last_updated = today_string();

        let updated = item.clone();
        self.save(INVENTORY, &inventory)?;
        Ok(Some(updated))
    }

    /// Delete an inventory item. Returns whether a record was removed.
    /// Historical sales referencing the item are left as they are.
    pub fn delete_inventory_item(&self, id: i64) -> StoreResult<bool> {
        let mut inventory = self.inventory()?;
        let before = inventory.len();
        inventory.retain(|item| item.id != id);
        if inventory.len() == before {
            return Ok(false);
        }
        self.save(INVENTORY, &inventory)?;

        tracing::debug!(id, "Inventory item deleted");
        Ok(true)
    }
}

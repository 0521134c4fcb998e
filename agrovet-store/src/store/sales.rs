//! Sales Operations
//!
//! `record_sale` is the one place the store acts as a unit of work across
//! collections: the sale append, the stock decrements, and the customer
//! stats update are committed in a single storage transaction.

use super::{DataStore, StoreError, StoreResult, next_id};
use crate::money;
use crate::storage::{CUSTOMERS, INVENTORY, SALES};
use chrono::NaiveDate;
use shared::models::{Sale, SaleDraft, SaleUpdate};
use shared::util::today_string;

fn validate_draft(draft: &SaleDraft) -> StoreResult<()> {
    if draft.items.is_empty() {
        return Err(StoreError::Validation("a sale needs at least one line".into()));
    }
    for line in &draft.items {
        if line.quantity <= 0 {
            return Err(StoreError::Validation(format!(
                "line quantity must be positive, got {}",
                line.quantity
            )));
        }
        money::require_non_negative(line.unit_price, "unit_price")?;
    }
    if let Some(ref date) = draft.date
        && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err()
    {
        return Err(StoreError::Validation(format!("Invalid date format: {date}")));
    }
    Ok(())
}

impl DataStore {
    /// All sales, in insertion order
    pub fn sales(&self) -> StoreResult<Vec<Sale>> {
        self.load(SALES)
    }

    /// Find a sale by id
    pub fn sale(&self, id: i64) -> StoreResult<Option<Sale>> {
        Ok(self.sales()?.into_iter().find(|s| s.id == id))
    }

    /// Record a sale
    ///
    /// Assigns the next sale id, stamps the date (draft date or today) and
    /// computes the total from the lines. For each line the referenced
    /// item's stock is decremented and its update date refreshed; the
    /// customer's last purchase and lifetime spend are updated. All three
    /// collections are committed together; there is no partial write.
    ///
    /// Dangling references do not fail the sale: unknown product ids skip
    /// the decrement and an unknown customer id skips the stats update,
    /// each with a logged warning. Stock is not clamped at zero.
    pub fn record_sale(&self, draft: SaleDraft) -> StoreResult<Sale> {
        validate_draft(&draft)?;

        let mut sales = self.sales()?;
        let mut inventory = self.inventory()?;
        let mut customers = self.customers()?;

        let date = draft.date.unwrap_or_else(today_string);
        let sale = Sale {
            id: next_id(sales.iter().map(|s| s.id)),
            date: date.clone(),
            customer_id: draft.customer_id,
            total: money::lines_total(&draft.items),
            items: draft.items,
            payment_method: draft.payment_method,
            status: draft.status.unwrap_or_else(|| "Completed".to_string()),
        };

        for line in &sale.items {
            match inventory.iter_mut().find(|item| item.id == line.product_id) {
                Some(item) => {
                    item.quantity -= line.quantity;
                    item.last_updated = date.clone();
                    if item.quantity < 0 {
                        tracing::warn!(
                            product_id = item.id,
                            quantity = item.quantity,
                            "Stock went negative"
                        );
                    }
                }
                None => {
                    tracing::warn!(
                        product_id = line.product_id,
                        sale_id = sale.id,
                        "Sale references unknown product"
                    );
                }
            }
        }

        match customers.iter_mut().find(|c| c.id == sale.customer_id) {
            Some(customer) => {
                customer.last_purchase = Some(date);
                customer.total_spent = money::add(customer.total_spent, sale.total);
            }
            None => {
                tracing::warn!(
                    customer_id = sale.customer_id,
                    sale_id = sale.id,
                    "Sale references unknown customer"
                );
            }
        }

        sales.push(sale.clone());

        let sales_bytes = Self::encode(&sales)?;
        let inventory_bytes = Self::encode(&inventory)?;
        let customers_bytes = Self::encode(&customers)?;
        self.storage().write_many(&[
            (SALES, sales_bytes.as_slice()),
            (INVENTORY, inventory_bytes.as_slice()),
            (CUSTOMERS, customers_bytes.as_slice()),
        ])?;

        tracing::info!(sale_id = sale.id, total = sale.total, "Sale recorded");
        Ok(sale)
    }

    /// Patch a sale's descriptive fields: date, payment method, status.
    /// Line items are frozen once recorded, and stock and customer
    /// accumulators are not recomputed. `Ok(None)` when the id is unknown.
    pub fn update_sale(&self, id: i64, data: SaleUpdate) -> StoreResult<Option<Sale>> {
        if let Some(ref date) = data.date
            && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err()
        {
            return Err(StoreError::Validation(format!("Invalid date format: {date}")));
        }

        let mut sales = self.sales()?;
        let Some(sale) = sales.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };

        if let Some(date) = data.date {
            sale.date = date;
        }
        if let Some(payment_method) = data.payment_method {
            sale.payment_method = payment_method;
        }
        if let Some(status) = data.status {
            sale.status = status;
        }

        let updated = sale.clone();
        self.save(SALES, &sales)?;
        Ok(Some(updated))
    }

    /// Delete a sale. Returns whether a record was removed.
    ///
    /// Stock and customer spend are not rolled back; the accumulators are
    /// maintained imperatively at sale time only.
    pub fn delete_sale(&self, id: i64) -> StoreResult<bool> {
        let mut sales = self.sales()?;
        let before = sales.len();
        sales.retain(|s| s.id != id);
        if sales.len() == before {
            return Ok(false);
        }
        self.save(SALES, &sales)?;

        tracing::debug!(id, "Sale deleted");
        Ok(true)
    }
}

//! Derived report aggregates
//!
//! Pure functions over current collection state; nothing here persists.
//! The same functions are exposed as `DataStore` methods for callers that
//! want the aggregates over live data.

use crate::money;
use crate::store::{DataStore, StoreError, StoreResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{Customer, InventoryItem, Sale};
use std::collections::BTreeMap;

/// Aggregated sales for one product
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSales {
    pub product_id: i64,
    /// Current product name; "Unknown product" when the item is gone
    pub name: String,
    pub total_quantity: i64,
    pub total_value: f64,
}

/// Summary over a set of sales
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    pub transaction_count: usize,
    pub revenue: f64,
    pub unique_customers: usize,
    pub average_sale: f64,
}

/// Sales grouped by day
#[derive(Debug, Clone, PartialEq)]
pub struct DailySales {
    pub date: String,
    pub count: usize,
    pub total: f64,
}

/// Per-category stock breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub category: String,
    pub item_count: usize,
    pub stock_value: f64,
}

/// Stock level distribution across the inventory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockHealth {
    pub out_of_stock: usize,
    pub low_stock: usize,
    pub healthy: usize,
    pub overstocked: usize,
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Join helper: current product name with a fallback for deleted items
pub fn product_name(inventory: &[InventoryItem], product_id: i64) -> String {
    inventory
        .iter()
        .find(|item| item.id == product_id)
        .map(|item| item.name.clone())
        .unwrap_or_else(|| "Unknown product".to_string())
}

/// Join helper: current customer name with a fallback for deleted customers
pub fn customer_name(customers: &[Customer], customer_id: i64) -> String {
    customers
        .iter()
        .find(|c| c.id == customer_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "Unknown customer".to_string())
}

/// Total stock value: Σ quantity × price, rounded to 2 places
pub fn inventory_value(inventory: &[InventoryItem]) -> f64 {
    money::to_f64(
        inventory
            .iter()
            .map(|item| Decimal::from(item.quantity) * money::to_decimal(item.price))
            .sum(),
    )
}

/// Items at or below their reorder threshold, out-of-stock included
pub fn low_stock_items(inventory: &[InventoryItem]) -> Vec<InventoryItem> {
    inventory
        .iter()
        .filter(|item| item.quantity <= item.reorder_level)
        .cloned()
        .collect()
}

fn aggregate_product_sales(sales: &[Sale], inventory: &[InventoryItem]) -> Vec<ProductSales> {
    let mut totals: Vec<ProductSales> = Vec::new();
    for sale in sales {
        for line in &sale.items {
            let value = money::to_f64(money::line_subtotal(line));
            match totals.iter_mut().find(|e| e.product_id == line.product_id) {
                Some(entry) => {
                    entry.total_quantity += line.quantity;
                    entry.total_value = money::add(entry.total_value, value);
                }
                None => totals.push(ProductSales {
                    product_id: line.product_id,
                    name: product_name(inventory, line.product_id),
                    total_quantity: line.quantity,
                    total_value: value,
                }),
            }
        }
    }
    totals
}

/// Quantity sold per product across the given sales, joined to current
/// product names, descending by quantity. The sort is stable, so ties keep
/// first-seen order. Truncated to `limit`.
pub fn top_selling_products(
    sales: &[Sale],
    inventory: &[InventoryItem],
    limit: usize,
) -> Vec<ProductSales> {
    let mut totals = aggregate_product_sales(sales, inventory);
    totals.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
    totals.truncate(limit);
    totals
}

/// Like [`top_selling_products`], but ranked by revenue
pub fn top_products_by_revenue(
    sales: &[Sale],
    inventory: &[InventoryItem],
    limit: usize,
) -> Vec<ProductSales> {
    let mut totals = aggregate_product_sales(sales, inventory);
    totals.sort_by(|a, b| b.total_value.total_cmp(&a.total_value));
    totals.truncate(limit);
    totals
}

/// Sales whose date falls inside the inclusive range; a missing bound is
/// unbounded on that side. Sales with unparseable dates are excluded.
pub fn sales_in_date_range(sales: &[Sale], start: Option<&str>, end: Option<&str>) -> Vec<Sale> {
    let start = start.and_then(parse_date);
    let end = end.and_then(parse_date);
    sales
        .iter()
        .filter(|sale| {
            let Some(date) = parse_date(&sale.date) else {
                return false;
            };
            start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
        })
        .cloned()
        .collect()
}

/// Transaction count, revenue, unique customer count and average sale
/// amount over the given sales
pub fn sales_summary(sales: &[Sale]) -> SalesSummary {
    let revenue = money::to_f64(sales.iter().map(|s| money::to_decimal(s.total)).sum());
    let mut customer_ids: Vec<i64> = sales.iter().map(|s| s.customer_id).collect();
    customer_ids.sort_unstable();
    customer_ids.dedup();

    let average_sale = if sales.is_empty() {
        0.0
    } else {
        money::round_money(revenue / sales.len() as f64)
    };

    SalesSummary {
        transaction_count: sales.len(),
        revenue,
        unique_customers: customer_ids.len(),
        average_sale,
    }
}

/// Per-date transaction count and total, sorted by date
pub fn sales_by_day(sales: &[Sale]) -> Vec<DailySales> {
    let mut days: BTreeMap<String, (usize, Decimal)> = BTreeMap::new();
    for sale in sales {
        let entry = days.entry(sale.date.clone()).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += money::to_decimal(sale.total);
    }
    days.into_iter()
        .map(|(date, (count, total))| DailySales {
            date,
            count,
            total: money::to_f64(total),
        })
        .collect()
}

/// Per-category item count and stock value, descending by value
pub fn category_distribution(inventory: &[InventoryItem]) -> Vec<CategoryBreakdown> {
    let mut categories: Vec<CategoryBreakdown> = Vec::new();
    for item in inventory {
        let value = money::to_f64(Decimal::from(item.quantity) * money::to_decimal(item.price));
        match categories.iter_mut().find(|c| c.category == item.category) {
            Some(entry) => {
                entry.item_count += 1;
                entry.stock_value = money::add(entry.stock_value, value);
            }
            None => categories.push(CategoryBreakdown {
                category: item.category.clone(),
                item_count: 1,
                stock_value: value,
            }),
        }
    }
    categories.sort_by(|a, b| b.stock_value.total_cmp(&a.stock_value));
    categories
}

/// Bucket every item by stock level: out of stock (0), low (at or below the
/// reorder threshold), healthy (up to twice the threshold), overstocked
pub fn stock_health(inventory: &[InventoryItem]) -> StockHealth {
    let mut health = StockHealth::default();
    for item in inventory {
        if item.quantity == 0 {
            health.out_of_stock += 1;
        } else if item.quantity <= item.reorder_level {
            health.low_stock += 1;
        } else if item.quantity <= item.reorder_level * 2 {
            health.healthy += 1;
        } else {
            health.overstocked += 1;
        }
    }
    health
}

// ========== DataStore Wrappers ==========

fn validate_bound(bound: Option<&str>, which: &str) -> StoreResult<()> {
    if let Some(date) = bound
        && parse_date(date).is_none()
    {
        return Err(StoreError::Validation(format!(
            "Invalid {which} date format: {date}"
        )));
    }
    Ok(())
}

impl DataStore {
    /// Total stock value of the current inventory
    pub fn inventory_value(&self) -> StoreResult<f64> {
        Ok(inventory_value(&self.inventory()?))
    }

    /// Items currently at or below their reorder threshold
    pub fn low_stock_items(&self) -> StoreResult<Vec<InventoryItem>> {
        Ok(low_stock_items(&self.inventory()?))
    }

    /// Top sellers by quantity across all recorded sales
    pub fn top_selling_products(&self, limit: usize) -> StoreResult<Vec<ProductSales>> {
        Ok(top_selling_products(
            &self.sales()?,
            &self.inventory()?,
            limit,
        ))
    }

    /// Sales within the inclusive date range; bounds must be YYYY-MM-DD
    /// when present, and a missing bound is unbounded on that side
    pub fn sales_in_range(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> StoreResult<Vec<Sale>> {
        validate_bound(start, "start")?;
        validate_bound(end, "end")?;
        Ok(sales_in_date_range(&self.sales()?, start, end))
    }

    /// Stock level distribution of the current inventory
    pub fn stock_health(&self) -> StoreResult<StockHealth> {
        Ok(stock_health(&self.inventory()?))
    }

    /// Per-category breakdown of the current inventory
    pub fn category_distribution(&self) -> StoreResult<Vec<CategoryBreakdown>> {
        Ok(category_distribution(&self.inventory()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::SaleLine;

    fn item(id: i64, category: &str, price: f64, quantity: i64, reorder: i64) -> InventoryItem {
        InventoryItem {
            id,
            name: format!("Item {id}"),
            category: category.to_string(),
            sku: None,
            price,
            quantity,
            reorder_level: reorder,
            supplier: None,
            description: None,
            last_updated: "2025-05-10".to_string(),
        }
    }

    fn sale(id: i64, date: &str, customer_id: i64, items: Vec<SaleLine>) -> Sale {
        Sale {
            id,
            date: date.to_string(),
            customer_id,
            total: money::lines_total(&items),
            items,
            payment_method: "Cash".to_string(),
            status: "Completed".to_string(),
        }
    }

    fn line(product_id: i64, quantity: i64, unit_price: f64) -> SaleLine {
        SaleLine {
            product_id,
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_inventory_value_is_order_independent() {
        let mut inventory = vec![
            item(1, "Feed", 25.50, 150, 30),
            item(2, "Medicine", 45.00, 75, 20),
            item(3, "Seeds", 5.75, 300, 50),
        ];
        // 150*25.50 + 75*45.00 + 300*5.75 = 3825 + 3375 + 1725
        let expected = 8925.0;

        assert_eq!(inventory_value(&inventory), expected);
        inventory.reverse();
        assert_eq!(inventory_value(&inventory), expected);
    }

    #[test]
    fn test_low_stock_boundaries() {
        let inventory = vec![
            item(1, "Feed", 1.0, 0, 10),  // out of stock
            item(2, "Feed", 1.0, 10, 10), // exactly at threshold
            item(3, "Feed", 1.0, 11, 10), // above threshold
        ];

        let low = low_stock_items(&inventory);
        let ids: Vec<i64> = low.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_top_selling_products_ordering() {
        let inventory = vec![
            item(1, "Feed", 1.0, 100, 10),
            item(2, "Feed", 1.0, 100, 10),
            item(3, "Feed", 1.0, 100, 10),
        ];
        // A (#1): 10 units across 2 sales, B (#2): 15 across 1, C (#3): 2
        let sales = vec![
            sale(1, "2025-05-01", 1, vec![line(1, 6, 1.0), line(3, 2, 1.0)]),
            sale(2, "2025-05-02", 1, vec![line(1, 4, 1.0), line(2, 15, 1.0)]),
        ];

        let top = top_selling_products(&sales, &inventory, 3);
        let ids: Vec<i64> = top.iter().map(|p| p.product_id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(top[0].total_quantity, 15);
        assert_eq!(top[1].total_quantity, 10);
    }

    #[test]
    fn test_top_selling_products_ties_keep_input_order() {
        let sales = vec![sale(
            1,
            "2025-05-01",
            1,
            vec![line(7, 5, 1.0), line(8, 5, 1.0)],
        )];

        let top = top_selling_products(&sales, &[], 5);
        let ids: Vec<i64> = top.iter().map(|p| p.product_id).collect();
        assert_eq!(ids, vec![7, 8]);
    }

    #[test]
    fn test_top_selling_truncates_and_joins_names() {
        let inventory = vec![item(1, "Feed", 1.0, 100, 10)];
        let sales = vec![sale(
            1,
            "2025-05-01",
            1,
            vec![line(1, 3, 1.0), line(99, 1, 1.0)],
        )];

        let top = top_selling_products(&sales, &inventory, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "Item 1");

        let all = top_selling_products(&sales, &inventory, 10);
        assert_eq!(all[1].name, "Unknown product");
    }

    #[test]
    fn test_top_products_by_revenue() {
        let sales = vec![sale(
            1,
            "2025-05-01",
            1,
            // #1: 10 units at 1.00 = 10.00, #2: 2 units at 45.00 = 90.00
            vec![line(1, 10, 1.0), line(2, 2, 45.0)],
        )];

        let top = top_products_by_revenue(&sales, &[], 2);
        assert_eq!(top[0].product_id, 2);
        assert_eq!(top[0].total_value, 90.0);
    }

    #[test]
    fn test_sales_in_date_range_inclusive() {
        let sales = vec![
            sale(1, "2025-05-08", 1, vec![line(1, 1, 1.0)]),
            sale(2, "2025-05-10", 1, vec![line(1, 1, 1.0)]),
            sale(3, "2025-05-12", 1, vec![line(1, 1, 1.0)]),
        ];

        let in_range = sales_in_date_range(&sales, Some("2025-05-08"), Some("2025-05-10"));
        let ids: Vec<i64> = in_range.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_sales_in_date_range_open_bounds() {
        let sales = vec![
            sale(1, "2025-05-08", 1, vec![line(1, 1, 1.0)]),
            sale(2, "2025-05-12", 1, vec![line(1, 1, 1.0)]),
        ];

        assert_eq!(sales_in_date_range(&sales, None, None).len(), 2);
        assert_eq!(
            sales_in_date_range(&sales, Some("2025-05-10"), None)
                .iter()
                .map(|s| s.id)
                .collect::<Vec<_>>(),
            vec![2]
        );
        assert_eq!(
            sales_in_date_range(&sales, None, Some("2025-05-10"))
                .iter()
                .map(|s| s.id)
                .collect::<Vec<_>>(),
            vec![1]
        );
    }

    #[test]
    fn test_sales_in_date_range_skips_unparseable_dates() {
        let sales = vec![
            sale(1, "not-a-date", 1, vec![line(1, 1, 1.0)]),
            sale(2, "2025-05-10", 1, vec![line(1, 1, 1.0)]),
        ];

        let in_range = sales_in_date_range(&sales, None, None);
        assert_eq!(in_range.len(), 1);
        assert_eq!(in_range[0].id, 2);
    }

    #[test]
    fn test_sales_summary() {
        let sales = vec![
            sale(1, "2025-05-08", 1, vec![line(1, 2, 10.0)]),
            sale(2, "2025-05-09", 2, vec![line(1, 1, 10.0)]),
            sale(3, "2025-05-09", 1, vec![line(1, 3, 10.0)]),
        ];

        let summary = sales_summary(&sales);
        assert_eq!(summary.transaction_count, 3);
        assert_eq!(summary.revenue, 60.0);
        assert_eq!(summary.unique_customers, 2);
        assert_eq!(summary.average_sale, 20.0);
    }

    #[test]
    fn test_sales_summary_empty() {
        let summary = sales_summary(&[]);
        assert_eq!(summary.transaction_count, 0);
        assert_eq!(summary.revenue, 0.0);
        assert_eq!(summary.average_sale, 0.0);
    }

    #[test]
    fn test_sales_by_day_sorted() {
        let sales = vec![
            sale(1, "2025-05-10", 1, vec![line(1, 1, 5.0)]),
            sale(2, "2025-05-08", 1, vec![line(1, 1, 3.0)]),
            sale(3, "2025-05-10", 1, vec![line(1, 1, 2.0)]),
        ];

        let days = sales_by_day(&sales);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2025-05-08");
        assert_eq!(days[0].count, 1);
        assert_eq!(days[1].date, "2025-05-10");
        assert_eq!(days[1].count, 2);
        assert_eq!(days[1].total, 7.0);
    }

    #[test]
    fn test_category_distribution() {
        let inventory = vec![
            item(1, "Feed", 10.0, 10, 5),     // 100
            item(2, "Medicine", 50.0, 10, 5), // 500
            item(3, "Feed", 5.0, 10, 5),      // 50
        ];

        let dist = category_distribution(&inventory);
        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].category, "Medicine");
        assert_eq!(dist[0].stock_value, 500.0);
        assert_eq!(dist[1].category, "Feed");
        assert_eq!(dist[1].item_count, 2);
        assert_eq!(dist[1].stock_value, 150.0);
    }

    #[test]
    fn test_stock_health_buckets() {
        let inventory = vec![
            item(1, "Feed", 1.0, 0, 10),  // out of stock
            item(2, "Feed", 1.0, 7, 10),  // low
            item(3, "Feed", 1.0, 20, 10), // healthy (exactly 2x)
            item(4, "Feed", 1.0, 21, 10), // overstocked
        ];

        let health = stock_health(&inventory);
        assert_eq!(health.out_of_stock, 1);
        assert_eq!(health.low_stock, 1);
        assert_eq!(health.healthy, 1);
        assert_eq!(health.overstocked, 1);
    }

    #[test]
    fn test_store_wrapper_validates_bounds() {
        let store = DataStore::open_in_memory().unwrap();
        assert!(matches!(
            store.sales_in_range(Some("05/10/2025"), None),
            Err(StoreError::Validation(_))
        ));
        assert!(store.sales_in_range(Some("2025-05-10"), None).is_ok());
    }
}

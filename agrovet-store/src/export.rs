//! Plain-text report rendering
//!
//! Fixed-layout reports built line by line: a title block between `=`
//! separators, summary rows with left/right aligned columns, then one block
//! per record. `write_report` puts the rendered text in a file, which is
//! the engine-side counterpart of the original dashboard's report download.

use crate::money;
use crate::reports::{self, SalesSummary};
use crate::store::{DataStore, StoreResult};
use shared::models::{Customer, InventoryItem, Sale};
use shared::util::today_string;
use std::path::Path;

/// Report width in characters
const REPORT_WIDTH: usize = 72;

/// Line-oriented text report builder
pub struct ReportBuilder {
    buf: String,
    width: usize,
}

impl ReportBuilder {
    pub fn new(width: usize) -> Self {
        Self {
            buf: String::new(),
            width,
        }
    }

    /// Append a line of text
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self.buf.push('\n');
        self
    }

    /// Append an empty line
    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Append centered text
    pub fn center(&mut self, s: &str) -> &mut Self {
        let len = s.chars().count();
        if len >= self.width {
            return self.line(s);
        }
        let padding = " ".repeat((self.width - len) / 2);
        let padded = format!("{padding}{s}");
        self.line(&padded)
    }

    /// `=` separator across the full width
    pub fn sep_double(&mut self) -> &mut Self {
        let sep = "=".repeat(self.width);
        self.line(&sep)
    }

    /// `-` separator across the full width
    pub fn sep_single(&mut self) -> &mut Self {
        let sep = "-".repeat(self.width);
        self.line(&sep)
    }

    /// Left and right aligned pair on one line; falls back to two lines
    /// when the pair does not fit
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = left.chars().count();
        let rw = right.chars().count();
        if lw + rw >= self.width {
            self.line(left);
            self.line(right)
        } else {
            let spaces = " ".repeat(self.width - lw - rw);
            let combined = format!("{left}{spaces}{right}");
            self.line(&combined)
        }
    }

    /// Consume the builder and return the rendered text
    pub fn into_text(self) -> String {
        self.buf
    }
}

fn dollars(amount: f64) -> String {
    format!("${amount:.2}")
}

fn header(b: &mut ReportBuilder, title: &str) {
    b.sep_double();
    b.center(title);
    b.center(&format!("Generated: {}", today_string()));
    b.sep_double();
    b.blank();
}

fn footer(b: &mut ReportBuilder) {
    b.sep_double();
    b.center("End of report");
}

/// Render the inventory report
pub fn inventory_report(inventory: &[InventoryItem]) -> String {
    let mut b = ReportBuilder::new(REPORT_WIDTH);
    header(&mut b, "AGROVET SUPPLY - INVENTORY REPORT");

    let low_stock = reports::low_stock_items(inventory);
    b.line_lr("Unique products:", &inventory.len().to_string());
    b.line_lr("Total stock value:", &dollars(reports::inventory_value(inventory)));
    b.line_lr("Low stock items:", &low_stock.len().to_string());
    b.blank();
    b.sep_single();

    if inventory.is_empty() {
        b.blank();
        b.center("No inventory on record");
        b.blank();
    }

    for item in inventory {
        b.blank();
        b.line(&format!("{} (#{})", item.name, item.id));
        match &item.sku {
            Some(sku) => b.line(&format!("  Category: {}    SKU: {}", item.category, sku)),
            None => b.line(&format!("  Category: {}", item.category)),
        };
        b.line(&format!(
            "  Price: {}    On hand: {}    Reorder at: {}",
            dollars(item.price),
            item.quantity,
            item.reorder_level
        ));
        if let Some(ref supplier) = item.supplier {
            b.line(&format!("  Supplier: {supplier}"));
        }
        let status = if item.quantity == 0 {
            "OUT OF STOCK"
        } else if item.quantity <= item.reorder_level {
            "LOW STOCK"
        } else {
            "In stock"
        };
        b.line(&format!("  Last updated: {}    Status: {}", item.last_updated, status));
    }

    b.blank();
    footer(&mut b);
    b.into_text()
}

/// Render the sales report for a date range
///
/// The sales slice is expected to be pre-filtered to the range; the bounds
/// are only used for the period line.
pub fn sales_report(
    sales: &[Sale],
    customers: &[Customer],
    inventory: &[InventoryItem],
    start: Option<&str>,
    end: Option<&str>,
) -> String {
    let mut b = ReportBuilder::new(REPORT_WIDTH);
    header(&mut b, "AGROVET SUPPLY - SALES REPORT");

    b.line(&format!(
        "Period: {} to {}",
        start.unwrap_or("start of records"),
        end.unwrap_or("today")
    ));
    b.blank();

    let SalesSummary {
        transaction_count,
        revenue,
        unique_customers,
        average_sale,
    } = reports::sales_summary(sales);
    b.line_lr("Transactions:", &transaction_count.to_string());
    b.line_lr("Revenue:", &dollars(revenue));
    b.line_lr("Unique customers:", &unique_customers.to_string());
    b.line_lr("Average sale:", &dollars(average_sale));
    b.blank();

    if sales.is_empty() {
        b.sep_single();
        b.blank();
        b.center("No sales in the selected period");
        b.blank();
        footer(&mut b);
        return b.into_text();
    }

    b.line("Daily totals");
    for day in reports::sales_by_day(sales) {
        b.line_lr(
            &format!("  {}", day.date),
            &format!("{} sales  {}", day.count, dollars(day.total)),
        );
    }
    b.blank();

    b.line("Top products in period");
    for (index, product) in reports::top_products_by_revenue(sales, inventory, 3)
        .iter()
        .enumerate()
    {
        b.line_lr(
            &format!("  {}. {}", index + 1, product.name),
            &dollars(product.total_value),
        );
    }
    b.blank();
    b.sep_single();

    for sale in sales {
        b.blank();
        b.line(&format!(
            "Sale #{} - {} - {}",
            sale.id,
            sale.date,
            reports::customer_name(customers, sale.customer_id)
        ));
        for line in &sale.items {
            b.line(&format!(
                "  {} x {} @ {} = {}",
                line.quantity,
                reports::product_name(inventory, line.product_id),
                dollars(line.unit_price),
                dollars(money::to_f64(money::line_subtotal(line)))
            ));
        }
        b.line(&format!(
            "  Payment: {}    Status: {}",
            sale.payment_method, sale.status
        ));
        b.line_lr("  Total:", &dollars(sale.total));
    }

    b.blank();
    footer(&mut b);
    b.into_text()
}

/// Render the customer report
pub fn customer_report(customers: &[Customer]) -> String {
    let mut b = ReportBuilder::new(REPORT_WIDTH);
    header(&mut b, "AGROVET SUPPLY - CUSTOMER REPORT");

    b.line_lr("Customers on file:", &customers.len().to_string());
    b.blank();
    b.sep_single();

    if customers.is_empty() {
        b.blank();
        b.center("No customers on record");
        b.blank();
    }

    for customer in customers {
        b.blank();
        b.line(&format!("{} (#{})", customer.name, customer.id));
        match &customer.email {
            Some(email) => b.line(&format!("  Phone: {}    Email: {}", customer.phone, email)),
            None => b.line(&format!("  Phone: {}", customer.phone)),
        };
        if let Some(ref address) = customer.address {
            b.line(&format!("  Address: {address}"));
        }
        b.line(&format!(
            "  Last purchase: {}",
            customer.last_purchase.as_deref().unwrap_or("Never")
        ));
        b.line_lr("  Total spent:", &dollars(customer.total_spent));
    }

    b.blank();
    footer(&mut b);
    b.into_text()
}

/// Render the performance metrics report
pub fn performance_report(
    inventory: &[InventoryItem],
    customers: &[Customer],
    sales: &[Sale],
) -> String {
    let mut b = ReportBuilder::new(REPORT_WIDTH);
    header(&mut b, "AGROVET SUPPLY - PERFORMANCE METRICS");

    let health = reports::stock_health(inventory);
    b.line("Inventory");
    b.line_lr("  Stock value:", &dollars(reports::inventory_value(inventory)));
    b.line_lr("  Unique products:", &inventory.len().to_string());
    b.line_lr("  Low stock items:", &health.low_stock.to_string());
    b.line_lr("  Out of stock items:", &health.out_of_stock.to_string());
    b.blank();

    let summary = reports::sales_summary(sales);
    b.line("Sales");
    b.line_lr("  Transactions to date:", &summary.transaction_count.to_string());
    b.line_lr("  Lifetime revenue:", &dollars(summary.revenue));
    b.line_lr("  Average sale:", &dollars(summary.average_sale));
    b.blank();

    b.line("Customers");
    b.line_lr("  Customers on file:", &customers.len().to_string());
    b.blank();
    b.sep_single();
    b.blank();

    b.line("Top selling products");
    let top = reports::top_selling_products(sales, inventory, 5);
    if top.is_empty() {
        b.line("  No sales data available");
    }
    for (index, product) in top.iter().enumerate() {
        b.line_lr(
            &format!("  {}. {}", index + 1, product.name),
            &format!("{} units  {}", product.total_quantity, dollars(product.total_value)),
        );
    }
    b.blank();

    b.line("Stock value by category");
    let distribution = reports::category_distribution(inventory);
    let total_value: f64 = reports::inventory_value(inventory);
    if distribution.is_empty() {
        b.line("  No inventory data available");
    }
    for category in &distribution {
        let share = if total_value > 0.0 {
            category.stock_value / total_value * 100.0
        } else {
            0.0
        };
        b.line_lr(
            &format!("  {}", category.category),
            &format!("{} ({share:.1}%)", dollars(category.stock_value)),
        );
    }

    b.blank();
    footer(&mut b);
    b.into_text()
}

/// Write a rendered report to a file
pub fn write_report(path: impl AsRef<Path>, contents: &str) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

// ========== DataStore Wrappers ==========

impl DataStore {
    /// Render the inventory report over current state
    pub fn render_inventory_report(&self) -> StoreResult<String> {
        Ok(inventory_report(&self.inventory()?))
    }

    /// Render the sales report for an inclusive date range over current
    /// state; bounds follow the same rules as `sales_in_range`
    pub fn render_sales_report(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> StoreResult<String> {
        let in_range = self.sales_in_range(start, end)?;
        Ok(sales_report(
            &in_range,
            &self.customers()?,
            &self.inventory()?,
            start,
            end,
        ))
    }

    /// Render the customer report over current state
    pub fn render_customer_report(&self) -> StoreResult<String> {
        Ok(customer_report(&self.customers()?))
    }

    /// Render the performance metrics report over current state
    pub fn render_performance_report(&self) -> StoreResult<String> {
        Ok(performance_report(
            &self.inventory()?,
            &self.customers()?,
            &self.sales()?,
        ))
    }
}

//! Demonstration data seeded on first run

use shared::models::{Customer, InventoryItem, Sale, SaleLine};

fn item(
    id: i64,
    name: &str,
    category: &str,
    quantity: i64,
    price: f64,
    supplier: &str,
    reorder_level: i64,
    last_updated: &str,
) -> InventoryItem {
    InventoryItem {
        id,
        name: name.to_string(),
        category: category.to_string(),
        sku: None,
        price,
        quantity,
        reorder_level,
        supplier: Some(supplier.to_string()),
        description: None,
        last_updated: last_updated.to_string(),
    }
}

pub fn demo_inventory() -> Vec<InventoryItem> {
    vec![
        item(1, "Animal Feed - Dairy", "Feed", 150, 25.50, "FarmSupplies Ltd", 30, "2025-05-10"),
        item(2, "Antibiotics - Livestock", "Medicine", 75, 45.00, "VetPharma Inc", 20, "2025-05-08"),
        item(3, "Pesticide - General", "Crop Care", 50, 35.75, "AgriChem Co", 15, "2025-05-12"),
        item(4, "Milking Equipment", "Equipment", 10, 120.00, "FarmTech Solutions", 5, "2025-05-01"),
        item(5, "Fertilizer - NPK", "Crop Care", 200, 30.25, "AgriChem Co", 40, "2025-05-09"),
        item(6, "Vitamins - Poultry", "Supplements", 85, 18.50, "VetPharma Inc", 25, "2025-05-07"),
        item(7, "Seeds - Maize", "Seeds", 300, 5.75, "SeedTech", 50, "2025-05-05"),
        item(8, "Dewormers - Cattle", "Medicine", 60, 42.00, "VetPharma Inc", 20, "2025-05-11"),
    ]
}

fn customer(
    id: i64,
    name: &str,
    phone: &str,
    email: &str,
    address: &str,
    last_purchase: &str,
    total_spent: f64,
) -> Customer {
    Customer {
        id,
        name: name.to_string(),
        phone: phone.to_string(),
        email: Some(email.to_string()),
        address: Some(address.to_string()),
        last_purchase: Some(last_purchase.to_string()),
        total_spent,
    }
}

pub fn demo_customers() -> Vec<Customer> {
    vec![
        customer(1, "John Farmer", "123-456-7890", "john@farm.com", "Rural Route 5", "2025-05-09", 1250.75),
        customer(2, "Sarah Fields", "234-567-8901", "sarah@fields.com", "County Road 8", "2025-05-10", 875.50),
        customer(3, "Green Acres Ltd", "345-678-9012", "info@greenacres.com", "Farm Valley, Plot 23", "2025-05-01", 5430.25),
        customer(4, "Michael Ranch", "456-789-0123", "mike@ranch.com", "Livestock Lane 12", "2025-05-08", 2340.00),
    ]
}

fn line(product_id: i64, quantity: i64, unit_price: f64) -> SaleLine {
    SaleLine {
        product_id,
        quantity,
        unit_price,
    }
}

fn sale(
    id: i64,
    date: &str,
    customer_id: i64,
    items: Vec<SaleLine>,
    total: f64,
    payment_method: &str,
) -> Sale {
    Sale {
        id,
        date: date.to_string(),
        customer_id,
        items,
        total,
        payment_method: payment_method.to_string(),
        status: "Completed".to_string(),
    }
}

pub fn demo_sales() -> Vec<Sale> {
    vec![
        sale(1, "2025-05-10", 1, vec![line(1, 5, 25.50), line(8, 2, 42.00)], 211.50, "Cash"),
        sale(2, "2025-05-10", 2, vec![line(3, 1, 35.75), line(5, 3, 30.25)], 126.50, "Credit"),
        sale(3, "2025-05-09", 3, vec![line(2, 10, 45.00), line(7, 20, 5.75)], 565.00, "Bank Transfer"),
        sale(4, "2025-05-08", 4, vec![line(1, 8, 25.50), line(4, 1, 120.00)], 324.00, "Cash"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money;

    #[test]
    fn test_seed_ids_are_unique_and_sequential() {
        let ids: Vec<i64> = demo_inventory().iter().map(|i| i.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<i64>>());

        let ids: Vec<i64> = demo_customers().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let ids: Vec<i64> = demo_sales().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_seed_sales_reference_seed_records() {
        let inventory = demo_inventory();
        let customers = demo_customers();

        for sale in demo_sales() {
            assert!(customers.iter().any(|c| c.id == sale.customer_id));
            for line in &sale.items {
                assert!(inventory.iter().any(|i| i.id == line.product_id));
            }
        }
    }

    #[test]
    fn test_seed_sale_totals_match_lines() {
        for sale in demo_sales() {
            assert_eq!(sale.total, money::lines_total(&sale.items));
        }
    }
}

//! Customer Operations

use super::{DataStore, StoreError, StoreResult, next_id};
use crate::storage::CUSTOMERS;
use shared::models::{Customer, CustomerCreate, CustomerUpdate};

fn validate_create(data: &CustomerCreate) -> StoreResult<()> {
    if data.name.trim().is_empty() {
        return Err(StoreError::Validation("name is required".into()));
    }
    if data.phone.trim().is_empty() {
        return Err(StoreError::Validation("phone is required".into()));
    }
    Ok(())
}

fn validate_update(data: &CustomerUpdate) -> StoreResult<()> {
    if let Some(ref name) = data.name
        && name.trim().is_empty()
    {
        return Err(StoreError::Validation("name must not be empty".into()));
    }
    if let Some(ref phone) = data.phone
        && phone.trim().is_empty()
    {
        return Err(StoreError::Validation("phone must not be empty".into()));
    }
    Ok(())
}

impl DataStore {
    /// All customers, in insertion order
    pub fn customers(&self) -> StoreResult<Vec<Customer>> {
        self.load(CUSTOMERS)
    }

    /// Find a customer by id
    pub fn customer(&self, id: i64) -> StoreResult<Option<Customer>> {
        Ok(self.customers()?.into_iter().find(|c| c.id == id))
    }

    /// Add a customer, assigning the next id. Purchase stats start empty
    /// and are maintained by `record_sale`.
    pub fn add_customer(&self, data: CustomerCreate) -> StoreResult<Customer> {
        validate_create(&data)?;

        let mut customers = self.customers()?;
        let customer = Customer {
            id: next_id(customers.iter().map(|c| c.id)),
            name: data.name,
            phone: data.phone,
            email: data.email,
            address: data.address,
            last_purchase: None,
            total_spent: 0.0,
        };
        customers.push(customer.clone());
        self.save(CUSTOMERS, &customers)?;

        tracing::debug!(id = customer.id, name = %customer.name, "Customer added");
        Ok(customer)
    }

    /// Patch a customer: supplied fields overwrite, absent fields are
    /// retained. `Ok(None)` when the id is unknown.
    pub fn update_customer(&self, id: i64, data: CustomerUpdate) -> StoreResult<Option<Customer>> {
        validate_update(&data)?;

        let mut customers = self.customers()?;
        let Some(customer) = customers.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        if let Some(name) = data.name {
            customer.name = name;
        }
        if let Some(phone) = data.phone {
            customer.phone = phone;
        }
        if let Some(email) = data.email {
            customer.email = Some(email);
        }
        if let Some(address) = data.address {
            customer.address = Some(address);
        }

        let updated = customer.clone();
        self.save(CUSTOMERS, &customers)?;
        Ok(Some(updated))
    }

    /// Delete a customer. Returns whether a record was removed.
    /// Historical sales keep their `customer_id`; reports fall back to an
    /// "Unknown customer" label when joining.
    pub fn delete_customer(&self, id: i64) -> StoreResult<bool> {
        let mut customers = self.customers()?;
        let before = customers.len();
        customers.retain(|c| c.id != id);
        if customers.len() == before {
            return Ok(false);
        }
        self.save(CUSTOMERS, &customers)?;

        tracing::debug!(id, "Customer deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str) -> CustomerCreate {
        CustomerCreate {
            name: name.to_string(),
            phone: "123-456-7890".to_string(),
            email: None,
            address: None,
        }
    }

    #[test]
    fn test_add_then_get_by_id() {
        let store = DataStore::open_in_memory().unwrap();

        let added = store.add_customer(create("John Farmer")).unwrap();
        assert_eq!(added.id, 1);
        assert_eq!(added.total_spent, 0.0);
        assert!(added.last_purchase.is_none());

        let fetched = store.customer(added.id).unwrap().unwrap();
        assert_eq!(fetched, added);
    }

    #[test]
    fn test_required_fields() {
        let store = DataStore::open_in_memory().unwrap();

        assert!(matches!(
            store.add_customer(create("")),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.add_customer(CustomerCreate {
                name: "Sarah Fields".to_string(),
                phone: "   ".to_string(),
                email: None,
                address: None,
            }),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_update_merges_patch() {
        let store = DataStore::open_in_memory().unwrap();
        let customer = store.add_customer(create("Green Acres Ltd")).unwrap();

        let updated = store
            .update_customer(
                customer.id,
                CustomerUpdate {
                    phone: Some("345-678-9012".to_string()),
                    email: Some("info@greenacres.com".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.phone, "345-678-9012");
        assert_eq!(updated.email.as_deref(), Some("info@greenacres.com"));
        assert_eq!(updated.name, "Green Acres Ltd");
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let store = DataStore::open_in_memory().unwrap();
        store.add_customer(create("A")).unwrap();
        let before = store.customers().unwrap();

        let result = store
            .update_customer(
                7,
                CustomerUpdate {
                    name: Some("B".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.customers().unwrap(), before);
    }

    #[test]
    fn test_delete() {
        let store = DataStore::open_in_memory().unwrap();
        let a = store.add_customer(create("A")).unwrap();
        let b = store.add_customer(create("B")).unwrap();

        assert!(store.delete_customer(a.id).unwrap());
        assert!(!store.delete_customer(a.id).unwrap());

        let customers = store.customers().unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].id, b.id);
    }
}

//! [`ActorEntity`] implementation for [`Customer`].

use super::error::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

fn validate(name: &str, email: &str) -> Result<(), CustomerError> {
    if name.trim().is_empty() {
        return Err(CustomerError::ValidationError(
            "name must not be empty".to_string(),
        ));
    }
    if !email.contains('@') {
        return Err(CustomerError::ValidationError(format!(
            "invalid email: {email:?}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = CustomerError;

    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, Self::Error> {
        validate(&params.name, &params.email)?;
        Ok(Self::new(id, params.name, params.email))
    }

    /// Patches name and/or email. The patched record must still validate.
    async fn on_update(
        &mut self,
        update: CustomerUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        let name = update.name.unwrap_or_else(|| self.name.clone());
        let email = update.email.unwrap_or_else(|| self.email.clone());
        validate(&name, &email)?;
        self.name = name;
        self.email = email;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        _action: (),
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, email: &str) -> CustomerCreate {
        CustomerCreate {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_create_keeps_assigned_id() {
        let customer =
            Customer::from_create_params(CustomerId(4), create("Alice", "alice@example.com"))
                .unwrap();
        assert_eq!(customer.id, CustomerId(4));
        assert_eq!(customer.name, "Alice");
    }

    #[test]
    fn test_create_rejects_blank_name_and_bad_email() {
        assert!(matches!(
            Customer::from_create_params(CustomerId(1), create("  ", "a@b.c")),
            Err(CustomerError::ValidationError(_))
        ));
        assert!(matches!(
            Customer::from_create_params(CustomerId(1), create("Bob", "bob.example.com")),
            Err(CustomerError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_customer_unchanged() {
        let mut customer = Customer::new(CustomerId(1), "Alice", "alice@example.com");
        let update = CustomerUpdate {
            name: Some("Alicia".to_string()),
            email: Some("nope".to_string()),
        };
        assert!(customer.on_update(update, &()).await.is_err());
        assert_eq!(customer.name, "Alice");
        assert_eq!(customer.email, "alice@example.com");
    }
}

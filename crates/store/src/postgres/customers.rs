//! Customer accounts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use alraqi_core::{Customer, CustomerId, Email};

use super::PgStore;
use crate::error::RepositoryError;
use crate::events::StoreEvent;
use crate::repository::CustomerRepository;

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: CustomerId,
    name: String,
    email: String,
    phone: String,
    address: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl CustomerRow {
    fn into_parts(self) -> Result<(Customer, String), RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        let customer = Customer {
            id: self.id,
            name: self.name,
            email,
            phone: self.phone,
            address: self.address,
            joined_at: self.created_at,
        };
        Ok((customer, self.password_hash))
    }
}

const CUSTOMER_COLUMNS: &str = "id, name, email, phone, address, password_hash, created_at";

const EMAIL_TAKEN: &str = "email already registered";

#[async_trait]
impl CustomerRepository for PgStore {
    async fn create_customer(
        &self,
        customer: &Customer,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO customer (id, name, email, phone, address, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(password_hash)
        .bind(customer.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, EMAIL_TAKEN))?;

        self.changed(StoreEvent::Customers).await;
        Ok(())
    }

    async fn find_customer_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(Customer, String)>, RepositoryError> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CustomerRow::into_parts).transpose()
    }

    async fn get_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row
            .map(CustomerRow::into_parts)
            .transpose()?
            .map(|(customer, _)| customer))
    }

    async fn update_customer(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE customer
            SET name = $2, email = $3, phone = $4, address = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, EMAIL_TAKEN))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.changed(StoreEvent::Customers).await;
        Ok(())
    }
}

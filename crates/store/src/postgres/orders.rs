//! Orders.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;

use alraqi_core::{CartItem, Email, Order, OrderId, OrderStatus, PaymentMethod, Price};

use super::PgStore;
use crate::error::RepositoryError;
use crate::events::StoreEvent;
use crate::repository::OrderRepository;

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    customer_name: String,
    phone: String,
    address: String,
    customer_email: Option<String>,
    items: Json<Vec<CartItem>>,
    total: Price,
    status: OrderStatus,
    payment_method: PaymentMethod,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let customer_email = row
            .customer_email
            .map(|e| Email::parse(&e))
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email on order {}: {e}", row.id))
            })?;

        Ok(Self {
            id: row.id,
            customer_name: row.customer_name,
            phone: row.phone,
            address: row.address,
            customer_email,
            items: row.items.0,
            total: row.total,
            status: row.status,
            payment_method: row.payment_method,
            created_at: row.created_at,
        })
    }
}

const ORDER_COLUMNS: &str = "id, customer_name, phone, address, customer_email, items, total, \
                             status, payment_method, created_at";

#[async_trait]
impl OrderRepository for PgStore {
    fn next_order_id(&self) -> OrderId {
        OrderId::new(self.keys.generate())
    }

    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO customer_order
                (id, customer_name, phone, address, customer_email, items, total,
                 status, payment_method, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(&order.id)
        .bind(&order.customer_name)
        .bind(&order.phone)
        .bind(&order.address)
        .bind(order.customer_email.as_ref())
        .bind(Json(&order.items))
        .bind(order.total)
        .bind(order.status)
        .bind(order.payment_method)
        .bind(order.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "order id already exists"))?;

        self.changed(StoreEvent::Orders).await;
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM customer_order ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn get_order(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM customer_order WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn set_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let row: OrderRow = sqlx::query_as(&format!(
            "UPDATE customer_order SET status = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        self.changed(StoreEvent::Orders).await;
        row.try_into()
    }

    async fn orders_by_phone(&self, phone: &str) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM customer_order WHERE phone = $1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(phone)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

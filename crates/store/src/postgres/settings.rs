//! Settings document and back-office password.

use async_trait::async_trait;
use sqlx::types::Json;

use alraqi_core::StoreSettings;

use super::PgStore;
use crate::error::RepositoryError;
use crate::events::StoreEvent;
use crate::repository::SettingsRepository;

#[async_trait]
impl SettingsRepository for PgStore {
    async fn get_settings(&self) -> Result<Option<StoreSettings>, RepositoryError> {
        let document: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT document FROM store_settings WHERE id = 1")
                .fetch_optional(&self.pool)
                .await?;

        document
            .map(|value| {
                serde_json::from_value(value).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid settings document: {e}"))
                })
            })
            .transpose()
    }

    async fn save_settings(&self, settings: &StoreSettings) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO store_settings (id, document) VALUES (1, $1)
            ON CONFLICT (id) DO UPDATE SET document = EXCLUDED.document, updated_at = NOW()
            ",
        )
        .bind(Json(settings))
        .execute(&self.pool)
        .await?;

        self.changed(StoreEvent::Settings).await;
        Ok(())
    }

    async fn admin_password_hash(&self) -> Result<Option<String>, RepositoryError> {
        let hash = sqlx::query_scalar("SELECT password_hash FROM admin_credential WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(hash)
    }

    async fn set_admin_password_hash(&self, hash: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO admin_credential (id, password_hash) VALUES (1, $1)
            ON CONFLICT (id) DO UPDATE SET password_hash = EXCLUDED.password_hash, updated_at = NOW()
            ",
        )
        .bind(hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

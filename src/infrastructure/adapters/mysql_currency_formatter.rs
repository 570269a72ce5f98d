use crate::domain::currency;
use crate::domain::errors::DomainResult;
use crate::ports::currency_formatter_port::CurrencyFormatterPort;
use async_trait::async_trait;
use sqlx::{MySql, Pool};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// 找不到语言时使用的区域
pub const DEFAULT_LOCALE: &str = "en-GB";

/// 根据平台语言配置格式化金额
#[derive(Clone)]
pub struct MySqlCurrencyFormatter {
    pool: Arc<Pool<MySql>>,
}

impl MySqlCurrencyFormatter {
    pub fn new(pool: Arc<Pool<MySql>>) -> Self {
        Self { pool }
    }

    async fn locale_for_language(&self, language_id: Uuid) -> DomainResult<String> {
        let query = r#"
            SELECT lo.code
            FROM language l
            JOIN locale lo ON lo.id = l.locale_id
            WHERE l.id = ?
        "#;

        let code: Option<String> = sqlx::query_scalar(query)
            .bind(language_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(code.unwrap_or_else(|| {
            debug!("No locale for language {}, using {}", language_id, DEFAULT_LOCALE);
            DEFAULT_LOCALE.to_string()
        }))
    }
}

#[async_trait]
impl CurrencyFormatterPort for MySqlCurrencyFormatter {
    async fn format_by_language(
        &self,
        amount: i64,
        currency_iso: &str,
        language_id: Uuid,
    ) -> DomainResult<String> {
        let locale = self.locale_for_language(language_id).await?;
        Ok(currency::format_minor_units(amount, currency_iso, &locale))
    }
}

mod api;
mod application;
mod domain;
mod infrastructure;
mod ports;
#[cfg(test)]
mod testing;

use api::AppState;
use application::{AdminService, RefundService};
use infrastructure::config::adyen_config;
use infrastructure::{
    AdyenCheckoutAdapter, MySqlCurrencyFormatter, MySqlNotificationRepository,
    MySqlOrderRepository, MySqlRefundRepository,
};
use sqlx::MySqlPool;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载环境变量
    dotenvy::dotenv().ok();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting Adyen admin service...");

    // 创建数据库连接池
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    info!("Connecting to database...");

    let pool = Arc::new(MySqlPool::connect(&database_url).await?);
    info!("Database connected successfully");

    // 加载Adyen配置
    let adyen_config = adyen_config::from_env()?;
    info!(
        "Adyen configuration loaded for merchant account: {} ({:?})",
        adyen_config.merchant_account, adyen_config.environment
    );

    let checkout = Arc::new(AdyenCheckoutAdapter::new());
    let orders = Arc::new(MySqlOrderRepository::new(pool.clone()));
    let refunds = Arc::new(MySqlRefundRepository::new(pool.clone()));
    let notifications = Arc::new(MySqlNotificationRepository::new(pool.clone()));
    let currency_formatter = Arc::new(MySqlCurrencyFormatter::new(pool));

    let refund_service = Arc::new(RefundService::new(
        checkout.clone(),
        refunds.clone(),
        adyen_config,
    ));

    let admin_service = Arc::new(AdminService::new(
        orders,
        refund_service,
        refunds,
        notifications,
        currency_formatter,
        checkout,
    ));

    let app = api::create_router(AppState { admin_service });

    // 启动服务器
    let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("SERVER_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    info!("Server listening on {}", addr);
    info!("Available endpoints:");
    info!("  GET  /health - Health check");
    info!("  POST /api/_action/adyen/verify - Verify Adyen API key");
    info!("  POST /api/adyen/refunds - Submit refund");
    info!("  GET  /api/adyen/orders/:order_id/refunds - List refunds");
    info!("  GET  /api/adyen/orders/:order_id/notifications - List notifications");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

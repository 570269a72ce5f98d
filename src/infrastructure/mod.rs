pub mod adapters;
pub mod config;

pub use adapters::{
    AdyenCheckoutAdapter, MySqlCurrencyFormatter, MySqlNotificationRepository,
    MySqlOrderRepository, MySqlRefundRepository,
};

pub mod currency;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{Notification, Order, OrderTransaction, RefundOrderContext, RefundRecord};
pub use value_objects::{OrderAssociation, RefundSource, RefundStatus};

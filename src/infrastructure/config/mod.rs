pub mod adyen_config;

pub use super::admin_settings::Entity as AdminSettings;
pub use super::boards::Entity as Boards;
pub use super::payment_configs::Entity as PaymentConfigs;
pub use super::squares::Entity as Squares;
pub use super::winners::Entity as Winners;

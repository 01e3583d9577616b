pub mod event_bus;
pub mod filters;
pub mod identity;
pub mod listener;
pub mod notification_builder;

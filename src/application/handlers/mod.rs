pub mod notification_relay;

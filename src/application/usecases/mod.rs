pub mod register_relay;

pub mod identity;
pub mod messaging;

use poem_openapi::Tags;

use crate::application::usecases::register_relay::AutomationConfiguration;

pub struct ApiState {
    pub configuration: AutomationConfiguration,
}

pub struct Endpoints;

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Health,
    Messages,
}

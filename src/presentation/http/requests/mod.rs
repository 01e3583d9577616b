use poem_openapi::Object;

use crate::presentation::models::OriginKind;

#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct RelayMessageRequestDto {
    /// A plain string or a chat message object.
    pub message: serde_json::Value,
    #[oai(default)]
    pub destinations: Vec<DestinationDto>,
    pub options: Option<MessageOptionsDto>,
    pub context: RelayContextDto,
}

#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct DestinationDto {
    #[oai(validator(min_length = 1))]
    pub team: String,
    #[oai(default)]
    pub channels: Vec<String>,
    #[oai(default)]
    pub users: Vec<String>,
}

#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct MessageOptionsDto {
    pub id: Option<String>,
    pub ts: Option<i64>,
    pub ttl: Option<i64>,
    pub post: Option<String>,
    pub dashboard: Option<bool>,
}

#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct RelayContextDto {
    #[oai(validator(min_length = 1))]
    pub registration: String,
    #[oai(validator(min_length = 1))]
    pub workspace_id: String,
    pub correlation_id: Option<String>,
    #[oai(default)]
    pub origin: OriginDto,
}

#[derive(Object, Debug, Default)]
#[oai(rename_all = "camelCase")]
pub struct OriginDto {
    #[oai(default)]
    pub kind: OriginKind,
    pub subject: Option<String>,
    pub team_id: Option<String>,
    pub screen_name: Option<String>,
}

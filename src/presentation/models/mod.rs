use poem_openapi::Enum;

#[derive(Enum, Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum OriginKind {
    #[oai(rename = "web")]
    Web,
    #[oai(rename = "chat")]
    Chat,
    #[default]
    #[oai(rename = "other")]
    Other,
}

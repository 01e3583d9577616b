use poem_openapi::Object;

#[derive(Object, Debug)]
pub struct RelayMessageResponseDto {
    pub forwarded: bool,
    pub addresses: Vec<String>,
    pub skipped: Vec<String>,
}

use serde_derive::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SUBSCRIBE_SUCCESS_MESSAGE: &str = "Successfully subscribed to waitlist!";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
}

impl SubscribeResponse {
    pub fn subscribed() -> Self {
        SubscribeResponse {
            success: true,
            message: SUBSCRIBE_SUCCESS_MESSAGE.to_owned(),
        }
    }
}

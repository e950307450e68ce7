use serde_derive::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A waitlist signup after the three required fields have been checked.
///
/// The client builds one from a validated form and posts it as-is; the server
/// builds one from a `SubscribeRequest` whose fields are all present.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub role: String,
    pub school: String,
}

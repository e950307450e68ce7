//! Wire types for the Kit (formerly ConvertKit) v4 subscribers endpoint.

use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::signup::SignupRequest;

pub const DEFAULT_SIGNUP_SOURCE_TAG: &str = "Grade.Coach Landing Page";

/// Body of `POST /v4/subscribers`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewSubscriber {
    pub email_address: String,
    pub first_name: String,
    pub fields: SubscriberFields,
}

/// Custom fields as configured in the Kit account; keys are case-sensitive.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubscriberFields {
    #[serde(rename = "Role")]
    pub role: String,
    #[serde(rename = "School")]
    pub school: String,
    #[serde(rename = "Source")]
    pub source: String,
}

impl NewSubscriber {
    /// The role doubles as the first name, there is no name field on the form.
    pub fn from_signup(signup: &SignupRequest, source_tag: &str) -> Self {
        NewSubscriber {
            email_address: signup.email.clone(),
            first_name: signup.role.clone(),
            fields: SubscriberFields {
                role: signup.role.clone(),
                school: signup.school.clone(),
                source: source_tag.to_owned(),
            },
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct SubscriberCreated {
    pub subscriber: Option<KitSubscriber>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct KitSubscriber {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub email_address: Option<String>,
    pub state: Option<String>,
    pub created_at: Option<String>,
}

impl SubscriberCreated {
    pub fn subscriber_id(&self) -> Option<i64> {
        self.subscriber.as_ref().and_then(|s| s.id)
    }
}

/// Error body of the subscribers endpoint. Only `errors` is looked at, and
/// it is kept as loose JSON: any JSON document is an acceptable error body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KitErrorBody {
    pub errors: Option<Value>,
}

impl KitErrorBody {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(KitErrorBody {
            errors: value.get("errors").cloned(),
        })
    }

    /// First entry of an `errors` array. Strings are returned as-is, other
    /// values as JSON text; blank entries (`""`, `null`, `false`, `0`) count
    /// as absent.
    pub fn first_error(&self) -> Option<String> {
        match self.errors.as_ref()?.as_array()?.first()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

/// What the subscriber API said about a signup it managed to answer.
/// Transport and decoding failures are reported as errors instead.
#[derive(Debug)]
pub enum UpstreamOutcome {
    Accepted {
        created: SubscriberCreated,
        raw: String,
    },
    Rejected {
        status: u16,
        body: KitErrorBody,
        raw: String,
    },
}

use anyhow::anyhow;
use serde_derive::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::signup::SignupRequest;

/// Inbound body of `POST /subscribe`. Every field may be absent or `null`;
/// presence is checked after decoding so that a missing field is a 400 rather
/// than a decoding failure.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct SubscribeRequest {
    pub email: Option<String>,
    pub role: Option<String>,
    pub school: Option<String>,
}

impl SubscribeRequest {
    /// Decodes a request body. Arrays and scalars carry none of the fields and
    /// decode to an empty request; `null`, invalid JSON and wrongly typed
    /// fields are errors.
    pub fn from_body(body: &[u8]) -> anyhow::Result<Self> {
        match serde_json::from_slice(body)? {
            Value::Null => Err(anyhow!("request body is null")),
            value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
            _ => Ok(SubscribeRequest::default()),
        }
    }

    /// `None` unless all three fields are present and non-empty. Format is not
    /// checked here; that is the form's job.
    pub fn into_signup(self) -> Option<SignupRequest> {
        Some(SignupRequest {
            email: non_empty(self.email)?,
            role: non_empty(self.role)?,
            school: non_empty(self.school)?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SubscribeRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn complete_request_becomes_signup() {
        let signup = parse(r#"{"email":"a@b.edu","role":"teacher","school":"Lincoln High"}"#)
            .into_signup()
            .unwrap();
        assert_eq!(signup.email, "a@b.edu");
        assert_eq!(signup.role, "teacher");
        assert_eq!(signup.school, "Lincoln High");
    }

    #[test]
    fn missing_null_or_empty_fields_are_rejected() {
        assert!(parse(r#"{"role":"teacher","school":"Lincoln High"}"#)
            .into_signup()
            .is_none());
        assert!(parse(r#"{"email":"a@b.edu","role":null,"school":"Lincoln High"}"#)
            .into_signup()
            .is_none());
        assert!(parse(r#"{"email":"a@b.edu","role":"teacher","school":""}"#)
            .into_signup()
            .is_none());
    }

    #[test]
    fn format_is_not_checked() {
        let signup = parse(r#"{"email":"not-an-email","role":"x","school":"y"}"#)
            .into_signup()
            .unwrap();
        assert_eq!(signup.email, "not-an-email");
    }

    #[test]
    fn wrong_types_fail_to_decode() {
        assert!(
            serde_json::from_str::<SubscribeRequest>(r#"{"email":5,"role":"x","school":"y"}"#)
                .is_err()
        );
    }

    #[test]
    fn non_object_bodies_carry_no_fields() {
        for body in ["[]", "42", r#""x""#, "true", r#"[{"email":"a@b.edu"}]"#] {
            let request = SubscribeRequest::from_body(body.as_bytes()).unwrap();
            assert!(request.into_signup().is_none(), "body: {body}");
        }
    }

    #[test]
    fn null_invalid_or_mistyped_bodies_are_errors() {
        for body in ["", "null", "{not json", r#"{"email":5,"role":"x","school":"yz"}"#] {
            assert!(SubscribeRequest::from_body(body.as_bytes()).is_err(), "body: {body}");
        }
    }
}

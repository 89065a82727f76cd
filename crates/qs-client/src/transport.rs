use crate::{ClientError, ClientResult};

use reqwest::RequestBuilder;
use serde_json::Value;

/// Send a request and decode its JSON body.
///
/// Non-2xx responses become [`ClientError::Api`]. An empty success body
/// decodes to `Value::Null`.
pub(crate) async fn send_json(req: RequestBuilder) -> ClientResult<Value> {
    let response = req.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = error_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
        return Err(ClientError::api(status.as_u16(), message));
    }

    if body.is_empty() {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_slice(&body)?)
}

/// Pull a human-readable message out of the backend's error shapes.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    if let Some(first) = value
        .get("messages")
        .and_then(Value::as_array)
        .and_then(|messages| messages.first())
        .and_then(Value::as_str)
    {
        return Some(first.to_string());
    }

    ["detail", "title", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .or_else(|| {
            value
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(Value::as_str)
        })
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::error_message;

    #[test]
    fn given_messages_array_when_parsed_then_first_message_used() {
        let body = br#"{"messages":["Invalid credentials","other"],"statusCode":401}"#;
        assert_eq!(error_message(body).as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn given_problem_details_when_parsed_then_detail_preferred() {
        let body = br#"{"title":"Forbidden","detail":"Missing permission"}"#;
        assert_eq!(error_message(body).as_deref(), Some("Missing permission"));
    }

    #[test]
    fn given_nested_error_when_parsed_then_nested_message_used() {
        let body = br#"{"error":{"code":"NOT_FOUND","message":"Framework not found"}}"#;
        assert_eq!(error_message(body).as_deref(), Some("Framework not found"));
    }

    #[test]
    fn given_non_json_body_when_parsed_then_none() {
        assert_eq!(error_message(b"<html>bad gateway</html>"), None);
    }
}

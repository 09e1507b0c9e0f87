use serde::Serialize;

/// Uniform response wrapper: `{"status": "OK"|"FAILED", "data": ...}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { status: "OK", data: Some(data) }
    }

    /// `{"status":"OK"}` with no `data` key.
    pub fn ok_empty() -> Self {
        Self { status: "OK", data: None }
    }
}

impl Envelope<ErrorBody> {
    pub fn failed(message: impl Into<String>) -> Self {
        Self { status: "FAILED", data: Some(ErrorBody { error: message.into() }) }
    }
}

use bytes::Bytes;
use serde::Serialize;

/// Form body sent to the download endpoint: a single `name` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadRequest {
    pub name: String,
}

impl DownloadRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Response body of one request, consumed by a single save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub bytes: Bytes,
    pub file_name: String,
}

impl Payload {
    pub fn new(bytes: Bytes, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerPhase {
    #[default]
    Idle,
    Requesting,
}

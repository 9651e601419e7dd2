use serde::{Deserialize, Serialize};

/// JSON body returned for every failed request: `{"error": "..."}`.
/// `details` is only present when several validation problems were found.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into(), details: None }
    }

    pub fn with_details(error: impl Into<String>, details: Vec<String>) -> Self {
        Self { error: error.into(), details: Some(details) }
    }
}

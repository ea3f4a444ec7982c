use serde::{Deserialize, Serialize};
use serde_json::Value;
use post_insights::AnalysisError;

#[derive(Debug, Deserialize)]
pub struct ApiAnalyzeRequest {
    #[serde(default)]
    pub rows: Value,
}

impl ApiAnalyzeRequest {
    pub fn from_value(value: Value) -> Result<Self, AnalysisError> {
        match value {
            Value::Array(_) => Ok(Self { rows: value }),
            Value::Object(_) => serde_json::from_value(value)
                .map_err(|err| AnalysisError::invalid_input(format!("malformed request body: {}", err))),
            _ => Err(AnalysisError::invalid_input(
                "malformed request body: expected an object with a rows field",
            )),
        }
    }

    pub fn from_slice(body: &[u8]) -> Result<Self, AnalysisError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|err| AnalysisError::invalid_input(format!("malformed request body: {}", err)))?;
        Self::from_value(value)
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

impl From<&AnalysisError> for ApiErrorResponse {
    fn from(err: &AnalysisError) -> Self {
        Self {
            error: err.message().to_string(),
        }
    }
}

use serde::Deserialize;
use utoipa::ToSchema;

/// JSON body of `POST /api/share`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ShareParams {
    /// The (possibly user-edited) summary to send
    #[schema(example = "Ship Friday.")]
    pub summary: Option<String>,
    /// Recipient email addresses
    #[schema(example = json!(["a@x.com", "b@x.com"]))]
    pub recipients: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_deserialize_as_none() {
        let params: ShareParams = serde_json::from_str("{}").unwrap();
        assert!(params.summary.is_none());
        assert!(params.recipients.is_none());
    }

    #[test]
    fn test_recipients_must_be_a_list() {
        let result = serde_json::from_str::<ShareParams>(
            r#"{"summary":"s","recipients":"a@x.com,b@x.com"}"#,
        );
        assert!(result.is_err());
    }
}

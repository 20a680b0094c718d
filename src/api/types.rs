use serde::{Deserialize, Serialize};

pub use crate::core::selection::Preferences;

/// Envelope every backend response is wrapped in.
#[derive(Deserialize, Debug, Clone)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// One hand-built combination. Numbers are ascending.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ManualCombination {
    pub numbers: Vec<u8>,
}

/// Body of `POST /api/v1/recommendations/generate`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub session_id: String,
    pub total_count: usize,
    pub manual_combinations: Vec<ManualCombination>,
    pub preferences: Preferences,
    /// `None` targets the next draw.
    pub target_draw: Option<u32>,
}

/// A single combination returned by the recommendation service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CombinationDetail {
    pub numbers: Vec<u8>,
    pub is_manual: bool,
    #[serde(default)]
    pub confidence_score: Option<f64>,
}

/// `data` payload of a successful recommendation response. Only
/// `combinations` is required; the rest is informational.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecommendationResult {
    #[serde(default)]
    pub history_id: Option<i64>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub target_draw: Option<u32>,
    #[serde(default)]
    pub total_count: Option<usize>,
    #[serde(default)]
    pub manual_count: Option<usize>,
    #[serde(default)]
    pub auto_count: Option<usize>,
    #[serde(default)]
    pub combinations: Vec<CombinationDetail>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_wire_shape() {
        let req = RecommendationRequest {
            session_id: "sess_abc".into(),
            total_count: 2,
            manual_combinations: vec![ManualCombination { numbers: vec![3, 12, 19, 27, 34, 41] }],
            preferences: Preferences {
                include_numbers: vec![7],
                exclude_numbers: vec![],
            },
            target_draw: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "session_id": "sess_abc",
                "total_count": 2,
                "manual_combinations": [{ "numbers": [3, 12, 19, 27, 34, 41] }],
                "preferences": { "include_numbers": [7], "exclude_numbers": [] },
                "target_draw": null
            })
        );
    }

    #[test]
    fn test_envelope_tolerates_missing_fields() {
        let env: ApiEnvelope<RecommendationResult> = serde_json::from_str(
            r#"{"success": true, "data": {"combinations": [{"numbers": [1,2,3,4,5,6], "is_manual": false}]}}"#,
        )
        .unwrap();
        assert!(env.success);
        let data = env.data.unwrap();
        assert_eq!(data.combinations.len(), 1);
        assert_eq!(data.combinations[0].confidence_score, None);
        assert!(data.history_id.is_none());
    }

    #[test]
    fn test_failed_envelope_without_data() {
        let env: ApiEnvelope<Preferences> =
            serde_json::from_str(r#"{"success": false, "message": "nope"}"#).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("nope"));
    }
}

//! Interpretation of risk service responses.
//!
//! The risk service has no fixed response schema. Some versions answer with a
//! `risk_label`, some with a numeric `risk_score`, some with both. Responses are
//! resolved into a [`RiskReading`] first and only then into a [`RiskTier`], so
//! rendering code never has to guess which fields exist.

use serde::Serialize;
use serde_json::Value;

use crate::enum_display_serde;

/// Score above which a numeric reading is high risk.
const HIGH_SCORE: f64 = 66.0;

/// Score above which a numeric reading is moderate risk.
const MODERATE_SCORE: f64 = 33.0;

/// The classified risk level shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    High,
    Moderate,
    Low,
    Unknown,
}
enum_display_serde!(RiskTier);

impl RiskTier {
    /// Color family used for the tier, `None` renders neutral.
    pub fn accent(self) -> Option<&'static str> {
        match self {
            RiskTier::High => Some("red"),
            RiskTier::Moderate => Some("orange"),
            RiskTier::Low => Some("green"),
            RiskTier::Unknown => None,
        }
    }
}

/// The part of a risk service response that determines the tier.
#[derive(Debug, Clone, PartialEq)]
pub enum RiskReading {
    Label(String),
    Score(f64),
    Unrecognized,
}

impl RiskReading {
    /// Picks the reading out of a response. A non-empty `risk_label` string wins
    /// over `risk_score`. A score sent as a string is read like a label.
    pub fn from_result(result: &Value) -> Self {
        let text = |key: &str| {
            result
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        };

        if let Some(label) = text("risk_label").or_else(|| text("risk_score")) {
            return RiskReading::Label(label.to_string());
        }

        match result.get("risk_score").and_then(Value::as_f64) {
            Some(score) => RiskReading::Score(score),
            None => RiskReading::Unrecognized,
        }
    }

    pub fn tier(&self) -> RiskTier {
        match self {
            RiskReading::Label(label) => {
                let label = label.to_lowercase();
                if label.contains("high") {
                    RiskTier::High
                } else if label.contains("moderate") || label.contains("medium") {
                    RiskTier::Moderate
                } else {
                    RiskTier::Low
                }
            }
            RiskReading::Score(score) if *score > HIGH_SCORE => RiskTier::High,
            RiskReading::Score(score) if *score > MODERATE_SCORE => RiskTier::Moderate,
            RiskReading::Score(_) => RiskTier::Low,
            RiskReading::Unrecognized => RiskTier::Unknown,
        }
    }
}

/// Classifies any response value, including non-objects, into a tier.
pub fn classify(result: &Value) -> RiskTier {
    RiskReading::from_result(result).tier()
}

/// Everything the result panel displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskView {
    pub tier: RiskTier,
    pub headline: String,
    pub score: Option<String>,
    pub recommendation: Option<String>,
}

impl RiskView {
    pub fn from_result(result: &Value) -> Self {
        let score = result.get("risk_score").and_then(|score| match score {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        let headline = match RiskReading::from_result(result) {
            RiskReading::Label(label) => label,
            _ => score.clone().unwrap_or_else(|| "Unknown".to_string()),
        };

        Self {
            tier: classify(result),
            headline,
            score,
            recommendation: result
                .get("recommendation")
                .and_then(Value::as_str)
                .map(ToOwned::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn label_takes_priority() {
        assert_eq!(classify(&json!({ "risk_label": "High Risk" })), RiskTier::High);
        assert_eq!(classify(&json!({ "risk_label": "MEDIUM" })), RiskTier::Moderate);
        assert_eq!(classify(&json!({ "risk_label": "Moderate risk" })), RiskTier::Moderate);
        assert_eq!(classify(&json!({ "risk_label": "Low" })), RiskTier::Low);
        assert_eq!(classify(&json!({ "risk_label": "Healthy" })), RiskTier::Low);
        assert_eq!(
            classify(&json!({ "risk_label": "low", "risk_score": 99 })),
            RiskTier::Low
        );
    }

    #[test]
    fn score_thresholds() {
        assert_eq!(classify(&json!({ "risk_score": 80 })), RiskTier::High);
        assert_eq!(classify(&json!({ "risk_score": 66.5 })), RiskTier::High);
        assert_eq!(classify(&json!({ "risk_score": 66 })), RiskTier::Moderate);
        assert_eq!(classify(&json!({ "risk_score": 40 })), RiskTier::Moderate);
        assert_eq!(classify(&json!({ "risk_score": 33 })), RiskTier::Low);
        assert_eq!(classify(&json!({ "risk_score": 10 })), RiskTier::Low);
    }

    #[test]
    fn unrecognized_shapes_are_unknown() {
        for result in [
            json!({}),
            json!(null),
            json!([1, 2]),
            json!("high"),
            json!({ "risk_label": "" }),
            json!({ "risk_label": 3 }),
            json!({ "risk_score": "" }),
            json!({ "recommendation": "rest" }),
        ] {
            assert_eq!(classify(&result), RiskTier::Unknown, "{result}");
        }
        assert_eq!(RiskTier::Unknown.accent(), None);
    }

    #[test]
    fn string_score_is_read_like_a_label() {
        assert_eq!(classify(&json!({ "risk_score": "High" })), RiskTier::High);
        assert_eq!(classify(&json!({ "risk_score": "medium" })), RiskTier::Moderate);
        assert_eq!(classify(&json!({ "risk_score": "80" })), RiskTier::Low);
        assert_eq!(
            classify(&json!({ "risk_label": "", "risk_score": "high" })),
            RiskTier::High
        );

        let view = RiskView::from_result(&json!({ "risk_score": "80" }));
        assert_eq!(view.headline, "80");
        assert_eq!(view.score.as_deref(), Some("80"));
        assert_eq!(view.tier.accent(), Some("green"));
    }

    #[test]
    fn empty_label_falls_back_to_score() {
        assert_eq!(
            classify(&json!({ "risk_label": "", "risk_score": 70 })),
            RiskTier::High
        );
    }

    #[test]
    fn view_of_full_result() {
        let view = RiskView::from_result(&json!({
            "risk_label": "High Risk",
            "risk_score": 0.87,
            "recommendation": "See a physician",
        }));

        assert_eq!(view.tier, RiskTier::High);
        assert_eq!(view.headline, "High Risk");
        assert_eq!(view.score.as_deref(), Some("0.87"));
        assert_eq!(view.recommendation.as_deref(), Some("See a physician"));
        assert_eq!(view.tier.accent(), Some("red"));
    }

    #[test]
    fn view_of_score_only_result() {
        let view = RiskView::from_result(&json!({ "risk_score": 12 }));

        assert_eq!(view.tier, RiskTier::Low);
        assert_eq!(view.headline, "12");
        assert_eq!(view.recommendation, None);
    }

    #[test]
    fn view_of_empty_result() {
        let view = RiskView::from_result(&json!({}));

        assert_eq!(view.tier, RiskTier::Unknown);
        assert_eq!(view.headline, "Unknown");
        assert_eq!(view.score, None);
    }
}

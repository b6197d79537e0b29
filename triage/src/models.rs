//! JSON models shared between the client side and the risk service contract.

use serde::{Deserialize, Serialize};

use crate::enum_display_serde;

/// Gender as stored on a patient profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
    #[default]
    #[serde(other)]
    Unknown,
}
enum_display_serde!(Gender);

impl Gender {
    /// Parses a stored profile value. Anything unrecognized is [`Gender::Unknown`].
    pub fn parse(value: &str) -> Self {
        serde_json::from_value(serde_json::Value::String(value.to_lowercase()))
            .unwrap_or_default()
    }
}

/// The binary sex value the external risk service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}
enum_display_serde!(Sex);

/// Adapts a free-form gender value to the external [`Sex`] enum.
///
/// This mapping is lossy: only a case-insensitive `"male"` becomes [`Sex::Male`],
/// every other value (`"other"`, `"prefer-not-to-say"`, empty, padded with
/// whitespace) becomes [`Sex::Female`]. The risk service only knows two values.
pub fn to_external_sex(gender: &str) -> Sex {
    if gender.to_lowercase() == "male" {
        Sex::Male
    } else {
        Sex::Female
    }
}

/// Body of the `POST /predict_risk` call to the external risk service.
///
/// The key set is fixed. `age` is `None` and `bmi` is NaN when the client sent
/// something non-numeric; both serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskRequestPayload {
    pub age: Option<i64>,
    pub sex: Sex,
    pub bmi: f64,
    pub symptoms: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn male_is_case_insensitive() {
        for value in ["male", "Male", "MALE", "mAlE"] {
            assert_eq!(to_external_sex(value), Sex::Male, "{value}");
        }
    }

    #[test]
    fn everything_else_is_female() {
        for value in ["Female", "female", "FEMALE ", "other", "prefer-not-to-say", "", " male"] {
            assert_eq!(to_external_sex(value), Sex::Female, "{value:?}");
        }
    }

    #[test]
    fn sex_is_title_cased_on_the_wire() {
        assert_eq!(json!(Sex::Male), json!("Male"));
        assert_eq!(json!(Sex::Female), json!("Female"));
        assert_eq!(Sex::Female.to_string(), "Female");
    }

    #[test]
    fn gender_parsing() {
        assert_eq!(Gender::parse("male"), Gender::Male);
        assert_eq!(Gender::parse("Female"), Gender::Female);
        assert_eq!(Gender::parse("prefer-not-to-say"), Gender::PreferNotToSay);
        assert_eq!(Gender::parse("N/A"), Gender::Unknown);
        assert_eq!(Gender::PreferNotToSay.to_string(), "prefer-not-to-say");
    }

    #[test]
    fn non_numeric_values_serialize_as_null() {
        let payload = RiskRequestPayload {
            age: None,
            sex: Sex::Female,
            bmi: f64::NAN,
            symptoms: vec![],
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "age": null, "sex": "Female", "bmi": null, "symptoms": [] })
        );
    }
}

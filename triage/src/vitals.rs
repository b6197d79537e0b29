//! Vitals form handling and BMI derivation.

use serde::Serialize;

use crate::{
    models::Gender,
    profile::{Age, ProfileContext},
};

/// Parses a numeric form field, only accepting finite positive values.
fn positive(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Rounds to one decimal the way `Number.prototype.toFixed(1)` does: on the
/// exact binary value, with exact halves rounded up.
fn round_to_tenth(value: f64) -> f64 {
    // the only exactly representable halves are odd quarters
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        return (value * 10.0).ceil() / 10.0;
    }

    format!("{value:.1}").parse().unwrap_or(value)
}

/// Body mass index from height in centimeters and weight in kilograms, rounded
/// to one decimal place.
///
/// Returns `None` if either field is empty, non-numeric or not positive.
pub fn compute_bmi(height_cm: &str, weight_kg: &str) -> Option<f64> {
    let height_m = positive(height_cm)? / 100.0;
    let weight = positive(weight_kg)?;

    Some(round_to_tenth(weight / (height_m * height_m)))
}

/// Request body the browser sends to `POST /api/risk/predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientPayload {
    pub age: Age,
    pub gender: Gender,
    pub allergies: Vec<String>,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    /// Raw symptom text, splitting happens on the server.
    pub symptoms: String,
}

/// Raw state of the vitals form, exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VitalsForm {
    height: String,
    weight: String,
    symptoms: String,
}

impl VitalsForm {
    pub fn new(
        height: impl Into<String>,
        weight: impl Into<String>,
        symptoms: impl Into<String>,
    ) -> Self {
        Self {
            height: height.into(),
            weight: weight.into(),
            symptoms: symptoms.into(),
        }
    }

    pub fn set_height(&mut self, height: impl Into<String>) {
        self.height = height.into();
    }

    pub fn set_weight(&mut self, weight: impl Into<String>) {
        self.weight = weight.into();
    }

    pub fn set_symptoms(&mut self, symptoms: impl Into<String>) {
        self.symptoms = symptoms.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }

    /// The BMI for the current height and weight. Always derived, never cached.
    pub fn bmi(&self) -> Option<f64> {
        compute_bmi(&self.height, &self.weight)
    }

    /// Merges the form with the profile into a request body.
    ///
    /// Returns `None` while the BMI is undefined.
    pub fn build_payload(&self, profile: &ProfileContext) -> Option<ClientPayload> {
        let bmi = self.bmi()?;

        Some(ClientPayload {
            age: profile.age,
            gender: profile.gender,
            allergies: profile.allergies.clone(),
            height: positive(&self.height)?,
            weight: positive(&self.weight)?,
            bmi,
            symptoms: self.symptoms.clone(),
        })
    }
}

//! State of a single risk assessment on the client.
//!
//! ```text
//! idle ──submit──▶ submitting ──complete──▶ success
//!   ▲                  │                       │
//!   │                  └──────fail──────▶ error │
//!   └───────────────start over─────────────┴────┘
//! ```

use serde_json::Value;

use crate::{
    presenter::{RiskTier, RiskView},
    profile::ProfileContext,
    vitals::{ClientPayload, VitalsForm},
};

/// Message shown when a prediction request fails for any reason.
pub const FAILURE_MESSAGE: &str = "Failed to calculate risk. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentState {
    Idle,
    Submitting,
    Success { tier: RiskTier, view: RiskView },
    Error { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("a request is already in flight")]
    AlreadySubmitting,

    #[error("height and weight must be positive numbers")]
    MissingBmi,

    #[error("no request is in flight")]
    NotSubmitting,
}

/// A risk assessment in progress: the form, the profile it is merged with,
/// and where the request currently is.
#[derive(Debug, Clone)]
pub struct Assessment {
    profile: ProfileContext,
    pub vitals: VitalsForm,
    state: AssessmentState,
}

impl Assessment {
    pub fn new(profile: ProfileContext) -> Self {
        Self {
            profile,
            vitals: VitalsForm::default(),
            state: AssessmentState::Idle,
        }
    }

    pub fn state(&self) -> &AssessmentState {
        &self.state
    }

    pub fn profile(&self) -> &ProfileContext {
        &self.profile
    }

    pub fn can_submit(&self) -> bool {
        self.state != AssessmentState::Submitting && self.vitals.bmi().is_some()
    }

    /// Starts a request, returning the body to send.
    ///
    /// Submitting again from a finished state discards the previous outcome.
    pub fn submit(&mut self) -> Result<ClientPayload, FlowError> {
        if self.state == AssessmentState::Submitting {
            return Err(FlowError::AlreadySubmitting);
        }

        let payload = self
            .vitals
            .build_payload(&self.profile)
            .ok_or(FlowError::MissingBmi)?;

        self.state = AssessmentState::Submitting;
        Ok(payload)
    }

    /// Records the risk service response of the in-flight request.
    pub fn complete(&mut self, result: &Value) -> Result<RiskTier, FlowError> {
        if self.state != AssessmentState::Submitting {
            return Err(FlowError::NotSubmitting);
        }

        let view = RiskView::from_result(result);
        let tier = view.tier;
        self.state = AssessmentState::Success { tier, view };

        Ok(tier)
    }

    /// Records a failure of the in-flight request.
    pub fn fail(&mut self) -> Result<(), FlowError> {
        if self.state != AssessmentState::Submitting {
            return Err(FlowError::NotSubmitting);
        }

        self.state = AssessmentState::Error {
            message: FAILURE_MESSAGE.to_string(),
        };

        Ok(())
    }

    /// Clears the vitals and the last outcome.
    ///
    /// There is nothing to cancel while a request is in flight, so this is
    /// rejected in that state.
    pub fn start_over(&mut self) -> Result<(), FlowError> {
        if self.state == AssessmentState::Submitting {
            return Err(FlowError::AlreadySubmitting);
        }

        self.vitals.clear();
        self.state = AssessmentState::Idle;

        Ok(())
    }
}

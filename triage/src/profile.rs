//! Profile data the risk assessment reads, but never writes.

use serde::{Serialize, Serializer};
use time::Date;

use crate::models::Gender;

/// Age of the patient in completed years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Age {
    Years(u32),
    #[default]
    Unknown,
}

impl Age {
    /// Completed calendar years between `date_of_birth` and `today`.
    ///
    /// A date of birth in the future yields [`Age::Unknown`].
    pub fn from_birth_date(date_of_birth: Date, today: Date) -> Self {
        if date_of_birth > today {
            return Age::Unknown;
        }

        let mut years = today.year() - date_of_birth.year();
        if (u8::from(today.month()), today.day())
            < (u8::from(date_of_birth.month()), date_of_birth.day())
        {
            years -= 1;
        }

        u32::try_from(years).map_or(Age::Unknown, Age::Years)
    }
}

impl Serialize for Age {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Age::Years(years) => serializer.serialize_u32(*years),
            Age::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

/// The parts of a patient profile that feed into a risk assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileContext {
    pub age: Age,
    pub gender: Gender,
    pub allergies: Vec<String>,
}

impl ProfileContext {
    /// Derives the context from the raw fields of a stored profile record.
    pub fn from_record(
        date_of_birth: Option<Date>,
        gender: Option<&str>,
        allergies: Vec<String>,
        today: Date,
    ) -> Self {
        Self {
            age: date_of_birth.map_or(Age::Unknown, |dob| Age::from_birth_date(dob, today)),
            gender: gender.map_or(Gender::Unknown, Gender::parse),
            allergies,
        }
    }
}

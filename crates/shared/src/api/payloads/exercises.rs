use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{non_blank, parse_day};
use crate::{
    api::response_errors::AddExerciseError,
    model::{NewExercise, UserId, DESCRIPTION_MAX_CHARS},
};

/// Exercise as posted by a client. Fields stay loosely typed so each problem
/// gets its own error instead of a generic deserialization failure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddExercise {
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub duration: Option<Value>,
    #[serde(default)]
    pub date: Option<String>,
}

impl AddExercise {
    /// `today` is used when no date was sent
    pub fn into_new_exercise(
        self,
        user_id: UserId,
        today: NaiveDate,
    ) -> Result<NewExercise, AddExerciseError> {
        let description = parse_description(self.description)?;
        let duration = parse_duration(self.duration)?;
        let date = match non_blank(self.date) {
            None => today,
            Some(raw) => parse_day(&raw).ok_or(AddExerciseError::InvalidDate)?,
        };

        Ok(NewExercise::new(user_id, description, duration, date))
    }
}

fn parse_description(raw: Option<Value>) -> Result<String, AddExerciseError> {
    let description = match raw {
        None | Some(Value::Null) => return Err(AddExerciseError::DescriptionMissing),
        Some(Value::String(s)) if s.is_empty() => {
            return Err(AddExerciseError::DescriptionMissing)
        }
        Some(Value::String(s)) => s,
        Some(_) => return Err(AddExerciseError::DescriptionNotString),
    };

    let description = description.trim();
    if description.is_empty() {
        return Err(AddExerciseError::DescriptionBlank);
    }
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(AddExerciseError::DescriptionTooLong);
    }
    Ok(description.to_owned())
}

fn parse_duration(raw: Option<Value>) -> Result<i64, AddExerciseError> {
    let duration = match raw {
        None | Some(Value::Null) => return Err(AddExerciseError::DurationMissing),
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(AddExerciseError::DurationMissing)
        }
        Some(Value::String(s)) => whole_number(&s),
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Some(_) => None,
    };

    duration
        .filter(|d| *d >= 0)
        .ok_or(AddExerciseError::DurationInvalid)
}

fn whole_number(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().and_then(integral))
}

fn integral(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64)
        .then_some(value as i64)
}

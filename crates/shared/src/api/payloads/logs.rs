use serde::{Deserialize, Serialize};

use super::{non_blank, parse_day};
use crate::{api::response_errors::LogError, model::LogQuery};

/// Raw `?from=&to=&limit=` query string of a log request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogParams {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl LogParams {
    pub fn into_log_query(self) -> Result<LogQuery, LogError> {
        let from = non_blank(self.from)
            .map(|raw| parse_day(&raw).ok_or(LogError::InvalidFromDate))
            .transpose()?;
        let to = non_blank(self.to)
            .map(|raw| parse_day(&raw).ok_or(LogError::InvalidToDate))
            .transpose()?;
        let limit = self
            .limit
            .map(|raw| match raw.trim().parse::<i64>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(LogError::InvalidLimit),
            })
            .transpose()?;

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(LogError::InvalidDateRange);
            }
        }

        Ok(LogQuery { from, to, limit })
    }
}

//! Homework domain types

use serde::Deserialize;
use thiserror::Error;

/// One submission record returned by the review API.
///
/// The status stays the raw wire string so an unrecognized code surfaces as
/// [`UnknownStatusError`] at interpretation time instead of a decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct Homework {
    pub homework_name: String,
    pub status: String,
}

/// Review outcome recognized by the API contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

/// The raw status is not one of the three recognized codes.
///
/// Signals an upstream contract change or corrupted data, not a transient
/// condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected review status {0:?}")]
pub struct UnknownStatusError(pub String);

impl std::str::FromStr for ReviewStatus {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(ReviewStatus::Approved),
            "reviewing" => Ok(ReviewStatus::Reviewing),
            "rejected" => Ok(ReviewStatus::Rejected),
            other => Err(UnknownStatusError(other.to_string())),
        }
    }
}

impl ReviewStatus {
    /// Fixed verdict sentence for this status
    pub fn verdict(&self) -> &'static str {
        match self {
            ReviewStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            ReviewStatus::Reviewing => "Работа взята на проверку ревьюером.",
            ReviewStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl Homework {
    /// Builds the human-readable status-change message for this homework.
    ///
    /// # Example
    /// ```
    /// use reviewwatch_core::domain::homework::Homework;
    ///
    /// let homework = Homework {
    ///     homework_name: "X".to_string(),
    ///     status: "reviewing".to_string(),
    /// };
    /// let verdict = homework.verdict().unwrap();
    /// assert!(verdict.starts_with("Изменился статус проверки работы \"X\"."));
    /// ```
    pub fn verdict(&self) -> Result<String, UnknownStatusError> {
        let status: ReviewStatus = self.status.parse()?;
        Ok(format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.homework_name,
            status.verdict()
        ))
    }
}

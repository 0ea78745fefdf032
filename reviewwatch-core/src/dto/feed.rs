//! Review feed decoding
//!
//! Every structural assumption about the payload is checked explicitly and
//! reported as a distinguishable [`ShapeError`], so an upstream change shows
//! up in the logs as a named violation rather than an untyped decode failure.

use serde_json::Value;
use thiserror::Error;

use crate::domain::homework::Homework;

/// One decoded page of the review feed
#[derive(Debug, Clone)]
pub struct FeedPage {
    /// Homework entries, most recent first
    pub homeworks: Vec<Homework>,
    /// Server clock at response time, if supplied
    pub current_date: Option<i64>,
}

/// Structural violation of the expected feed payload
#[derive(Debug, Error)]
pub enum ShapeError {
    /// The payload is not a JSON object
    #[error("expected the response to be an object, got {found}")]
    NotAnObject { found: &'static str },

    /// The `homeworks` key is absent
    #[error("\"homeworks\" is missing from the response")]
    MissingHomeworks,

    /// The value under `homeworks` is not an array
    #[error("expected \"homeworks\" to be a list, got {found}")]
    HomeworksNotAList { found: &'static str },

    /// A homework entry does not decode into the expected record
    #[error("homework entry {index} is malformed: {source}")]
    Item {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Decodes a raw feed payload into a [`FeedPage`].
///
/// Pure function of the response. `current_date` is read leniently: a page
/// without a usable server clock still decodes, the caller simply cannot
/// advance its window from it.
pub fn decode_feed(raw: &Value) -> Result<FeedPage, ShapeError> {
    let object = raw.as_object().ok_or(ShapeError::NotAnObject {
        found: json_type(raw),
    })?;

    let homeworks = object
        .get("homeworks")
        .ok_or(ShapeError::MissingHomeworks)?;
    let entries = homeworks.as_array().ok_or(ShapeError::HomeworksNotAList {
        found: json_type(homeworks),
    })?;

    let homeworks = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry.clone()).map_err(|source| ShapeError::Item { index, source })
        })
        .collect::<Result<Vec<Homework>, _>>()?;

    let current_date = object.get("current_date").and_then(Value::as_i64);

    Ok(FeedPage {
        homeworks,
        current_date,
    })
}

/// JSON type name for error reporting
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_valid_page() {
        let raw = json!({
            "homeworks": [
                {"homework_name": "X", "status": "approved"},
                {"homework_name": "Y", "status": "rejected"},
            ],
            "current_date": 1000,
        });

        let page = decode_feed(&raw).unwrap();
        assert_eq!(page.homeworks.len(), 2);
        assert_eq!(page.homeworks[0].homework_name, "X");
        assert_eq!(page.homeworks[0].status, "approved");
        assert_eq!(page.current_date, Some(1000));
    }

    #[test]
    fn test_decode_empty_homeworks() {
        let raw = json!({"homeworks": [], "current_date": 500});

        let page = decode_feed(&raw).unwrap();
        assert!(page.homeworks.is_empty());
        assert_eq!(page.current_date, Some(500));
    }

    #[test]
    fn test_missing_homeworks_is_a_shape_error() {
        let raw = json!({"current_date": 1000});

        assert!(matches!(
            decode_feed(&raw),
            Err(ShapeError::MissingHomeworks)
        ));
    }

    #[test]
    fn test_homeworks_of_wrong_type_reports_observed_type() {
        let raw = json!({"homeworks": "nothing here", "current_date": 1000});

        match decode_feed(&raw) {
            Err(ShapeError::HomeworksNotAList { found }) => assert_eq!(found, "string"),
            other => panic!("expected HomeworksNotAList, got {other:?}"),
        }
    }

    #[test]
    fn test_non_object_payload_reports_observed_type() {
        let raw = json!(["not", "an", "object"]);

        match decode_feed(&raw) {
            Err(ShapeError::NotAnObject { found }) => assert_eq!(found, "array"),
            other => panic!("expected NotAnObject, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_entry_reports_its_index() {
        let raw = json!({
            "homeworks": [
                {"homework_name": "X", "status": "approved"},
                {"status": "approved"},
            ],
        });

        match decode_feed(&raw) {
            Err(ShapeError::Item { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected Item, got {other:?}"),
        }
    }

    #[test]
    fn test_current_date_is_read_leniently() {
        let absent = json!({"homeworks": []});
        assert_eq!(decode_feed(&absent).unwrap().current_date, None);

        let wrong_type = json!({"homeworks": [], "current_date": "soon"});
        assert_eq!(decode_feed(&wrong_type).unwrap().current_date, None);
    }
}

use crate::power_api::error::ShapeError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Values of one parameter keyed by `YYYYMMDD` date string.
pub type DailySeries = BTreeMap<String, Option<f64>>;

/// The decoded payload of a daily point request.
///
/// Only `properties.parameter` is kept, along with the API's advisory
/// `messages` for diagnostics. Everything else in the body is dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResponse {
    /// Parameter code to daily series.
    pub parameters: BTreeMap<String, DailySeries>,
    pub messages: Vec<String>,
}

impl RawResponse {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Json`] when the body is not JSON,
    /// [`ShapeError::MissingParameterBlock`] when `properties.parameter` is absent and
    /// [`ShapeError::MalformedParameterBlock`] when it is not a map of date-to-number maps.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ShapeError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    pub fn from_value(mut value: Value) -> Result<Self, ShapeError> {
        let parameter_block = value
            .pointer_mut("/properties/parameter")
            .map(Value::take)
            .ok_or(ShapeError::MissingParameterBlock)?;

        let parameters = serde_json::from_value(parameter_block)
            .map_err(ShapeError::MalformedParameterBlock)?;

        let messages = value
            .get("messages")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|m| m.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            parameters,
            messages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_parameter_block() {
        let body = br#"{
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [-97.5, 35.5, 370.0]},
            "properties": {"parameter": {
                "T2M": {"20200101": 15.2, "20200102": -999},
                "WS2M": {"20200101": 3.1, "20200102": null}
            }},
            "messages": ["Some parameters are not available"]
        }"#;
        let response = RawResponse::from_slice(body).unwrap();
        assert_eq!(response.parameters.len(), 2);
        assert_eq!(response.parameters["T2M"]["20200101"], Some(15.2));
        assert_eq!(response.parameters["T2M"]["20200102"], Some(-999.0));
        assert_eq!(response.parameters["WS2M"]["20200102"], None);
        assert_eq!(response.messages, ["Some parameters are not available"]);
    }

    #[test]
    fn non_json_body_is_rejected() {
        let err = RawResponse::from_slice(b"<html>Service Unavailable</html>").unwrap_err();
        assert!(matches!(err, ShapeError::Json(_)));
    }

    #[test]
    fn missing_parameter_block_is_rejected() {
        let bodies: [&[u8]; 4] = [
            br#"{"header": {}}"#,
            br#"{"properties": {}}"#,
            br#"{"properties": {"parameters": {}}}"#,
            br#"[]"#,
        ];
        for body in bodies {
            let err = RawResponse::from_slice(body).unwrap_err();
            assert!(matches!(err, ShapeError::MissingParameterBlock), "{err:?}");
        }
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        let body = br#"{"properties": {"parameter": {"T2M": {"20200101": "warm"}}}}"#;
        let err = RawResponse::from_slice(body).unwrap_err();
        assert!(matches!(err, ShapeError::MalformedParameterBlock(_)));
    }

    #[test]
    fn empty_parameter_block_is_valid() {
        let body = br#"{"properties": {"parameter": {}}}"#;
        let response = RawResponse::from_slice(body).unwrap();
        assert!(response.parameters.is_empty());
        assert!(response.messages.is_empty());
    }
}

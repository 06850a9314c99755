use serde::Deserialize;

/// Wire shape of a `POST /predict/{modality}` response. Older service
/// versions nest the outcome inside `label` instead of sending a flat
/// string; both shapes are accepted here and normalized before anything
/// else sees them.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    #[serde(rename = "isDeepfake")]
    pub is_deepfake: bool,
    #[serde(default, deserialize_with = "confidence_or_zero")]
    pub confidence: f64,
    pub label: PredictionLabel,
}

/// Top-level confidence is loosely typed on the wire: the video and image
/// endpoints send `null`, the audio endpoint may send the string "N/A".
/// Anything non-numeric reads as zero.
fn confidence_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(0.0))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PredictionLabel {
    Nested { result: String, confidence: f64 },
    Plain(String),
}

/// Normalized classification result. The only verdict shape that exists
/// past the deserialization boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub is_deepfake: bool,
    pub confidence: f64,
    pub summary: String,
}

impl From<PredictionResponse> for Verdict {
    fn from(raw: PredictionResponse) -> Self {
        let summary = match raw.label {
            PredictionLabel::Nested { result, confidence } => {
                format!("{result} ({confidence:.2}% confidence)")
            }
            PredictionLabel::Plain(label) => label,
        };
        Verdict {
            is_deepfake: raw.is_deepfake,
            confidence: raw.confidence,
            summary,
        }
    }
}

pub fn parse_verdict(body: &str) -> Result<Verdict, serde_json::Error> {
    serde_json::from_str::<PredictionResponse>(body).map(Verdict::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_label_passes_through() {
        let verdict =
            parse_verdict(r#"{"isDeepfake": true, "confidence": 87.5, "label": "FAKE"}"#).unwrap();
        assert!(verdict.is_deepfake);
        assert_eq!(verdict.confidence, 87.5);
        assert_eq!(verdict.summary, "FAKE");
    }

    #[test]
    fn nested_label_is_flattened() {
        let verdict = parse_verdict(
            r#"{"isDeepfake": false, "confidence": 12.0, "label": {"result": "REAL", "confidence": 88.125}}"#,
        )
        .unwrap();
        assert!(!verdict.is_deepfake);
        assert_eq!(verdict.summary, "REAL (88.13% confidence)");
    }

    #[test]
    fn missing_confidence_defaults_to_zero() {
        let verdict = parse_verdict(r#"{"isDeepfake": true, "label": "FAKE"}"#).unwrap();
        assert_eq!(verdict.confidence, 0.0);
    }

    #[test]
    fn null_confidence_reads_as_zero() {
        let verdict =
            parse_verdict(r#"{"isDeepfake": true, "label": "FAKE", "confidence": null}"#).unwrap();
        assert!(verdict.is_deepfake);
        assert_eq!(verdict.confidence, 0.0);
        assert_eq!(verdict.summary, "FAKE");
    }

    #[test]
    fn non_numeric_confidence_reads_as_zero() {
        let verdict =
            parse_verdict(r#"{"isDeepfake": false, "label": "REAL", "confidence": "N/A"}"#)
                .unwrap();
        assert!(!verdict.is_deepfake);
        assert_eq!(verdict.confidence, 0.0);
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse_verdict("not json").is_err());
        assert!(parse_verdict(r#"{"confidence": 1.0}"#).is_err());
    }
}

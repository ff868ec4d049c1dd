use serde_json::Value;

use crate::gateway::RawContent;
use crate::normalize::RawRate;
use crate::{ConfigError, SourceError};

/// Reads a nested field from the JSON object embedded in a script blob.
///
/// The object starts at the first `{`. Script text trailing the object is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedJson {
    path: Vec<String>,
}

impl EmbeddedJson {
    pub fn new<I, S>(path: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = path.into_iter().map(Into::into).collect::<Vec<String>>();
        if path.is_empty() || path.iter().any(|key| key.is_empty()) {
            return Err(ConfigError::EmptyKeyPath);
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn extract(&self, content: &RawContent) -> Result<RawRate, SourceError> {
        let body = content.body();
        let start = body.find('{').ok_or_else(|| {
            SourceError::not_found(format!("{} has no embedded json object", content.url()))
        })?;

        let document = serde_json::Deserializer::from_str(&body[start..])
            .into_iter::<Value>()
            .next()
            .ok_or_else(|| SourceError::not_found("embedded json object is empty"))?
            .map_err(|error| {
                SourceError::not_found(format!(
                    "embedded json on {} is malformed: {error}",
                    content.url()
                ))
            })?;

        let mut node = &document;
        for key in &self.path {
            node = node.get(key).ok_or_else(|| {
                SourceError::not_found(format!(
                    "key path '{}' is missing '{key}'",
                    self.path.join(".")
                ))
            })?;
        }

        match node {
            Value::String(text) => Ok(RawRate::Text(text.clone())),
            Value::Number(number) => number.as_f64().map(RawRate::Float).ok_or_else(|| {
                SourceError::not_found(format!("'{number}' is not representable as a rate"))
            }),
            other => Err(SourceError::not_found(format!(
                "key path '{}' holds {other} instead of a rate",
                self.path.join(".")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceErrorKind;

    const BLOB: &str = r#"var dolartoday =
        {"_antibloqueo":{"mobile":"https://example.test"},
         "USD":{"transferencia":226984.12,"dolartoday":227123.45,"efectivo_real":"198.432,81"},
         "EUR":{"dolartoday":250000.5}};
        // end of file
    "#;

    fn content(body: &str) -> RawContent {
        RawContent::new("https://widget.example.test/custom/rate.js", body)
    }

    #[test]
    fn numeric_leaf_is_a_native_float() {
        let extractor = EmbeddedJson::new(["USD", "dolartoday"]).expect("valid path");

        let candidate = extractor.extract(&content(BLOB)).expect("key present");

        assert_eq!(candidate, RawRate::Float(227123.45));
    }

    #[test]
    fn string_leaf_is_text() {
        let extractor = EmbeddedJson::new(["USD", "efectivo_real"]).expect("valid path");

        let candidate = extractor.extract(&content(BLOB)).expect("key present");

        assert_eq!(candidate, RawRate::Text(String::from("198.432,81")));
    }

    #[test]
    fn blob_without_object_is_not_found() {
        let extractor = EmbeddedJson::new(["USD", "dolartoday"]).expect("valid path");

        let error = extractor
            .extract(&content("console.log('maintenance');"))
            .expect_err("no object");

        assert_eq!(error.kind(), SourceErrorKind::NotFound);
    }

    #[test]
    fn malformed_json_is_not_found() {
        let extractor = EmbeddedJson::new(["USD", "dolartoday"]).expect("valid path");

        let error = extractor
            .extract(&content(r#"var x = {"USD": {"dolartoday": 1,}"#))
            .expect_err("malformed");

        assert_eq!(error.kind(), SourceErrorKind::NotFound);
        assert!(error.message().contains("malformed"));
    }

    #[test]
    fn missing_key_names_the_path() {
        let extractor = EmbeddedJson::new(["USD", "bitcoin"]).expect("valid path");

        let error = extractor.extract(&content(BLOB)).expect_err("missing key");

        assert!(error.message().contains("USD.bitcoin"));
    }

    #[test]
    fn empty_path_is_rejected() {
        assert_eq!(EmbeddedJson::new(Vec::<String>::new()), Err(ConfigError::EmptyKeyPath));
        assert_eq!(EmbeddedJson::new(["USD", ""]), Err(ConfigError::EmptyKeyPath));
    }
}

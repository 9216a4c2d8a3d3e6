//! Conversion options.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};

/// Default cap on blockquote nesting.
pub const DEFAULT_MAX_QUOTE_DEPTH: usize = 32;

/// Options accepted by [`crate::Pipeline`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Emit slug `id` attributes on headings.
    #[serde(alias = "headingIds")]
    pub heading_ids: bool,
    /// Maximum blockquote nesting; deeper markers are clamped.
    #[serde(alias = "maxQuoteDepth")]
    pub max_quote_depth: usize,
    /// Language class used for fences without a tag.
    #[serde(alias = "defaultCodeLanguage")]
    pub default_code_language: String,
    /// Open links in a new browsing context.
    #[serde(alias = "linkTargetBlank")]
    pub link_target_blank: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            heading_ids: false,
            max_quote_depth: DEFAULT_MAX_QUOTE_DEPTH,
            default_code_language: "plaintext".to_string(),
            link_target_blank: true,
        }
    }
}

impl ConvertOptions {
    /// Checks option values that would otherwise produce broken markup.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.max_quote_depth == 0 {
            return Err(ConvertError::invalid_options(
                "maxQuoteDepth",
                "must be at least 1",
            ));
        }
        if self.default_code_language.is_empty()
            || self
                .default_code_language
                .chars()
                .any(|c| c.is_whitespace() || c == '"' || c == '<' || c == '>')
        {
            return Err(ConvertError::invalid_options(
                "defaultCodeLanguage",
                format!(
                    "{:?} is not a usable class name",
                    self.default_code_language
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ConvertOptions::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_depth() {
        let options = ConvertOptions {
            max_quote_depth: 0,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ConvertError::InvalidOptions {
                field: "maxQuoteDepth",
                ..
            })
        ));
    }

    #[test]
    fn rejects_language_with_spaces() {
        let options = ConvertOptions {
            default_code_language: "plain text".into(),
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let options: ConvertOptions =
            serde_json::from_str(r#"{"headingIds": true, "maxQuoteDepth": 4}"#).unwrap();
        assert!(options.heading_ids);
        assert_eq!(options.max_quote_depth, 4);
        assert_eq!(options.default_code_language, "plaintext");
        assert!(options.link_target_blank);
    }
}

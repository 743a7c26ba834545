//! Analysis prompt templates.

use std::fmt;
use std::str::FromStr;

const STANDARD_INSTRUCTIONS: &str = "Analyze the following text for potential misinformation, \
bias, or lack of verifiable sources. If there are issues, flag them and explain why. \
Be specific, and provide a confidence rating (High/Medium/Low):";

const EXTENDED_INSTRUCTIONS: &str = "Analyze the following text for potential misinformation, \
bias, cognitive biases, logical fallacies, or lack of verifiable sources. If there are issues, \
flag them and explain why. Name any cognitive bias or logical fallacy you identify \
(e.g. 'Confirmation Bias', 'Ad Hominem', 'Appeal to Authority'). \
Be specific, and provide a confidence rating (High/Medium/Low):";

const STANDARD_FLAG_EXAMPLES: &str = "'Potential Bias', 'Unverified Claim'";

const EXTENDED_FLAG_EXAMPLES: &str =
    "'Potential Bias', 'Unverified Claim', 'Logical Fallacy: Straw Man'";

/// Which instruction set the prompt uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptVariant {
    /// Misinformation, bias and unverifiable claims.
    #[default]
    Standard,
    /// Standard checks plus cognitive biases and logical fallacies.
    Extended,
}

impl PromptVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptVariant::Standard => "standard",
            PromptVariant::Extended => "extended",
        }
    }

    fn instructions(&self) -> &'static str {
        match self {
            PromptVariant::Standard => STANDARD_INSTRUCTIONS,
            PromptVariant::Extended => EXTENDED_INSTRUCTIONS,
        }
    }

    fn flag_examples(&self) -> &'static str {
        match self {
            PromptVariant::Standard => STANDARD_FLAG_EXAMPLES,
            PromptVariant::Extended => EXTENDED_FLAG_EXAMPLES,
        }
    }
}

impl fmt::Display for PromptVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(PromptVariant::Standard),
            "extended" => Ok(PromptVariant::Extended),
            other => Err(format!(
                "unknown prompt variant '{}', expected 'standard' or 'extended'",
                other
            )),
        }
    }
}

/// Embeds `text` verbatim into the variant's template.
pub fn build_prompt(variant: PromptVariant, text: &str) -> String {
    format!(
        "{instructions}\n\n\
         Text: {text}\n\n\
         Respond in this format:\n\
         Flags: [list of flags, e.g. {examples}]\n\
         Explanation: ...\n\
         Confidence: ...\n",
        instructions = variant.instructions(),
        text = text,
        examples = variant.flag_examples(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_prompt_matches_template() {
        let prompt = build_prompt(PromptVariant::Standard, "The sky is green.");

        assert_eq!(
            prompt,
            "Analyze the following text for potential misinformation, bias, or lack of \
             verifiable sources. If there are issues, flag them and explain why. Be specific, \
             and provide a confidence rating (High/Medium/Low):\n\n\
             Text: The sky is green.\n\n\
             Respond in this format:\n\
             Flags: [list of flags, e.g. 'Potential Bias', 'Unverified Claim']\n\
             Explanation: ...\n\
             Confidence: ...\n"
        );
    }

    #[test]
    fn text_is_embedded_verbatim() {
        let text = "  line one\n{braces} and \"quotes\"  ";
        let prompt = build_prompt(PromptVariant::Standard, text);
        assert!(prompt.contains(&format!("Text: {}\n\n", text)));
    }

    #[test]
    fn extended_prompt_asks_for_fallacies() {
        let prompt = build_prompt(PromptVariant::Extended, "x");
        assert!(prompt.contains("logical fallacies"));
        assert!(prompt.contains("cognitive biases"));
        assert!(prompt.ends_with("Confidence: ...\n"));
    }

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(
            build_prompt(PromptVariant::Extended, "same"),
            build_prompt(PromptVariant::Extended, "same")
        );
    }

    #[test]
    fn parses_variant_names() {
        assert_eq!("standard".parse::<PromptVariant>(), Ok(PromptVariant::Standard));
        assert_eq!(" Extended ".parse::<PromptVariant>(), Ok(PromptVariant::Extended));
        assert!("verbose".parse::<PromptVariant>().is_err());
    }
}

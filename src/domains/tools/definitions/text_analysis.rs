//! Text analyzer tool definition.
//!
//! Computes simple statistics over a block of text: character, word,
//! sentence and paragraph counts plus a couple of averages.

use tracing::{info, instrument};

use crate::domains::tools::error::ToolError;
use crate::domains::tools::handlers::{InvocationResult, ToolDescriptor};
use crate::domains::tools::schema::{ParamType, ParameterSpec, ToolArguments};

/// Characters that end a sentence.
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Punctuation stripped from the end of a word before measuring it.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Statistics computed for a piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStats {
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub avg_words_per_sentence: f64,
    pub avg_word_length: f64,
}

impl TextStats {
    pub fn render(&self) -> String {
        format!(
            "Text analysis:\n\n\
             Characters (with spaces): {}\n\
             Characters (without spaces): {}\n\
             Words: {}\n\
             Sentences: {}\n\
             Paragraphs: {}\n\
             Average words per sentence: {:.1}\n\
             Average word length: {:.1}",
            self.characters,
            self.characters_no_spaces,
            self.words,
            self.sentences,
            self.paragraphs,
            self.avg_words_per_sentence,
            self.avg_word_length
        )
    }
}

/// Text analyzer tool.
pub struct AnalyzeTextTool;

impl AnalyzeTextTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "analyze_text";

    /// Human-readable title.
    pub const TITLE: &'static str = "Analyze text";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Count characters, words, sentences and paragraphs in a text and report averages.";

    /// Declared parameters.
    pub fn parameters() -> Vec<ParameterSpec> {
        vec![ParameterSpec::required(
            "text",
            ParamType::String,
            "Text to analyze",
        )]
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(args: &ToolArguments) -> InvocationResult {
        let text = args.str("text")?;
        info!("Analyze text tool called ({} bytes)", text.len());
        analyze_text(text).map(|stats| stats.render())
    }

    /// Build the registry descriptor for this tool.
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            Self::parameters(),
            Self::execute,
        )
    }
}

/// Compute statistics for `text`.
///
/// # Errors
///
/// Returns a validation error when the text is empty or only whitespace.
pub fn analyze_text(text: &str) -> Result<TextStats, ToolError> {
    if text.trim().is_empty() {
        return Err(ToolError::validation("Please provide some text to analyze"));
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let sentences = text
        .chars()
        .filter(|c| SENTENCE_TERMINATORS.contains(c))
        .count();
    let paragraphs = text
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .count();

    let letters: usize = words
        .iter()
        .map(|w| w.trim_end_matches(TRAILING_PUNCTUATION).chars().count())
        .sum();

    Ok(TextStats {
        characters: text.chars().count(),
        characters_no_spaces: text.chars().filter(|c| *c != ' ').count(),
        words: words.len(),
        sentences,
        paragraphs,
        avg_words_per_sentence: round1(words.len() as f64 / sentences.max(1) as f64),
        avg_word_length: round1(letters as f64 / words.len() as f64),
    })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

//! Prompt assembly and the generation call for a single record.

use crate::error::TriageError;
use crate::llm::TextGenerator;
use crate::mail::EmailRecord;

/// Fixed system preamble sent ahead of every classification prompt.
const SYSTEM_PROMPT: &str = "Cutting Knowledge Date: December 2023\nYou are a helpful assistant.";

/// Output budget per classification. The expected response is three short
/// lines, so this is a cost/latency control rather than a correctness
/// guarantee; a response truncated mid-line is rejected by the parser.
const MAX_OUTPUT_TOKENS: u32 = 20;

pub struct Classifier<G> {
    engine: G,
}

impl<G: TextGenerator> Classifier<G> {
    pub fn new(engine: G) -> Self {
        Self { engine }
    }

    /// Builds the fixed classification prompt for a record.
    ///
    /// Subject and sender are embedded verbatim, with no escaping: a subject
    /// that itself resembles the output format can corrupt downstream
    /// parsing. Known limitation, kept to match the reference behavior.
    pub fn build_prompt(record: &EmailRecord) -> String {
        format!(
            "{system}\n\n\
             Here is an email:\n\
             - Subject: \"{subject}\"\n\
             - Sender: \"{sender}\"\n\n\
             Categorize this email into one of the following categories: \
             \"Work\", \"School\", \"Shopping\", \"Other\".\n\
             Rank the email's priority as \"Urgent\", \"Important\", or \"Normal\".\n\
             Decide if the email requires a response (\"Yes\" or \"No\").\n\n\
             Format your response exactly as follows:\n\
             Category: <category>\n\
             Priority: <priority>\n\
             Requires Response: <yes/no>\n\
             Do not include explanations and do not add code block",
            system = SYSTEM_PROMPT,
            subject = record.subject,
            sender = record.sender,
        )
    }

    /// Runs the generation engine over the record's prompt and returns the
    /// trimmed raw text. No retries at this layer.
    pub async fn generate(&self, record: &EmailRecord) -> Result<String, TriageError> {
        let prompt = Self::build_prompt(record);
        let raw = self.engine.generate(&prompt, MAX_OUTPUT_TOKENS).await?;
        Ok(raw.trim().to_string())
    }
}

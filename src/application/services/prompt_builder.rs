use crate::domain::Prompt;

const ROLE_AND_RULES: &str = "\
You are an advanced AI Document Analysis Assistant.

Your role:
- Carefully analyze the provided context from a document.
- Answer the user's question strictly using the given context.
- If the context does not contain the answer, say that the document does not cover it.

Response Guidelines:
- Be clear, precise, and structured.
- Use bullet points if helpful.
- If the user asks for explanation -> explain step-by-step.
- If the user asks for summary -> provide concise summary.
- If the user asks for comparison -> present comparison in table format.
- If the user asks for definition -> give exact definition from context.
- If numerical data exists -> include exact values.";

const PASSAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Assembles the grounding prompt. The response style is chosen by the model
/// from the instructions; nothing here inspects the question.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build<S: AsRef<str>>(&self, context: &[S], question: &str) -> Prompt {
        let context_text = context
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(PASSAGE_SEPARATOR);

        Prompt::new(format!(
            "{ROLE_AND_RULES}\n\nContext:\n{context_text}\n\nUser Question:\n{question}\n\nAnswer:\n"
        ))
    }
}

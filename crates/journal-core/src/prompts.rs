//! Prompt templates sent to the generative text backend.
//!
//! Wording lives here as versioned data so it can change without touching
//! the services that render it.

/// A fixed instruction block followed by caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub version: u32,
    pub instructions: &'static str,
    /// Maximum number of input characters included in the prompt.
    pub input_limit: Option<usize>,
}

impl PromptTemplate {
    /// Instructions, a newline, then the input verbatim (possibly truncated).
    pub fn render(&self, input: &str) -> String {
        let input = match self.input_limit {
            Some(limit) => input.chars().take(limit).collect::<String>(),
            None => input.to_string(),
        };
        format!("{}\n{}", self.instructions, input)
    }
}

pub const ENHANCE_PROMPT: PromptTemplate = PromptTemplate {
    name: "enhance",
    version: 3,
    instructions: "You are the writing assistant for a personal journal. The writer keeps it for \
their family to read someday: memories, reflections, quick observations about life, and longer \
pieces on things they care about.

Take whatever they have written and make it read beautifully while keeping it unmistakably theirs.

RULES:
- Fix grammar, spelling, and punctuation as you go
- Organize disjointed thoughts into clear, flowing paragraphs with gentle transitions
- Preserve their voice, warmth, idiosyncratic phrasing, and the rough edges that give it character
- Keep every personal detail, name, fact, opinion, and perspective exactly as written
- Never invent stories or details, and never leave out anything they mentioned
- Words from other languages stay untranslated and unexplained
- Never make it formal, stiff, or essay-like

EXPANDING FOR CLARITY:
Some passages are already clear and complete. Leave those short and polished.
Other passages are compressed in a way a future reader might not follow: a reference that needs \
a sentence of context, or an idea that jumps too quickly. Expand those just enough to make the \
meaning clear, without padding or over-explaining. Never inflate a short piece.

CRITICAL: Output ONLY the rewritten text. No preamble, no titles or headings, no commentary.

Their writing:",
    input_limit: None,
};

pub const METADATA_PROMPT: PromptTemplate = PromptTemplate {
    name: "metadata",
    version: 2,
    instructions: "You are creating metadata for a personal journal entry.

Based on the content below, write:
1. A title of 3-8 words. Make it concrete and conversational, the way the writer would say it \
out loud. Avoid grandiose words such as \"embrace\", \"journey\", \"tapestry\", \"wisdom\", \
\"legacy\", \"cherish\", or \"timeless\".
2. A category of 1-2 words, for example \"Family\", \"Travel\", \"Daily Life\", or \"Memories\".
3. An excerpt of 15-25 words in 1-2 sentences that invites the reader in.

Format your response EXACTLY like this, with no extra text:
TITLE: [title]
CATEGORY: [category]
EXCERPT: [excerpt]

Content:",
    input_limit: Some(800),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_prompt_appends_text_verbatim() {
        let raw = "went to market. \"bought\" mangoes\n\nhot day";

        let prompt = ENHANCE_PROMPT.render(raw);

        assert!(prompt.starts_with(ENHANCE_PROMPT.instructions));
        assert!(prompt.ends_with(&format!("Their writing:\n{raw}")));
    }

    #[test]
    fn test_metadata_prompt_truncates_content() {
        let content = "a".repeat(2000);

        let prompt = METADATA_PROMPT.render(&content);

        assert_eq!(prompt.len(), METADATA_PROMPT.instructions.len() + 1 + 800);
        assert!(prompt.contains("TITLE: [title]"));
    }
}

use kbqa_core::demo::CONTACT_EMAIL;

/// Small stable company context prepended to every answer prompt.
pub const COMPANY_SUMMARY: &str = "Titan Steelworks Inc. (demo) supplies structural beams, plate/sheet, rebar, \
tubing/pipe, angles/channels, with basic fabrication (cutting, drilling, coating) and delivery services.";

pub const EXCERPT_SEPARATOR: &str = "\n\n---\n\n";
pub const NO_EXCERPTS_MARKER: &str = "[no excerpts]";

/// Upper bound on words per reformulated query.
pub const VARIANT_MAX_WORDS: usize = 12;

pub fn expansion_prompt(question: &str) -> String {
    format!(
        r#"Rewrite the user's question into 4-6 diverse search queries for internal Markdown docs.
Include: (a) literal rewrite, (b) synonym-based, (c) policy/handbook phrasing, (d) typo-fixed version, (e) short keyword query, (f) optional alternate wording.
Each under {VARIANT_MAX_WORDS} words. One per line.

User question: {question}"#
    )
}

pub fn rerank_prompt(question: &str, top_k: usize, previews: &str) -> String {
    format!(
        r#"Select the most relevant excerpts to answer the user using ONLY these excerpts.
Return the best {top_k} indices in descending relevance as a comma-separated list of numbers.

User: {question}

Excerpts:
{previews}"#
    )
}

pub fn answer_prompt(question: &str, excerpts: &str) -> String {
    format!(
        r#"You are Titan Steelworks' virtual assistant.
- Answer USING ONLY the Business Information provided.
- Keep replies to at most one short paragraph. Use brief bullets ONLY for specs/options.
- If information is insufficient, say so briefly, ask ONE clarifying question, and suggest {CONTACT_EMAIL} for a formal quote.
- Maintain a professional corporate tone.

Company Summary:
{COMPANY_SUMMARY}

Business Information (excerpts):
{excerpts}

User: {question}
Assistant:"#
    )
}

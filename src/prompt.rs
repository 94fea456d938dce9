//! Fixed prompt templates and history rendering.
//!
//! The chat-history "placeholder" is modeled as an explicit rendering
//! step: given a list of prior turns, these functions produce a concrete
//! list of role/content messages (for the rewriter) or a formatted
//! transcript string (for the answer prompt). Nothing here is dynamic
//! templating.

use crate::llm::ChatMessage;
use crate::models::ChatTurn;

/// Instruction for reformulating a follow-up question into a standalone
/// question. The model must not answer it.
pub const REWRITE_INSTRUCTION: &str = "Given a chat history and the latest user question \
which might reference context in the chat history, \
formulate a standalone question which can be understood \
without the chat history. Do NOT answer the question, \
just reformulate it if needed and otherwise return it as is.";

/// Separator placed between retrieved chunks when they are stuffed into
/// the answer prompt as context.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Substituted for the context section when retrieval returned nothing,
/// so the composer never sends an empty section.
pub const NO_CONTEXT_NOTICE: &str = "(no passages were retrieved from the uploaded documents)";

/// Build the message sequence for the query-rewrite call: the fixed
/// instruction, the history expanded into user/assistant turns, then the
/// new question.
pub fn rewrite_messages(history: &[ChatTurn], question: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 2);
    messages.push(ChatMessage::system(REWRITE_INSTRUCTION));
    for turn in history {
        messages.push(ChatMessage::user(turn.question.clone()));
        messages.push(ChatMessage::assistant(turn.answer.clone()));
    }
    messages.push(ChatMessage::user(question));
    messages
}

/// Build the single-message answer prompt embedding context, chat history,
/// and the (rewritten) question.
pub fn answer_messages(context: &str, history: &[ChatTurn], question: &str) -> Vec<ChatMessage> {
    let context = if context.trim().is_empty() {
        NO_CONTEXT_NOTICE
    } else {
        context
    };
    let prompt = format!(
        "You are an AI assistant that helps summarize and answer questions from documents.\n\n\
         Context:\n{}\n\n\
         Chat History:\n{}\n\n\
         User Question:\n{}",
        context,
        render_history(history),
        question
    );
    vec![ChatMessage::user(prompt)]
}

/// Render prior turns as a plain transcript. An empty history renders as
/// an explicit marker rather than an empty string.
pub fn render_history(history: &[ChatTurn]) -> String {
    if history.is_empty() {
        return "(none)".to_string();
    }
    history
        .iter()
        .map(|turn| format!("Human: {}\nAI: {}", turn.question, turn.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

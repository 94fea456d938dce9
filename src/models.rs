//! Core data types that flow through the question-answering pipeline.
//!
//! Everything here is ephemeral: documents and chat turns live for the
//! duration of a single request and are never persisted.

/// An uploaded document: raw bytes plus the client-supplied filename.
///
/// Owned by the orchestrator for the duration of one request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// One prior (question, answer) turn of a conversation.
///
/// The pipeline initializes the history empty on every request; this type
/// exists so a surrounding system that does persist turns can feed them
/// back in through
/// [`QaPipeline::answer_with_history`](crate::pipeline::QaPipeline::answer_with_history).
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
}

impl ChatTurn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

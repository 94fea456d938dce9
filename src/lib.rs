//! # askdoc
//!
//! Retrieval-augmented question answering over uploaded PDF documents.
//!
//! A user submits one or more PDFs plus a natural-language question; the
//! pipeline extracts text, chunks it, embeds the chunks into an in-memory
//! vector index, rewrites the question against chat history, retrieves the
//! nearest chunks, and asks a language model to compose an answer grounded
//! in them. Every request is self-contained: the index is rebuilt from
//! scratch each time and nothing persists between calls.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────────────────┐   ┌─────────────┐
//! │  Upload   │──▶│  Pipeline              │──▶│ VectorIndex │
//! │ PDF bytes │   │ Extract+Chunk+Embed   │   │ (in-memory) │
//! └──────────┘   └───────────┬───────────┘   └──────┬──────┘
//!                            │                      │
//!                ┌───────────▼───────────┐          │
//!                │ Rewrite → Retrieve →  │◀─────────┘
//!                │ Compose → ChatModel   │
//!                └───────────┬───────────┘
//!                            ▼
//!                      answer string
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Environment-driven configuration |
//! | [`error`] | Error taxonomy |
//! | [`models`] | Documents and chat turns |
//! | [`extract`] | PDF text extraction |
//! | [`chunk`] | Sliding-window text chunking |
//! | [`embedding`] | Embedding provider abstraction |
//! | [`index`] | Nearest-neighbor vector index |
//! | [`llm`] | Chat model abstraction |
//! | [`prompt`] | Prompt templates and history rendering |
//! | [`pipeline`] | Request orchestration |
//! | [`server`] | HTTP surface (form + `/ask`) |

pub mod chunk;
pub mod config;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod index;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod server;

//! PDF Chat Server Library
//!
//! Upload a PDF, then ask questions about it. Answers are the passage that
//! follows the first place the question (or, failing that, each of its
//! words) appears in the document.
//!
//! # Modules
//!
//! - `document`: Upload decoding, page-source traits, error taxonomy
//! - `corpus`: Concurrent page extraction and ordered corpus assembly
//! - `query`: Exact / word-fallback matching and excerpt construction
//! - `chat`: Session state and conversation transcript
//! - `pdf`: MuPDF-backed page source
//! - `routes`: HTTP API

pub mod chat;
pub mod config;
pub mod corpus;
pub mod document;
pub mod error;
pub mod pdf;
pub mod query;
pub mod routes;
pub mod state;

// Only reachable through `pdf`
mod mupdf;

//! TaxPal API: a thin proxy between the intake wizard and the Gemini API.
//!
//! The server side is two POST endpoints (plan + chat) that shape prompts,
//! hold the provider credential, and relay responses. The client-core modules
//! (intake, plan parsing, form sessions, wizard state, backoff) are exposed as
//! a library so front-ends and tests share one implementation of the contract.

pub mod chat;
pub mod client;
pub mod config;
pub mod errors;
pub mod intake;
pub mod llm_client;
pub mod plan;
pub mod retry;
pub mod routes;
pub mod state;
pub mod wizard;

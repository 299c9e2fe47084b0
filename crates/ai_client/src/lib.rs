//! Gemini solver bridge.
//!
//! Blocking reqwest client (no Tokio runtime required). One operation:
//! submit a natural-language math prompt, receive a structured
//! {result, steps, category} solution. Transport and parse failures map to
//! the same shape via [`MathSolution::failure`]. No retries.

mod client;
mod slot;

pub use client::{AiClient, AiError, MathSolution};
pub use slot::{RequestSlot, SlotGuard};

//! Answer Composition
//!
//! Assembles a grounded prompt from ranked evidence and delegates it to
//! the generation backend. The composer neither filters nor re-ranks:
//! whatever evidence comes in goes into the prompt and is echoed back
//! with the answer.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::retrieve::Evidence;
use super::PipelineError;
use crate::generation::Generator;

/// Generated answer paired with the evidence that grounded it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundedAnswer {
    pub answer: String,
    pub evidence: Vec<Evidence>,
}

/// Build the grounded prompt: constraint instruction, question, evidence
/// labeled by 1-based rank, answer cue. With no evidence the sources
/// section is empty and the instruction directs the model to say so.
pub fn compose_prompt(question: &str, evidence: &[Evidence]) -> String {
    let sources = evidence
        .iter()
        .enumerate()
        .map(|(i, e)| format!("[Source {}] {}", i + 1, e.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You answer using only the sources below. If unsure, say you don't know.\n\n\
         Question: {}\n\nSources:\n{}\n\nAnswer:",
        question, sources
    )
}

/// Grounded-generation orchestrator.
pub struct AnswerComposer {
    generator: Arc<dyn Generator>,
}

impl AnswerComposer {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Generate an answer grounded in `evidence`. The evidence sequence
    /// is returned verbatim alongside the trimmed answer text.
    pub async fn answer(
        &self,
        question: &str,
        evidence: Vec<Evidence>,
    ) -> Result<GroundedAnswer, PipelineError> {
        let prompt = compose_prompt(question, &evidence);
        let answer = self.generator.generate(&prompt).await?;
        Ok(GroundedAnswer { answer: answer.trim().to_string(), evidence })
    }
}

//! Answer-synthesis prompt built from formatted citations

use serde::{Deserialize, Serialize};

use crate::citation::Citation;
use crate::geometry::BoundingBox;
use crate::position::PositionLabel;

const INSTRUCTIONS: &str = "\
You are an expert clinical protocol assistant that extracts information from the CONTEXT provided
between <context> and </context> tags.

When answering the question between <question> and </question> tags:
- Be concise and accurate
- Do NOT hallucinate or make up information
- If you don't have the information in the CONTEXT, clearly say so
- Only answer based on information in the CONTEXT
- Always cite your sources using the [Source N] references
- Mention the document name, page, and position when citing

Do not mention \"the CONTEXT\" in your answer - write naturally as if you're an expert.";

/// A numbered source backing the synthesized answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub source_num: usize,
    pub doc_name: String,
    pub page: i64,
    pub position: PositionLabel,
    pub bbox: BoundingBox,
    pub text: String,
}

/// Prompt text plus the sources it refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisPrompt {
    pub prompt: String,
    pub citations: Vec<SourceCitation>,
}

/// Build the synthesis prompt. Sources are numbered from 1 in the order
/// given; `excerpt_chars` bounds the text kept on each `SourceCitation`.
pub fn build_synthesis_prompt(
    question: &str,
    results: &[Citation],
    excerpt_chars: usize,
) -> SynthesisPrompt {
    let mut chunks = Vec::with_capacity(results.len());
    let mut citations = Vec::with_capacity(results.len());

    for (i, result) in results.iter().enumerate() {
        let source_num = i + 1;
        chunks.push(format!(
            "[Source {}] Document: {}, {}\n{}",
            source_num,
            result.doc_name,
            result.location(),
            result.text
        ));
        citations.push(SourceCitation {
            source_num,
            doc_name: result.doc_name.clone(),
            page: result.page,
            position: result.position,
            bbox: result.bbox,
            text: result.excerpt(excerpt_chars),
        });
    }

    let context = chunks.join("\n\n");
    let prompt = format!(
        "{INSTRUCTIONS}\n\n<context>\n{context}\n</context>\n\n<question>\n{question}\n</question>\n\nAnswer:"
    );

    SynthesisPrompt { prompt, citations }
}

/// Request body for the hosted completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: &SynthesisPrompt) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.prompt.clone(),
        }
    }
}

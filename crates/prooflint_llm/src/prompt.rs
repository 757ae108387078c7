//! Prompt construction for the enhancement pass.

use prooflint_core::{DocumentUnit, Finding};

/// The response contract the model is held to.
pub const SYSTEM_PROMPT: &str = "\
You are a careful copy editor. You receive numbered findings from an \
automated grammar checker, each with the sentence it was found in. For \
each finding you can improve, write a clearer explanation of the \
problem, a concrete suggestion, and the full corrected sentence.

Respond with JSON only, no prose and no code fences, in exactly this shape:
{\"enhancements\":[{\"id\":0,\"original_text\":\"the sentence exactly as given\",\"problem\":\"...\",\"suggestion\":\"...\",\"corrected_sentence\":\"...\"}]}

Rules:
- id and original_text must echo a finding you received.
- Never invent findings for sentences you were not given.
- Keep corrections minimal; do not rewrite style.";

/// Builds the user prompt for one batch.
///
/// Items are numbered by their position in `batch`; the response's `id`
/// field refers back to that numbering. Each item carries the sentence
/// before and after the flagged one when the paragraph has them.
pub fn build_user_prompt(document: &DocumentUnit, batch: &[(usize, &Finding)]) -> String {
    let mut prompt = String::new();
    for (batch_id, (_, finding)) in batch.iter().enumerate() {
        let (before, after) = neighbors(document, finding);
        if batch_id > 0 {
            prompt.push('\n');
        }
        prompt.push_str(&format!("Finding {batch_id}\n"));
        prompt.push_str(&format!("Category: {}\n", finding.category.name()));
        prompt.push_str(&format!("Sentence: \"{}\"\n", finding.original_text));
        if let Some(before) = before {
            prompt.push_str(&format!("Context before: \"{before}\"\n"));
        }
        if let Some(after) = after {
            prompt.push_str(&format!("Context after: \"{after}\"\n"));
        }
        prompt.push_str(&format!("Problem: {}\n", finding.problem));
        prompt.push_str(&format!("Current suggestion: {}\n", finding.suggestion));
    }
    prompt
}

/// The sentences immediately before and after the finding's sentence,
/// within the same paragraph.
fn neighbors(document: &DocumentUnit, finding: &Finding) -> (Option<String>, Option<String>) {
    let Some(line) = document.line(finding.line_number) else {
        return (None, None);
    };

    let before = if finding.sentence_index > 0 {
        line.sentences.get(finding.sentence_index - 1).cloned()
    } else {
        previous_sentence(document, finding.line_number)
    };

    let after = line
        .sentences
        .get(finding.sentence_index + 1)
        .cloned()
        .or_else(|| next_sentence(document, finding.line_number));

    (before, after)
}

fn previous_sentence(document: &DocumentUnit, line_number: u32) -> Option<String> {
    let mut n = line_number;
    while n > 1 {
        n -= 1;
        let line = document.line(n)?;
        if line.is_blank() {
            return None;
        }
        if let Some(sentence) = line.sentences.last() {
            return Some(sentence.clone());
        }
    }
    None
}

fn next_sentence(document: &DocumentUnit, line_number: u32) -> Option<String> {
    let total = document.metadata.total_lines as u32;
    let mut n = line_number;
    while n < total {
        n += 1;
        let line = document.line(n)?;
        if line.is_blank() {
            return None;
        }
        if let Some(sentence) = line.sentences.first() {
            return Some(sentence.clone());
        }
    }
    None
}

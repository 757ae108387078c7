use crate::document::{DocumentUnit, LineUnit};
use crate::error::TextError;

/// Common abbreviations whose trailing period does not end a sentence.
/// Multi-dot forms are listed without the final period (`e.g`, `u.s`).
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "rev", "hon", "sr", "jr", "st", "capt", "sgt", "lt",
    "col", "gen", "sen", "gov", "pres", "supt", "det", "ave", "blvd", "rd", "dept", "univ",
    "inc", "ltd", "co", "corp", "bros", "etc", "vs", "viz", "approx", "est", "misc", "ed",
    "eds", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov",
    "dec", "e.g", "i.e", "a.m", "p.m", "u.s", "u.k", "ph.d", "m.d", "b.a", "m.a", "d.c",
    "b.c", "a.d",
];

/// Abbreviations that only abbreviate when a number follows, as in
/// `No. 5`, `Fig. 3` or `pp. 12`. Elsewhere the period ends a sentence
/// (`The answer is no.`).
const NUMBERING_ABBREVIATIONS: &[&str] = &["no", "fig", "vol", "ch", "sec", "pp", "p"];

/// Splits a document into line-faithful units.
///
/// Every physical line of the input appears in the output in order, blank
/// lines included, so reported line numbers always match the source. A
/// sentence is attached to the line where it terminates; a sentence broken
/// by a line wrap is stitched back together and attached to its final line
/// with `continuation_from` pointing at its first line.
pub struct Segmenter;

impl Segmenter {
    pub fn segment(filename: &str, text: &str) -> Result<DocumentUnit, TextError> {
        validate(text)?;

        let mut lines: Vec<LineUnit> = physical_lines(text)
            .into_iter()
            .enumerate()
            .map(|(i, raw)| LineUnit::new((i + 1) as u32, raw))
            .collect();

        let splits: Vec<LineSplit> = lines.iter().map(|l| split_line(&l.raw_text)).collect();
        stitch(&mut lines, splits);

        Ok(DocumentUnit::new(filename, lines, text.len()))
    }
}

/// Rejects input that does not look like text.
fn validate(text: &str) -> Result<(), TextError> {
    if text.contains('\0') {
        return Err(TextError::unreadable("document contains NUL bytes"));
    }
    let mut control = 0usize;
    let mut total = 0usize;
    for c in text.chars() {
        total += 1;
        if c.is_control() && !matches!(c, '\n' | '\r' | '\t') {
            control += 1;
        }
    }
    if control > 0 && control * 20 >= total {
        return Err(TextError::unreadable(format!(
            "document does not look like text ({control} control characters in {total})"
        )));
    }
    Ok(())
}

/// Physical lines in order, with line endings stripped. A final empty
/// fragment produced by a terminating newline is not a line.
fn physical_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect()
}

struct LineSplit {
    /// Sentences that terminate within the line.
    complete: Vec<String>,
    /// Unterminated text at the end of the line, if any.
    trailing: Option<String>,
}

/// Splits one line into complete sentences and a trailing fragment.
///
/// Splitting logic:
/// - `.`, `!`, `?` end a sentence only when followed by whitespace or the
///   end of the line. Runs like `?!` count as one terminator.
/// - A period after a known abbreviation or a single-letter initial is
///   not a boundary.
/// - Closing quotes and brackets after the terminator belong to the
///   sentence. A lowercase word after a closing quote keeps the dialogue
///   tag in the same sentence, as in `"Stop!" he shouted.`
/// - An ellipsis followed by a lowercase word is a pause, not an end.
fn split_line(text: &str) -> LineSplit {
    let mut complete = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }

        let mut end = idx + c.len_utf8();
        let mut cluster_len = 1usize;
        while let Some(&(i2, c2)) = chars.peek() {
            if matches!(c2, '.' | '!' | '?') {
                end = i2 + c2.len_utf8();
                cluster_len += 1;
                chars.next();
            } else {
                break;
            }
        }

        let mut closers = 0usize;
        while let Some(&(i2, c2)) = chars.peek() {
            if matches!(c2, '"' | '\'' | '\u{201d}' | '\u{2019}' | ')' | ']') {
                end = i2 + c2.len_utf8();
                closers += 1;
                chars.next();
            } else {
                break;
            }
        }

        let next = chars.peek().map(|&(_, c2)| c2);
        let at_end = next.is_none();
        if !at_end && !next.is_some_and(|c2| c2.is_whitespace()) {
            // mid-token period as in `example.com` or `3.14`
            continue;
        }
        let upcoming = text[end..].chars().find(|c2| !c2.is_whitespace());
        if c == '.' && cluster_len == 1 && closers == 0 {
            match abbreviation_before(text, idx) {
                Abbreviation::Always => continue,
                Abbreviation::BeforeNumber
                    if upcoming.is_some_and(|c2| c2.is_ascii_digit()) =>
                {
                    continue;
                }
                _ => {}
            }
        }
        if !at_end {
            if closers > 0 && upcoming.is_some_and(|c2| c2.is_lowercase()) {
                continue;
            }
            if c == '.' && cluster_len >= 3 && upcoming.is_some_and(|c2| c2.is_lowercase()) {
                continue;
            }
        }

        let chunk = text[start..end].trim();
        if !chunk.is_empty() {
            complete.push(chunk.to_string());
        }
        start = end;
    }

    let rest = text[start..].trim();
    let trailing = (!rest.is_empty()).then(|| rest.to_string());
    LineSplit { complete, trailing }
}

enum Abbreviation {
    Always,
    BeforeNumber,
    No,
}

/// Classifies the period at `period_idx`: does it close an abbreviation
/// or a single-letter initial?
fn abbreviation_before(text: &str, period_idx: usize) -> Abbreviation {
    let head = &text[..period_idx];
    let token = head
        .rsplit(|c: char| !(c.is_alphanumeric() || c == '.' || c == '\''))
        .next()
        .unwrap_or("");
    if token.is_empty() {
        return Abbreviation::No;
    }

    let mut token_chars = token.chars();
    if let (Some(c0), None) = (token_chars.next(), token_chars.next()) {
        if c0.is_alphabetic() {
            return Abbreviation::Always;
        }
    }

    let key = token.to_lowercase();
    if ABBREVIATIONS.contains(&key.as_str()) {
        Abbreviation::Always
    } else if NUMBERING_ABBREVIATIONS.contains(&key.as_str()) {
        Abbreviation::BeforeNumber
    } else {
        Abbreviation::No
    }
}

struct Carry {
    text: String,
    start_line: u32,
    end_line: u32,
}

/// Walks the per-line splits in order, stitching wrapped sentences across
/// line boundaries. A blank line always flushes the pending fragment, as
/// does a following line that starts with a capitalized word.
fn stitch(lines: &mut [LineUnit], splits: Vec<LineSplit>) {
    let mut carry: Option<Carry> = None;

    for (i, split) in splits.into_iter().enumerate() {
        let line_number = (i + 1) as u32;

        if lines[i].is_blank() {
            flush_carry(lines, &mut carry);
            continue;
        }

        if let Some(c) = carry.take() {
            if continues_previous(&lines[i].raw_text) {
                let LineSplit {
                    mut complete,
                    trailing,
                } = split;
                if !complete.is_empty() {
                    let joined = format!("{} {}", c.text, complete.remove(0));
                    lines[i].continuation_from = Some(c.start_line);
                    lines[i].sentences.push(joined);
                    lines[i].sentences.append(&mut complete);
                    carry = trailing.map(|t| Carry {
                        text: t,
                        start_line: line_number,
                        end_line: line_number,
                    });
                } else if let Some(t) = trailing {
                    carry = Some(Carry {
                        text: format!("{} {}", c.text, t),
                        start_line: c.start_line,
                        end_line: line_number,
                    });
                } else {
                    carry = Some(c);
                    flush_carry(lines, &mut carry);
                }
                continue;
            }
            carry = Some(c);
            flush_carry(lines, &mut carry);
        }

        let LineSplit { complete, trailing } = split;
        lines[i].sentences.extend(complete);
        carry = trailing.map(|t| Carry {
            text: t,
            start_line: line_number,
            end_line: line_number,
        });
    }

    flush_carry(lines, &mut carry);
}

/// A wrapped continuation starts with a lowercase word.
fn continues_previous(raw: &str) -> bool {
    raw.trim_start().chars().next().is_some_and(|c| c.is_lowercase())
}

fn flush_carry(lines: &mut [LineUnit], carry: &mut Option<Carry>) {
    if let Some(c) = carry.take() {
        let unit = &mut lines[(c.end_line - 1) as usize];
        if unit.sentences.is_empty() && c.end_line != c.start_line {
            unit.continuation_from = Some(c.start_line);
        }
        unit.sentences.push(c.text);
    }
}

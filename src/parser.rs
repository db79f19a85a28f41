//! Turn an uploaded marks file into validated [CandidateRecord]s.
//!
//! The accepted format is deliberately loose: two leading comma-separated columns, student id then
//! marks, one row per line, with an optional header. Quoting is *not* supported, a field with an
//! embedded comma shifts the marks column and the row is rejected.
use crate::{CandidateRecord, ExamKind, RejectReason, Score, StudentId, SubjectId};

/// Column names of the marks file, in order.
pub const HEADER: [&str; 2] = ["student_id", "marks"];

/// One non-blank line of input, either a well-formed record or the reason it was discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedRow {
    /// 1-based line number in the original input.
    pub line: u64,
    pub outcome: Result<CandidateRecord, RejectReason>,
}

/// Parse `input`, attaching every record to the given subject and exam.
///
/// Blank lines are skipped without a trace. The first non-blank line is dropped as a header if it
/// mentions one of the [HEADER] columns, or if its second field is not an integer. This can eat a
/// genuine data row whose marks are garbage, which is accepted.
pub fn parse_marks(input: &str, subject: &SubjectId, exam: ExamKind) -> Vec<ParsedRow> {
    let mut rows = Vec::new();
    let mut seen_first = false;

    for (text, line) in input.lines().zip(1..) {
        let fields: Vec<&str> = text.split(',').map(str::trim).collect();
        if fields.iter().all(|field| field.is_empty()) {
            continue;
        }
        if !seen_first {
            seen_first = true;
            if looks_like_header(&fields) {
                continue;
            }
        }

        rows.push(ParsedRow {
            line,
            outcome: parse_fields(&fields, subject, exam),
        });
    }

    rows
}

fn looks_like_header(fields: &[&str]) -> bool {
    let mentions_column = fields.iter().any(|field| {
        let field = field.to_lowercase();
        HEADER.iter().any(|column| field.contains(column))
    });
    let numeric_marks = fields
        .get(1)
        .map_or(false, |marks| marks.parse::<i64>().is_ok());
    mentions_column || !numeric_marks
}

fn parse_fields(
    fields: &[&str],
    subject: &SubjectId,
    exam: ExamKind,
) -> Result<CandidateRecord, RejectReason> {
    let student = fields.first().copied().unwrap_or_default();
    let marks = fields.get(1).copied().unwrap_or_default();
    if student.is_empty() || marks.is_empty() {
        return Err(RejectReason::MissingField);
    }

    Ok(CandidateRecord {
        student: StudentId::from(student),
        subject: subject.clone(),
        exam,
        score: marks.parse::<Score>()?,
    })
}

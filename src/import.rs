//! Import a marks file into a store: parse, reconcile, then summarize.
use log::info;

use crate::{
    parse_marks, AccessError, Action, ExamKind, ImportSummary, MarkStore, Reconciler, Session,
    SubjectId,
};

/// Import every row of `input` as a mark for `subject` and `exam`.
///
/// Only the authorization check can fail. Everything after it is best effort: rows which cannot be
/// parsed or written are reported in the summary, while the others stay written.
pub async fn import_marks<S: MarkStore + ?Sized>(
    session: &Session,
    store: &S,
    input: &str,
    subject: &SubjectId,
    exam: ExamKind,
) -> Result<ImportSummary, AccessError> {
    let principal = session.authorize(Action::ImportMarks)?;

    let parsed = parse_marks(input, subject, exam);
    let candidates = parsed
        .iter()
        .filter_map(|row| Some((row.line, row.outcome.clone().ok()?)));
    let written = Reconciler::new(store).reconcile(candidates).await;
    let summary = ImportSummary::aggregate(&parsed, &written);

    info!(
        "{} imported {} {} marks for '{}': {} written, {} errors",
        principal.user, summary.valid_rows, exam, subject, summary.success_count, summary.error_count
    );
    Ok(summary)
}

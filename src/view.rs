//! Read access to stored marks.
use crate::{AccessError, Action, MarkStore, Session, StoreError, StoredRecord, StudentId};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The marks of `student`, ordered by subject then exam. Students may only look at their own.
pub async fn student_marks<S: MarkStore + ?Sized>(
    session: &Session,
    store: &S,
    student: &StudentId,
) -> Result<Vec<StoredRecord>, ViewError> {
    session.authorize(Action::ViewMarks(student.clone()))?;
    let mut records = store.find_by_student(student).await?;
    records.sort_by(|lhs, rhs| (&lhs.subject, lhs.exam).cmp(&(&rhs.subject, rhs.exam)));
    Ok(records)
}

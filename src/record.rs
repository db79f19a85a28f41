//! Records flowing from an import into the store.
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::core::{ExamKind, NaturalKey, RecordId, Score, StudentId, SubjectId};

/// A validated row of an import, not yet written anywhere.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CandidateRecord {
    pub student: StudentId,
    pub subject: SubjectId,
    pub exam: ExamKind,
    pub score: Score,
}

impl CandidateRecord {
    pub fn key(&self) -> NaturalKey {
        NaturalKey {
            student: self.student.clone(),
            subject: self.subject.clone(),
            exam: self.exam,
        }
    }
}

/// A mark as held by the store, one per [NaturalKey] as long as nobody races the importer.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct StoredRecord {
    pub id: RecordId,
    #[serde(rename = "student_id")]
    pub student: StudentId,
    #[serde(rename = "subject_id")]
    pub subject: SubjectId,
    #[serde(rename = "exam_type")]
    #[serde_as(as = "DisplayFromStr")]
    pub exam: ExamKind,
    #[serde(rename = "marks")]
    pub score: Score,
}

impl StoredRecord {
    pub fn key(&self) -> NaturalKey {
        NaturalKey {
            student: self.student.clone(),
            subject: self.subject.clone(),
            exam: self.exam,
        }
    }
}

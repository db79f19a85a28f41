//! The record store holding marks, and an in-process implementation of it.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{CandidateRecord, NaturalKey, RecordId, Score, StoreError, StoredRecord, StudentId};

type StoreResult<T> = Result<T, StoreError>;

/// The operations the importer needs from the backend holding marks.
///
/// Each call is atomic on its own, but nothing spans calls: there is no transaction and no
/// uniqueness constraint on [NaturalKey].
#[async_trait]
pub trait MarkStore: Send + Sync {
    /// All records matching the key exactly, oldest first.
    async fn find_by_key(&self, key: &NaturalKey) -> StoreResult<Vec<StoredRecord>>;

    /// Create a new record, returning the id the store assigned to it.
    async fn insert(&self, record: &CandidateRecord) -> StoreResult<RecordId>;

    /// Overwrite the score of an existing record.
    async fn update_score(&self, id: RecordId, score: Score) -> StoreResult<()>;

    /// All records of a student, across subjects and exams.
    async fn find_by_student(&self, student: &StudentId) -> StoreResult<Vec<StoredRecord>>;
}

/// A [MarkStore] kept in memory, which can be saved to and restored from CSV.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Records>,
}

#[derive(Debug, Default)]
struct Records {
    records: Vec<StoredRecord>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }

    /// Restore a store from CSV written by [MemoryStore::dump_csv].
    pub fn load_csv<R: std::io::Read>(reader: &mut csv::Reader<R>) -> csv::Result<Self> {
        let mut records = reader
            .deserialize()
            .collect::<csv::Result<Vec<StoredRecord>>>()?;
        records.sort_by_key(|record| record.id);
        let next_id = records.last().map_or(1, |record| record.id.0 + 1);
        Ok(Self {
            inner: Mutex::new(Records { records, next_id }),
        })
    }

    /// Serialize every record to CSV.
    pub async fn dump_csv<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> csv::Result<()> {
        let inner = self.inner.lock().await;
        // Write the header explicitly, so that an empty store still has one
        writer.write_record(&["id", "student_id", "subject_id", "exam_type", "marks"])?;
        for record in inner.records.iter() {
            writer.write_record(&[
                record.id.to_string(),
                record.student.to_string(),
                record.subject.to_string(),
                record.exam.to_string(),
                record.score.to_string(),
            ])?
        }
        writer.flush()?;
        Ok(())
    }

    /// A snapshot of every record, ordered by id.
    pub async fn records(&self) -> Vec<StoredRecord> {
        self.inner.lock().await.records.clone()
    }
}

#[async_trait]
impl MarkStore for MemoryStore {
    async fn find_by_key(&self, key: &NaturalKey) -> StoreResult<Vec<StoredRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .records
            .iter()
            .filter(|record| record.key() == *key)
            .cloned()
            .collect())
    }

    async fn insert(&self, record: &CandidateRecord) -> StoreResult<RecordId> {
        let mut inner = self.inner.lock().await;
        let id = RecordId(inner.next_id.max(1));
        inner.next_id = id.0 + 1;
        inner.records.push(StoredRecord {
            id,
            student: record.student.clone(),
            subject: record.subject.clone(),
            exam: record.exam,
            score: record.score,
        });
        Ok(id)
    }

    async fn update_score(&self, id: RecordId, score: Score) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        let record = inner
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| StoreError::Update(format!("no record with id {}", id)))?;
        record.score = score;
        Ok(())
    }

    async fn find_by_student(&self, student: &StudentId) -> StoreResult<Vec<StoredRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .records
            .iter()
            .filter(|record| record.student == *student)
            .cloned()
            .collect())
    }
}

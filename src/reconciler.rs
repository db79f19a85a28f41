//! Write validated records to a [MarkStore], one at a time.

use log::{debug, warn};

use crate::{CandidateRecord, MarkStore, RecordId, StoreError};

/// What happened to a record once written.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Written {
    Inserted(RecordId),
    Updated(RecordId),
}

/// The result of reconciling one record, tagged with the line it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteOutcome {
    pub line: u64,
    pub result: Result<Written, StoreError>,
}

/// Reconciles records against a store by checking for an existing record, then writing.
///
/// The store has no uniqueness constraint nor upsert, so lookup-then-write is the only way to keep
/// a single record per natural key. Records are handled strictly in order, so a later duplicate
/// overwrites an earlier one. Another writer interleaving between a lookup and its write can still
/// produce a duplicate or lose an update.
pub struct Reconciler<'a, S: MarkStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: MarkStore + ?Sized> Reconciler<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Reconcile every record, in order. Failures are reported per record and never stop the run,
    /// nor undo previous writes.
    pub async fn reconcile<I>(&self, records: I) -> Vec<WriteOutcome>
    where
        I: IntoIterator<Item = (u64, CandidateRecord)>,
    {
        let mut outcomes = Vec::new();
        for (line, record) in records {
            let result = self.reconcile_one(&record).await;
            if let Err(err) = &result {
                warn!("line {}: {}: {}", line, record.key(), err);
            }
            outcomes.push(WriteOutcome { line, result });
        }
        outcomes
    }

    async fn reconcile_one(&self, record: &CandidateRecord) -> Result<Written, StoreError> {
        let existing = self.store.find_by_key(&record.key()).await?;
        // Should there be duplicates already, only ever touch the oldest one
        match existing.first() {
            Some(stored) => {
                self.store.update_score(stored.id, record.score).await?;
                debug!("{}: updated record {} to {}", record.key(), stored.id, record.score);
                Ok(Written::Updated(stored.id))
            }
            None => {
                let id = self.store.insert(record).await?;
                debug!("{}: inserted record {} with {}", record.key(), id, record.score);
                Ok(Written::Inserted(id))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::store::testing::{dump, FailOn, FailingStore};
    use crate::{ExamKind, MemoryStore, Score, StudentId, SubjectId};
    use expect_test::{expect, Expect};

    fn records(rows: &[(&str, u8)]) -> Vec<(u64, CandidateRecord)> {
        rows.iter()
            .zip(1..)
            .map(|(&(student, score), line)| {
                let record = CandidateRecord {
                    student: StudentId::from(student),
                    subject: SubjectId::from("math"),
                    exam: ExamKind::Final,
                    score: Score::new(score).unwrap(),
                };
                (line, record)
            })
            .collect()
    }

    fn check_outcomes(outcomes: &[WriteOutcome], expect: Expect) {
        let actual: String = outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(written) => format!("{}: {:?}\n", outcome.line, written),
                Err(err) => format!("{}: {}\n", outcome.line, err),
            })
            .collect();
        expect.assert_eq(&actual);
    }

    #[tokio::test]
    async fn inserts_then_updates() {
        let store = MemoryStore::new();
        let reconciler = Reconciler::new(&store);

        let outcomes = reconciler
            .reconcile(records(&[("alice", 85), ("bob", 92)]))
            .await;
        check_outcomes(
            &outcomes,
            expect![[r#"
                1: Inserted(RecordId(1))
                2: Inserted(RecordId(2))
            "#]],
        );

        let outcomes = reconciler
            .reconcile(records(&[("bob", 50), ("carol", 70)]))
            .await;
        check_outcomes(
            &outcomes,
            expect![[r#"
                1: Updated(RecordId(2))
                2: Inserted(RecordId(3))
            "#]],
        );
        expect![[r#"
            id,student_id,subject_id,exam_type,marks
            1,alice,math,final,85
            2,bob,math,final,50
            3,carol,math,final,70
        "#]]
        .assert_eq(&dump(&store).await);
    }

    #[tokio::test]
    async fn rerun_is_idempotent() {
        let store = MemoryStore::new();
        let reconciler = Reconciler::new(&store);
        let input = records(&[("alice", 85), ("bob", 92), ("carol", 70)]);

        reconciler.reconcile(input.clone()).await;
        let once = store.records().await;
        let outcomes = reconciler.reconcile(input).await;

        assert_eq!(store.records().await, once);
        assert!(outcomes.iter().all(|outcome| outcome.result.is_ok()));
        assert_eq!(outcomes.len(), 3);
    }

    #[tokio::test]
    async fn last_write_wins() {
        let store = MemoryStore::new();
        let outcomes = Reconciler::new(&store)
            .reconcile(records(&[("alice", 85), ("bob", 92), ("alice", 40)]))
            .await;
        check_outcomes(
            &outcomes,
            expect![[r#"
                1: Inserted(RecordId(1))
                2: Inserted(RecordId(2))
                3: Updated(RecordId(1))
            "#]],
        );
        expect![[r#"
            id,student_id,subject_id,exam_type,marks
            1,alice,math,final,40
            2,bob,math,final,92
        "#]]
        .assert_eq(&dump(&store).await);
    }

    #[tokio::test]
    async fn existing_duplicates_update_the_oldest() {
        let store = MemoryStore::new();
        let (_, alice) = records(&[("alice", 10)]).remove(0);
        store.insert(&alice).await.unwrap();
        store.insert(&alice).await.unwrap();

        Reconciler::new(&store)
            .reconcile(records(&[("alice", 99)]))
            .await;
        expect![[r#"
            id,student_id,subject_id,exam_type,marks
            1,alice,math,final,99
            2,alice,math,final,10
        "#]]
        .assert_eq(&dump(&store).await);
    }

    #[tokio::test]
    async fn failed_insert_does_not_stop_the_run() {
        let input = records(&[("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5)]);
        // Whatever the position of the failure, the other four records make it to the store
        for failing in 1..=5 {
            let store = FailingStore::new(MemoryStore::new(), FailOn::Insert(failing));
            let outcomes = Reconciler::new(&store).reconcile(input.clone()).await;

            let failed: Vec<_> = outcomes
                .iter()
                .filter(|outcome| outcome.result.is_err())
                .map(|outcome| outcome.line)
                .collect();
            assert_eq!(failed, vec![failing as u64]);
            assert_eq!(store.store.records().await.len(), 4);
        }
    }

    #[tokio::test]
    async fn failed_lookup_skips_the_write() {
        let store = FailingStore::new(MemoryStore::new(), FailOn::Lookup(2));
        let outcomes = Reconciler::new(&store)
            .reconcile(records(&[("alice", 85), ("bob", 92), ("carol", 70)]))
            .await;
        check_outcomes(
            &outcomes,
            expect![[r#"
                1: Inserted(RecordId(1))
                2: lookup error: connection reset
                3: Inserted(RecordId(2))
            "#]],
        );
    }

    #[tokio::test]
    async fn failed_update_keeps_the_old_score() {
        let store = FailingStore::new(MemoryStore::new(), FailOn::Update(1));
        let outcomes = Reconciler::new(&store)
            .reconcile(records(&[("alice", 85), ("alice", 20)]))
            .await;
        check_outcomes(
            &outcomes,
            expect![[r#"
                1: Inserted(RecordId(1))
                2: update error: connection reset
            "#]],
        );
        expect![[r#"
            id,student_id,subject_id,exam_type,marks
            1,alice,math,final,85
        "#]]
        .assert_eq(&dump(&store.store).await);
    }
}

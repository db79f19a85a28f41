//! A sample marks file, for users to fill in.
use crate::parser::HEADER;

const SAMPLE_ROWS: [(&str, u8); 3] = [("STU001", 85), ("STU002", 92), ("STU003", 78)];

/// The sample file contents: the [HEADER] line, then a few example rows.
pub fn sample_marks_csv() -> String {
    let mut sample = HEADER.join(",");
    sample.push('\n');
    for (student, marks) in SAMPLE_ROWS {
        sample.push_str(&format!("{},{}\n", student, marks));
    }
    sample
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{parse_marks, ExamKind, SubjectId};
    use expect_test::expect;

    #[test]
    fn sample_contents() {
        expect![[r#"
            student_id,marks
            STU001,85
            STU002,92
            STU003,78
        "#]]
        .assert_eq(&sample_marks_csv());
    }

    #[test]
    fn sample_is_accepted_by_the_parser() {
        let rows = parse_marks(&sample_marks_csv(), &SubjectId::from("math"), ExamKind::Quiz);
        assert_eq!(rows.len(), SAMPLE_ROWS.len());
        assert!(rows.iter().all(|row| row.outcome.is_ok()));
    }
}

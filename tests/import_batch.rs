use std::io::{self, BufReader, Read, Write};

use tempfile::NamedTempFile;

use examreg::{
    config::RegistryConfig,
    core::{
        import::{parse_line, ImportError, ImportSummary},
        registry::ExamRegistry,
    },
    record::CardId,
};

fn counts(exams: &ExamRegistry) -> (usize, usize) {
    (exams.directory().student_count(), exams.directory().card_count())
}

#[test]
fn parse_line_strips_card_whitespace_and_keeps_name() {
    let parsed = parse_line(1, "42 :Doe Jane Q: ab c 1 ,\tx y,,  ").expect("parse");
    assert_eq!(parsed.id, 42);
    assert_eq!(parsed.name, "Doe Jane Q");
    assert_eq!(
        parsed.cards,
        vec![CardId::normalize("abc1"), CardId::normalize("xy")]
    );
}

#[test]
fn parse_line_without_card_segment_has_no_cards() {
    let parsed = parse_line(3, "7:Solo").expect("parse");
    assert_eq!(parsed.id, 7);
    assert!(parsed.cards.is_empty());
}

#[test]
fn parse_line_rejects_bad_ids_and_missing_separator() {
    assert!(matches!(
        parse_line(2, "abc:Name:card"),
        Err(ImportError::Malformed { line: 2, .. })
    ));
    assert!(matches!(
        parse_line(5, "-4:Name:card"),
        Err(ImportError::Malformed { line: 5, .. })
    ));
    assert!(matches!(
        parse_line(9, "12345"),
        Err(ImportError::Malformed { line: 9, .. })
    ));
}

#[test]
fn clean_batch_reports_counts_and_resolves_cards() {
    let mut exams = ExamRegistry::new();
    let summary = exams
        .import_lines(["1:Ada:a1, a2", "2:Bob: b 1 "])
        .expect("import");

    assert_eq!(summary, ImportSummary { students: 2, cards: 3 });
    assert_eq!(exams.directory().resolve_card("b1"), Some(2));
    assert_eq!(exams.directory().resolve_card(" b 1"), Some(2));
    assert_eq!(exams.directory().student_name(1), Some("Ada"));
    assert_eq!(
        exams.directory().cards_of(1),
        vec![&CardId::normalize("a1"), &CardId::normalize("a2")]
    );
}

#[test]
fn whitespace_variants_collide_as_the_same_card() {
    let mut exams = ExamRegistry::new();
    exams.import_str("1:Ada:abc123\n").expect("import");

    let err = exams.import_str("2:Bob: abc 123\n").unwrap_err();
    assert!(matches!(
        err,
        ImportError::DuplicateCard { line: 1, ref card } if card.as_str() == "abc123"
    ));
    assert_eq!(counts(&exams), (1, 1));
}

#[test]
fn intra_batch_duplicates_reject_everything() {
    let mut exams = ExamRegistry::new();
    exams.import_str("100:Existing:e1\n").expect("seed");

    let err = exams
        .import_str("1:Ada:a1\n2:Bob:b1\n1:Ada Again:a9\n")
        .unwrap_err();
    assert!(matches!(err, ImportError::DuplicateStudent { line: 3, id: 1 }));
    assert_eq!(counts(&exams), (1, 1));

    let err = exams.import_str("1:Ada:a1\n2:Bob:b1, a1\n").unwrap_err();
    assert!(matches!(err, ImportError::DuplicateCard { line: 2, .. }));

    let err = exams.import_str("1:Ada:a1, a1\n").unwrap_err();
    assert!(matches!(err, ImportError::DuplicateCard { line: 1, .. }));

    assert_eq!(counts(&exams), (1, 1));
    assert!(exams.directory().resolve_card("a1").is_none());
}

#[test]
fn malformed_line_after_valid_ones_rejects_batch() {
    let mut exams = ExamRegistry::new();
    let err = exams.import_str("1:Ada:a1\nnot a student line\n").unwrap_err();
    assert!(matches!(err, ImportError::Malformed { line: 2, .. }));
    assert_eq!(counts(&exams), (0, 0));
}

#[test]
fn blank_lines_follow_config() {
    let mut lenient = ExamRegistry::new();
    lenient.import_str("1:Ada:a1\n\n   \n2:Bob:b1\n").expect("blank lines skipped");
    assert_eq!(counts(&lenient), (2, 2));

    let mut strict = ExamRegistry::with_config(RegistryConfig {
        skip_blank_lines: false,
        ..RegistryConfig::default()
    });
    let err = strict.import_str("1:Ada:a1\n\n2:Bob:b1\n").unwrap_err();
    assert!(matches!(err, ImportError::Malformed { line: 2, .. }));
    assert_eq!(counts(&strict), (0, 0));
}

#[test]
fn import_file_reads_from_disk() {
    let mut file = NamedTempFile::new().expect("tmp");
    writeln!(file, "123456:Smith John:cardA, cardB").expect("write");
    writeln!(file, "654321:Nowak Jane:cardC").expect("write");
    file.flush().expect("flush");

    let mut exams = ExamRegistry::new();
    let summary = exams.import_file(file.path()).expect("import file");
    assert_eq!(summary, ImportSummary { students: 2, cards: 3 });
    exams.register("cardC", "T1").expect("register");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tmp");
    let mut exams = ExamRegistry::new();
    let err = exams.import_file(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, ImportError::Io(_)));
}

struct FailAfter<'a> {
    data: &'a [u8],
}

impl Read for FailAfter<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::other("device unplugged"));
        }
        let n = self.data.len().min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn read_error_mid_batch_commits_nothing() {
    let reader = BufReader::new(FailAfter {
        data: b"1:Ada:a1\n2:Bob:b1\n",
    });
    let mut exams = ExamRegistry::new();
    let err = exams.import_reader(reader).unwrap_err();
    assert!(matches!(err, ImportError::Io(_)));
    assert_eq!(counts(&exams), (0, 0));
}

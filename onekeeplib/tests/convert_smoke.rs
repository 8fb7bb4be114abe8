use onekeeplib::{
    convert, convert_file,
    error::ConvertError,
    model::SkipReason,
    output_path, Language,
};
use std::fs;
use std::io::Cursor;
use std::path::Path;

const EN_EXPORT: &str = "title\tusername\tpassword\tURL/Location\tnotes\ttype\tainfo\n\
Login\t\t\thttp://www.example.com\t\t\t\n\
My Bank\tbob\tsecret&1\thttp://bank.example\t\tLogin\tbank\n\
\t\t\t\t\t\t\n\
Only Title\t\t\t\t\t\t\n\
Passport\t\t\t\tnr 42\tPassport\t\n\
Mail\talice\t\"pa\tss\"\"word\"\t\t\"multi\nline\"\tLogin\t\n";

const NL_EXPORT: &str = "Titel\tGebruikersnaam\tWachtwoord\tWebadres\tNotities\tType\n\
My Bank\tbob\tsecret&1\thttp://bank.example\t\tLogin\n";

const EN_SINGLE: &str = "title\tusername\tpassword\tURL/Location\tnotes\ttype\n\
My Bank\tbob\tsecret&1\thttp://bank.example\t\tLogin\n";

fn run(input: &str, lang: Language) -> (String, onekeeplib::model::ConversionReport) {
    let mut out = Vec::new();
    let report = convert(Cursor::new(input), &mut out, lang).expect("convert");
    (String::from_utf8(out).expect("utf8"), report)
}

#[test]
fn english_export_counts_and_reasons() {
    let (xml, report) = run(EN_EXPORT, Language::En);
    assert_eq!(report.processed, 6);
    assert_eq!(report.written, 2);

    let reasons: Vec<(usize, SkipReason)> =
        report.skipped.iter().map(|s| (s.row, s.reason)).collect();
    assert_eq!(
        reasons,
        vec![
            (1, SkipReason::ExampleRow),
            (3, SkipReason::EmptyEntry),
            (4, SkipReason::TitleOnly),
            (5, SkipReason::NonLoginType),
        ]
    );
    assert_eq!(report.skipped[2].to_string(), "Skipping entry 4. Only title 'Only Title'.");
    assert_eq!(report.skipped[1].to_string(), "Skipping entry 3. No data.");

    assert!(xml.contains("<password>secret&amp;1</password>"));
    assert!(xml.contains("<password>pa\tss&quot;word</password>"));
    assert!(xml.contains("<comment>multi\nline</comment>"));
    assert!(!xml.contains("bank</"), "unmapped column leaked: {xml}");
    assert!(xml.ends_with("</database>\n"));
}

#[test]
fn dutch_export_matches_english() {
    let (nl, nl_report) = run(NL_EXPORT, Language::Nl);
    let (en, en_report) = run(EN_SINGLE, Language::En);
    assert_eq!(nl, en);
    assert_eq!(nl_report, en_report);
    assert_eq!(nl_report.written, 1);
}

#[test]
fn short_rows_are_accepted() {
    let input = "title\tusername\tpassword\tURL/Location\tnotes\n\
Short\tbob\n";
    let (xml, report) = run(input, Language::En);
    assert_eq!(report.written, 1);
    assert!(xml.contains("<username>bob</username>"));
    assert!(xml.contains("<password></password>"));
}

#[test]
fn header_only_export() {
    let (xml, report) = run("title\tusername\tpassword\n", Language::En);
    assert_eq!(report.processed, 0);
    assert_eq!(report.written, 0);
    assert!(!xml.contains("<entry>"));
}

fn write_input(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).expect("write input");
    path
}

#[test]
fn file_conversion_writes_next_to_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), "export.txt", EN_SINGLE.as_bytes());
    // старый файл перезаписывается
    fs::write(output_path(&input), "stale").expect("stale output");

    let report = convert_file(&input, "en").expect("convert file");
    let out = dir.path().join("export.txt.xml");
    assert_eq!(report.output.as_deref(), Some(out.as_path()));

    let xml = fs::read_to_string(&out).expect("read output");
    assert!(xml.starts_with("<!DOCTYPE KEEPASSX_DATABASE>\n"));
    assert!(xml.contains("<url>http://bank.example</url>"));
    assert!(!xml.contains("stale"));
}

#[test]
fn unsupported_language_creates_no_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path(), "export.txt", EN_SINGLE.as_bytes());

    let err = convert_file(&input, "de").expect_err("de must fail");
    assert!(matches!(err, ConvertError::UnsupportedLanguage(_)));
    assert!(!output_path(&input).exists());
}

#[test]
fn missing_input_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("nope.txt");
    let err = convert_file(&input, "en").expect_err("missing file");
    assert!(matches!(err, ConvertError::InvalidInputPath(ref p) if p == &input));
    assert!(!output_path(&input).exists());
}

#[test]
fn malformed_row_reports_line_and_keeps_partial_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut bytes = b"title\tusername\tpassword\nFirst\tbob\tpw\n".to_vec();
    bytes.extend_from_slice(b"Second\t\xff\xfe\tpw\n");
    let input = write_input(dir.path(), "broken.txt", &bytes);

    let err = convert_file(&input, "en").expect_err("invalid utf-8");
    match &err {
        ConvertError::MalformedRecord { line, .. } => assert_eq!(*line, 3),
        other => panic!("unexpected {other:?}"),
    }
    assert!(err.to_string().starts_with("line 3: "));

    let partial = fs::read_to_string(output_path(&input)).expect("partial output");
    assert!(partial.contains("<title>First</title>"));
    assert!(!partial.contains("Second"));
    assert!(!partial.contains("</database>"));
}

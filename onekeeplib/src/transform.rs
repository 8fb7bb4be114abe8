//! Преобразование строки экспорта в запись KeePassX и правила пропуска.

use crate::model::{Field, FieldMapping, Outcome, OutputEntry, SkipReason, SourceRecord};
use quick_xml::escape::escape;

const LOGIN_TYPE: &str = "Login";
const EXAMPLE_TITLE: &str = "Login";
const EXAMPLE_URL: &str = "http://www.example.com";

/// Сырые (неэкранированные) значения строки, по ним работают правила.
#[derive(Debug, Default)]
struct RawFields<'a> {
    title: &'a str,
    username: &'a str,
    password: &'a str,
    url: &'a str,
    kind: &'a str,
    comment: String,
}

fn value<'a>(record: &'a SourceRecord, mapping: &FieldMapping, field: Field) -> &'a str {
    mapping
        .get(field)
        .and_then(|column| record.get(column))
        .unwrap_or("")
}

/// Новая заметка встаёт перед уже накопленной.
pub fn prepend_comment(comment: &str, note: &str) -> String {
    if comment.is_empty() {
        note.to_string()
    } else {
        format!("{note}\n{comment}")
    }
}

fn extract<'a>(record: &'a SourceRecord, mapping: &FieldMapping) -> RawFields<'a> {
    let comment = mapping
        .columns(Field::Comment)
        .iter()
        .map(|column| record.get(column).unwrap_or(""))
        .fold(String::new(), |acc, note| prepend_comment(&acc, note));

    RawFields {
        title: value(record, mapping, Field::Title),
        username: value(record, mapping, Field::Username),
        password: value(record, mapping, Field::Password),
        url: value(record, mapping, Field::Url),
        kind: value(record, mapping, Field::Type),
        comment,
    }
}

fn skip_reason(f: &RawFields<'_>) -> Option<SkipReason> {
    if !f.kind.is_empty() && f.kind != LOGIN_TYPE {
        return Some(SkipReason::NonLoginType);
    }
    let no_secrets = f.username.is_empty() && f.password.is_empty() && f.comment.is_empty();
    if f.title.is_empty() && no_secrets {
        return Some(SkipReason::EmptyEntry);
    }
    if !f.title.is_empty() && no_secrets && f.url.is_empty() {
        return Some(SkipReason::TitleOnly);
    }
    if f.title == EXAMPLE_TITLE && f.url == EXAMPLE_URL {
        return Some(SkipReason::ExampleRow);
    }
    None
}

/// Чистая функция: одна строка -> запись или причина пропуска.
pub fn transform(record: &SourceRecord, mapping: &FieldMapping) -> Outcome {
    let raw = extract(record, mapping);
    if let Some(reason) = skip_reason(&raw) {
        return Outcome::Skip(reason);
    }
    Outcome::Entry(OutputEntry {
        title: escape(raw.title).into_owned(),
        username: escape(raw.username).into_owned(),
        password: escape(raw.password).into_owned(),
        url: escape(raw.url).into_owned(),
        comment: escape(raw.comment.as_str()).into_owned(),
    })
}

/// Сырой заголовок строки для диагностики пропусков.
pub fn raw_title<'a>(record: &'a SourceRecord, mapping: &FieldMapping) -> &'a str {
    value(record, mapping, Field::Title)
}

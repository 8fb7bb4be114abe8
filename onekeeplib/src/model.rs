//! Доменные модели: нормализованный слой между TSV-экспортом и XML KeePassX.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;

/// Канонические поля, которые понимает KeePassX (+ `type` для фильтра).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Username,
    Password,
    Url,
    Comment,
    Type,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Username,
        Field::Password,
        Field::Url,
        Field::Comment,
        Field::Type,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Username => "username",
            Field::Password => "password",
            Field::Url => "url",
            Field::Comment => "comment",
            Field::Type => "type",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Каноническое поле -> колонки исходного файла (в порядке заголовка).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    columns: BTreeMap<Field, Vec<String>>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Повторная вставка той же колонки для того же поля игнорируется.
    pub fn insert(&mut self, field: Field, column: impl Into<String>) {
        let column = column.into();
        let cols = self.columns.entry(field).or_default();
        if !cols.contains(&column) {
            cols.push(column);
        }
    }

    /// Последняя колонка поля: при дублях побеждает более поздний заголовок.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.columns
            .get(&field)
            .and_then(|cols| cols.last())
            .map(String::as_str)
    }

    pub fn columns(&self, field: Field) -> &[String] {
        self.columns.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: Field) -> bool {
        self.columns.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.columns.keys().copied()
    }

    /// Число канонических полей, не колонок.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Одна строка исходного файла, ключи: оригинальные имена колонок.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRecord {
    values: HashMap<String, String>,
}

impl SourceRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Сопоставляет ячейки заголовкам; лишние ячейки отбрасываются,
    /// недостающие остаются отсутствующими.
    pub fn from_cells<'a, H, C>(headers: H, cells: C) -> Self
    where
        H: IntoIterator<Item = &'a str>,
        C: IntoIterator<Item = &'a str>,
    {
        let mut rec = Self::new();
        for (h, c) in headers.into_iter().zip(cells) {
            rec.set(h, c);
        }
        rec
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.values.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SourceRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rec = Self::new();
        for (k, v) in iter {
            rec.set(k, v);
        }
        rec
    }
}

/// Принятая запись. Все строки уже XML-экранированы.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputEntry {
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: String,
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    NonLoginType,
    EmptyEntry,
    TitleOnly,
    ExampleRow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Entry(OutputEntry),
    Skip(SkipReason),
}

/// Пропущенная строка: номер строки данных (с 1, без заголовка).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: SkipReason,
    pub title: String,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            SkipReason::NonLoginType => write!(f, "Skipping entry {}. Not a Login item.", self.row),
            SkipReason::EmptyEntry => write!(f, "Skipping entry {}. No data.", self.row),
            SkipReason::TitleOnly => {
                write!(f, "Skipping entry {}. Only title '{}'.", self.row, self.title)
            }
            SkipReason::ExampleRow => write!(f, "Skipping entry {}. Example line.", self.row),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Сколько строк данных прочитано (включая пропущенные).
    pub processed: usize,
    pub written: usize,
    pub skipped: Vec<SkippedRow>,
    pub output: Option<PathBuf>,
}

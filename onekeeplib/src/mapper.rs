//! Сопоставление заголовков файла каноническим полям.

use crate::{error::Result, model::FieldMapping, profile::Language};
use tracing::debug;

/// Разбирает код языка и строит сопоставление.
/// Неподдерживаемый язык -> `ConvertError::UnsupportedLanguage`.
pub fn resolve<H: AsRef<str>>(headers: &[H], language: &str) -> Result<FieldMapping> {
    let lang: Language = language.parse()?;
    Ok(resolve_profile(headers, lang))
}

/// Незнакомые заголовки молча отбрасываются.
pub fn resolve_profile<H: AsRef<str>>(headers: &[H], language: Language) -> FieldMapping {
    let mut mapping = FieldMapping::new();
    for header in headers.iter().map(AsRef::as_ref) {
        match language.lookup(header) {
            Some(field) => mapping.insert(field, header),
            None => debug!(header, %language, "header not used by KeePassX, dropped"),
        }
    }

    for expected in language.headers() {
        if !headers.iter().any(|h| h.as_ref() == expected) {
            debug!(header = expected, %language, "profile header missing in file");
        }
    }
    let fields: Vec<&str> = mapping.fields().map(|f| f.as_str()).collect();
    debug!(?fields, %language, "field mapping resolved");
    mapping
}

//! Экспорт 1Password «TAB delimited text»: первая строка содержит заголовок,
//! кавычки `"`, удвоение кавычек внутри значения.

use crate::{
    error::{ConvertError, Result},
    model::SourceRecord,
};
use csv::{ReaderBuilder, StringRecordsIntoIter};
use std::io::Read;

pub struct TsvRecords<R> {
    headers: Vec<String>,
    inner: StringRecordsIntoIter<R>,
}

impl<R: Read> TsvRecords<R> {
    pub fn new(r: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b'\t')
            .quote(b'"')
            .double_quote(true)
            .flexible(true)
            .has_headers(true)
            .from_reader(r);

        let headers = rdr
            .headers()
            .map_err(|e| ConvertError::from_csv(e, 1))?
            .iter()
            .map(String::from)
            .collect();

        Ok(Self {
            headers,
            inner: rdr.into_records(),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl<R: Read> Iterator for TsvRecords<R> {
    type Item = Result<SourceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let rec = self.inner.next()?;
        Some(match rec {
            Ok(row) => Ok(SourceRecord::from_cells(
                self.headers.iter().map(String::as_str),
                row.iter(),
            )),
            Err(e) => {
                let line = self.inner.reader().position().line();
                Err(ConvertError::from_csv(e, line))
            }
        })
    }
}

//! Трэйт записи на основе std::io::Write.

use crate::{error::Result, model::OutputEntry};
use std::io::Write;

pub trait WriteFormat {
    /// Пишет ленивую последовательность записей; первая ошибка в
    /// последовательности прерывает запись и возвращается вызывающему.
    /// Возвращает число записанных записей.
    fn write<W, I>(w: W, entries: I) -> Result<usize>
    where
        W: Write,
        I: IntoIterator<Item = Result<OutputEntry>>;
}

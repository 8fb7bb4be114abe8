//! XML для импорта в KeePassX:
//! `<!DOCTYPE KEEPASSX_DATABASE><database><group>...<entry>...</entry></group></database>`

use crate::{
    error::{ConvertError, Result},
    model::OutputEntry,
    traits::WriteFormat,
};
use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use std::borrow::Cow;
use std::io::Write;
use tracing::debug;

pub const DOCTYPE: &str = "KEEPASSX_DATABASE";
pub const GROUP_TITLE: &str = "1Password Import";
pub const GROUP_ICON: &str = "1";

const INDENT: usize = 4;

fn xml_err(e: impl std::fmt::Display) -> ConvertError {
    ConvertError::Xml(format!("{e}"))
}

/// Переводы строк внутри значений приводим к `\n`.
fn normalize_newlines(s: &str) -> Cow<'_, str> {
    if s.contains('\r') {
        Cow::Owned(s.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(s)
    }
}

struct KeepassxWriter<W: Write> {
    xml: Writer<W>,
}

impl<W: Write> KeepassxWriter<W> {
    fn new(w: W) -> Self {
        Self {
            xml: Writer::new_with_indent(w, b' ', INDENT),
        }
    }

    fn event(&mut self, ev: Event<'_>) -> Result<()> {
        self.xml.write_event(ev).map_err(xml_err)
    }

    fn start(&mut self, name: &str) -> Result<()> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    /// Значение уже экранировано, пишем как есть.
    fn element(&mut self, name: &str, escaped: &str) -> Result<()> {
        self.start(name)?;
        self.event(Event::Text(BytesText::from_escaped(normalize_newlines(escaped))))?;
        self.end(name)
    }

    fn begin(&mut self) -> Result<()> {
        self.event(Event::DocType(BytesText::from_escaped(DOCTYPE)))?;
        self.start("database")?;
        self.start("group")?;
        self.element("title", GROUP_TITLE)?;
        self.element("icon", GROUP_ICON)
    }

    fn entry(&mut self, e: &OutputEntry) -> Result<()> {
        self.start("entry")?;
        self.element("title", &e.title)?;
        self.element("username", &e.username)?;
        self.element("password", &e.password)?;
        if !e.url.is_empty() {
            self.element("url", &e.url)?;
        }
        if !e.comment.is_empty() {
            self.element("comment", &e.comment)?;
        }
        self.end("entry")
    }

    fn finish(mut self) -> Result<W> {
        self.end("group")?;
        self.end("database")?;
        let mut w = self.xml.into_inner();
        w.write_all(b"\n")?;
        w.flush()?;
        Ok(w)
    }
}

pub struct KeepassX;

impl WriteFormat for KeepassX {
    fn write<W, I>(w: W, entries: I) -> Result<usize>
    where
        W: Write,
        I: IntoIterator<Item = Result<OutputEntry>>,
    {
        let mut out = KeepassxWriter::new(w);
        out.begin()?;

        let mut written = 0;
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // уже записанное остаётся в приёмнике
                    out.xml.get_mut().flush()?;
                    return Err(e);
                }
            };
            out.entry(&entry)?;
            written += 1;
        }

        out.finish()?;
        debug!(written, "KeePassX document written");
        Ok(written)
    }
}

/// Краткая форма `KeepassX::write` для готовых записей.
pub fn emit<W, I>(w: W, entries: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = OutputEntry>,
{
    KeepassX::write(w, entries.into_iter().map(Ok))
}

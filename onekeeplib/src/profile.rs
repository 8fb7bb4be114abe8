//! Языковые профили: локализованные заголовки экспорта -> канонические поля.

use crate::{
    error::{ConvertError, Result},
    model::Field,
};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Nl,
}

type Profile = &'static [(&'static str, Field)];

static PROFILES: &[(Language, Profile)] = &[
    (
        Language::En,
        &[
            ("title", Field::Title),
            ("username", Field::Username),
            ("password", Field::Password),
            ("URL/Location", Field::Url),
            ("notes", Field::Comment),
            ("type", Field::Type),
        ],
    ),
    (
        Language::Nl,
        &[
            ("Titel", Field::Title),
            ("Gebruikersnaam", Field::Username),
            ("Wachtwoord", Field::Password),
            ("Webadres", Field::Url),
            ("Notities", Field::Comment),
            ("Type", Field::Type),
        ],
    ),
];

impl Language {
    pub const SUPPORTED: [Language; 2] = [Language::En, Language::Nl];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Nl => "nl",
        }
    }

    pub fn profile(self) -> Profile {
        PROFILES
            .iter()
            .find(|(lang, _)| *lang == self)
            .map(|(_, p)| *p)
            .unwrap_or(&[])
    }

    /// Точное (регистрозависимое) совпадение заголовка.
    pub fn lookup(self, header: &str) -> Option<Field> {
        self.profile()
            .iter()
            .find(|(name, _)| *name == header)
            .map(|(_, field)| *field)
    }

    /// Заголовки профиля в каноническом порядке.
    pub fn headers(self) -> impl Iterator<Item = &'static str> {
        self.profile().iter().map(|(name, _)| *name)
    }
}

impl FromStr for Language {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        Language::SUPPORTED
            .into_iter()
            .find(|l| l.code() == s)
            .ok_or_else(|| ConvertError::UnsupportedLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later

//! Built-in ISO 639-1 language registry.
//!
//! Covers bare two-letter codes only, with English and native names for the
//! languages commonly offered by language pickers. It needs nothing from the
//! host, so it is the registry of last resort when no locale database is
//! installed.
//!
//! Reference: <https://www.loc.gov/standards/iso639-2/php/code_list.php>

use super::{DisplayNames, LocaleSource, SourceError, SourceKind};
use anyhow::Result;
use std::collections::BTreeSet;

/// `(code, English name, native name)`, sorted by code.
const LANGUAGES: &[(&str, &str, &str)] = &[
    ("af", "Afrikaans", "afrikaans"),
    ("am", "Amharic", "አማርኛ"),
    ("ar", "Arabic", "العربية"),
    ("az", "Azerbaijani", "azərbaycan"),
    ("be", "Belarusian", "беларуская"),
    ("bg", "Bulgarian", "български"),
    ("bn", "Bengali", "বাংলা"),
    ("bs", "Bosnian", "bosanski"),
    ("ca", "Catalan", "català"),
    ("cs", "Czech", "čeština"),
    ("cy", "Welsh", "cymraeg"),
    ("da", "Danish", "dansk"),
    ("de", "German", "deutsch"),
    ("el", "Greek", "ελληνικά"),
    ("en", "English", "english"),
    ("eo", "Esperanto", "esperanto"),
    ("es", "Spanish", "español"),
    ("et", "Estonian", "eesti"),
    ("eu", "Basque", "euskara"),
    ("fa", "Persian", "فارسی"),
    ("fi", "Finnish", "suomi"),
    ("fo", "Faroese", "føroyskt"),
    ("fr", "French", "français"),
    ("ga", "Irish", "gaeilge"),
    ("gd", "Scottish Gaelic", "gàidhlig"),
    ("gl", "Galician", "galego"),
    ("gu", "Gujarati", "ગુજરાતી"),
    ("he", "Hebrew", "עברית"),
    ("hi", "Hindi", "हिन्दी"),
    ("hr", "Croatian", "hrvatski"),
    ("hu", "Hungarian", "magyar"),
    ("hy", "Armenian", "հայերեն"),
    ("id", "Indonesian", "indonesia"),
    ("is", "Icelandic", "íslenska"),
    ("it", "Italian", "italiano"),
    ("ja", "Japanese", "日本語"),
    ("ka", "Georgian", "ქართული"),
    ("kk", "Kazakh", "қазақ тілі"),
    ("km", "Khmer", "ខ្មែរ"),
    ("ko", "Korean", "한국어"),
    ("la", "Latin", "latina"),
    ("lt", "Lithuanian", "lietuvių"),
    ("lv", "Latvian", "latviešu"),
    ("mk", "Macedonian", "македонски"),
    ("ml", "Malayalam", "മലയാളം"),
    ("mn", "Mongolian", "монгол"),
    ("mr", "Marathi", "मराठी"),
    ("ms", "Malay", "melayu"),
    ("mt", "Maltese", "malti"),
    ("nb", "Norwegian Bokmål", "norsk bokmål"),
    ("ne", "Nepali", "नेपाली"),
    ("nl", "Dutch", "nederlands"),
    ("nn", "Norwegian Nynorsk", "nynorsk"),
    ("pa", "Punjabi", "ਪੰਜਾਬੀ"),
    ("pl", "Polish", "polski"),
    ("pt", "Portuguese", "português"),
    ("ro", "Romanian", "română"),
    ("ru", "Russian", "русский"),
    ("sk", "Slovak", "slovenčina"),
    ("sl", "Slovenian", "slovenščina"),
    ("sq", "Albanian", "shqip"),
    ("sr", "Serbian", "српски"),
    ("sv", "Swedish", "svenska"),
    ("sw", "Swahili", "kiswahili"),
    ("ta", "Tamil", "தமிழ்"),
    ("te", "Telugu", "తెలుగు"),
    ("th", "Thai", "ไทย"),
    ("tr", "Turkish", "türkçe"),
    ("uk", "Ukrainian", "українська"),
    ("ur", "Urdu", "اردو"),
    ("uz", "Uzbek", "o‘zbek"),
    ("vi", "Vietnamese", "tiếng việt"),
    ("zh", "Chinese", "中文"),
    ("zu", "Zulu", "isizulu"),
];

/// Registry backed by the compiled-in ISO 639-1 table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Iso639Table;

impl Iso639Table {
    fn lookup(code: &str) -> Option<(&'static str, &'static str)> {
        LANGUAGES
            .binary_search_by(|(known, _, _)| (*known).cmp(code))
            .ok()
            .map(|index| (LANGUAGES[index].1, LANGUAGES[index].2))
    }
}

impl LocaleSource for Iso639Table {
    fn kind(&self) -> SourceKind {
        SourceKind::Iso639
    }

    fn probe(&self) -> Result<(), SourceError> {
        Ok(())
    }

    fn available_locales(&self) -> BTreeSet<String> {
        LANGUAGES.iter().map(|(code, _, _)| code.to_string()).collect()
    }

    fn display_names(&self, code: &str) -> Result<DisplayNames> {
        Ok(match Self::lookup(code) {
            Some((english, native)) => {
                DisplayNames::new(Some(english.to_string()), Some(native.to_string()))
            }
            None => DisplayNames::default(),
        })
    }
}

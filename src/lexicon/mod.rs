//! Text to phoneme symbols: language detection, word lookup and letter rules.

mod english;
mod hindi;

use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    fmt,
};
use tracing::debug;

/// Share of recognised closed-class words above which Latin-script text is treated as Hindi.
const CLOSED_CLASS_THRESHOLD: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
}

impl Language {
    /// Two letter language id.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::English => "english",
            Language::Hindi => "hindi",
        })
    }
}

/// One articulatory unit. Symbols only come from the built-in tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Symbol(&'static str);

impl Symbol {
    /// Silence between words.
    pub const PAUSE: Symbol = Symbol("PAUSE");

    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.0
    }

    #[must_use]
    pub fn is_pause(self) -> bool {
        self == Self::PAUSE
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The phoneme sequence of a text together with the language it was read in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utterance {
    pub language: Language,
    pub symbols: Vec<Symbol>,
}

impl Utterance {
    /// Number of sounding symbols, pauses excluded.
    #[must_use]
    pub fn phoneme_count(&self) -> usize {
        self.symbols.iter().filter(|s| !s.is_pause()).count()
    }
}

type Entries = &'static [(&'static str, &'static [&'static str])];

#[derive(Debug, Clone)]
struct Table {
    words: HashMap<&'static str, &'static [&'static str]>,
    rules: HashMap<&'static str, &'static [&'static str]>,
}

impl Table {
    fn new(word_lists: &[Entries], rules: Entries) -> Self {
        Table {
            words: word_lists.iter().flat_map(|list| list.iter().copied()).collect(),
            rules: rules.iter().copied().collect(),
        }
    }

    fn push_word(&self, word: &str, out: &mut Vec<Symbol>) {
        if let Some(symbols) = self.words.get(word) {
            out.extend(symbols.iter().copied().map(Symbol));
            return;
        }
        // byte offset of every char, plus the end of the word
        let bounds: Vec<usize> = word
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(word.len()))
            .collect();
        let chars = bounds.len() - 1;
        let mut i = 0;
        while i < chars {
            let pair = (i + 2 <= chars)
                .then(|| self.rules.get(&word[bounds[i]..bounds[i + 2]]))
                .flatten();
            if let Some(symbols) = pair {
                out.extend(symbols.iter().copied().map(Symbol));
                i += 2;
                continue;
            }
            if let Some(symbols) = self.rules.get(&word[bounds[i]..bounds[i + 1]]) {
                out.extend(symbols.iter().copied().map(Symbol));
            }
            i += 1;
        }
    }
}

/// Devanagari block, danda and double danda excluded.
fn is_devanagari(c: char) -> bool {
    matches!(c, '\u{0900}'..='\u{097F}') && !matches!(c, '\u{0964}' | '\u{0965}')
}

/// Lower-cases, strips punctuation and splits into words.
#[must_use]
pub fn normalize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || is_devanagari(*c))
        .collect();
    cleaned.split_whitespace().map(str::to_owned).collect()
}

/// Resolves text into phoneme symbols for English and Hindi.
#[derive(Debug, Clone)]
pub struct Lexicon {
    english: Table,
    hindi: Table,
    closed_class: HashSet<&'static str>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    #[must_use]
    pub fn new() -> Self {
        Lexicon {
            english: Table::new(&[english::WORDS], english::RULES),
            hindi: Table::new(&[hindi::WORDS, hindi::ROMAN_WORDS], hindi::RULES),
            closed_class: hindi::CLOSED_CLASS.iter().copied().collect(),
        }
    }

    /// Devanagari anywhere means Hindi. Otherwise Latin text is Hindi when more than
    /// 30% of its words are romanised Hindi closed-class words.
    #[must_use]
    pub fn detect_language(&self, text: &str) -> Language {
        if text.chars().any(is_devanagari) {
            return Language::Hindi;
        }
        let words = normalize(text);
        if words.is_empty() {
            return Language::English;
        }
        let hits = words
            .iter()
            .filter(|w| self.closed_class.contains(w.as_str()))
            .count();
        if hits as f64 / words.len() as f64 > CLOSED_CLASS_THRESHOLD {
            Language::Hindi
        } else {
            Language::English
        }
    }

    /// Phoneme symbols of `text`, with a pause after every word.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Vec<Symbol> {
        self.analyze(text).symbols
    }

    #[must_use]
    pub fn analyze(&self, text: &str) -> Utterance {
        let language = self.detect_language(text);
        let symbols = self.resolve_as(text, language);
        let utterance = Utterance { language, symbols };
        debug!(
            %language,
            phonemes = utterance.phoneme_count(),
            "resolved text"
        );
        utterance
    }

    /// Like [`Lexicon::resolve`] with the language forced.
    #[must_use]
    pub fn resolve_as(&self, text: &str, language: Language) -> Vec<Symbol> {
        let table = match language {
            Language::English => &self.english,
            Language::Hindi => &self.hindi,
        };
        let mut symbols = Vec::new();
        for word in normalize(text) {
            table.push_word(&word, &mut symbols);
            symbols.push(Symbol::PAUSE);
        }
        symbols
    }
}

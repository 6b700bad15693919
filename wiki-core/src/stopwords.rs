//! # Stop-words
//!
//! Conjunto fixo de palavras comuns de um idioma, usado para excluir ruído do
//! ranking de frequência. O conjunto é somente-leitura após a construção e pode ser
//! compartilhado entre threads sem sincronização.
//!
//! Um idioma desconhecido é um erro de configuração explícito: um conjunto vazio
//! produziria rankings sem sentido ("the", "and" no topo) sem nenhum aviso.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Lista de stop-words do inglês (mesmo conteúdo da lista `english` do NLTK).
pub static ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him",
    "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its",
    "itself", "they", "them", "their", "theirs", "themselves", "what", "which", "who",
    "whom", "this", "that", "that'll", "these", "those", "am", "is", "are", "was",
    "were", "be", "been", "being", "have", "has", "had", "having", "do", "does", "did",
    "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
    "while", "of", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "to", "from", "up",
    "down", "in", "out", "on", "off", "over", "under", "again", "further", "then",
    "once", "here", "there", "when", "where", "why", "how", "all", "any", "both",
    "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "don't", "should", "should've", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
    "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn", "doesn't",
    "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't", "ma",
    "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Idiomas com lista de stop-words embutida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

impl Language {
    /// Parseia o identificador do idioma ("english", "en"), sem diferenciar maiúsculas.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Some(Language::English),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "english",
        }
    }

    fn stop_words(&self) -> &'static [&'static str] {
        match self {
            Language::English => ENGLISH_STOP_WORDS,
        }
    }
}

/// Conjunto de stop-words de um idioma.
#[derive(Debug, Clone)]
pub struct StopWords {
    language: Language,
    words: HashSet<String>,
}

impl StopWords {
    /// Constrói o conjunto a partir de um identificador de idioma.
    ///
    /// Identificadores desconhecidos falham com [`AnalysisError::Configuration`].
    pub fn for_language(language: &str) -> Result<Self> {
        let lang = Language::from_str(language).ok_or_else(|| {
            AnalysisError::configuration(format!("no stop-word list for language '{language}'"))
        })?;
        Ok(Self::new(lang))
    }

    pub fn new(language: Language) -> Self {
        let words = language.stop_words().iter().map(|s| s.to_string()).collect();
        Self { language, words }
    }

    /// O token é uma stop-word? A comparação é exata: o chamador já entrega tokens em
    /// minúsculas.
    pub fn is_stopword(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new(Language::English)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stopwords() {
        let sw = StopWords::for_language("english").unwrap();
        assert!(sw.is_stopword("the"));
        assert!(sw.is_stopword("and"));
        assert!(sw.is_stopword("because"));
        assert!(!sw.is_stopword("python"));
        assert_eq!(sw.language(), Language::English);
        assert_eq!(sw.len(), 179);
    }

    #[test]
    fn test_language_aliases() {
        assert!(StopWords::for_language("EN").is_ok());
        assert!(StopWords::for_language(" English ").is_ok());
    }

    #[test]
    fn test_unknown_language_is_configuration_error() {
        let err = StopWords::for_language("klingon").unwrap_err();
        assert!(matches!(err, AnalysisError::Configuration(_)));
    }
}

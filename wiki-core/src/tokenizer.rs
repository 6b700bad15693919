//! # Tokenizador
//!
//! Dois tokenizadores com propósitos diferentes convivem aqui:
//!
//! - [`words`]: divisão por fronteira de palavra (`\w+`) sobre o texto em minúsculas.
//!   É a base da contagem de palavras e do ranking de frequência. Pontuação, espaços e
//!   símbolos são separadores, nunca tokens.
//! - [`tokenize`]: tokenizador com offsets usado pelo reconhecedor de entidades. Cada
//!   token preserva sua posição original no texto (em bytes) e a capitalização, o que
//!   as regras de NER precisam para decidir se "Paris" é um nome próprio.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use wiki_core::tokenizer::{tokenize, words};
//!
//! assert_eq!(words("Hello, World!"), vec!["hello", "world"]);
//!
//! // "Dr." é mantido como abreviação; o ponto final vira token próprio
//! let tokens = tokenize("Dr. Smith left.");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["Dr.", "Smith", "left", "."]);
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Um token extraído do texto original.
///
/// Mantém a referência exata de sua posição no texto (`start` e `end`), o que permite
/// reportar as entidades encontradas com offsets sobre o texto analisado.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "Obama", ",", "2015").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
}

impl Token {
    /// O token começa com letra maiúscula?
    pub fn is_capitalized(&self) -> bool {
        self.text
            .chars()
            .next()
            .map(|c| c.is_uppercase())
            .unwrap_or(false)
    }
}

/// Abreviações comuns em inglês que não devem ter o ponto tratado como fim de sentença
const ABBREVIATIONS: &[&str] = &[
    "Dr", "Mr", "Mrs", "Ms", "Prof", "Sr", "Jr", "St", "Mt", "Gen", "Gov", "Sen",
    "Rep", "Col", "Capt", "Lt", "Sgt", "Rev", "Hon", "Inc", "Ltd", "Co", "Corp",
    "Jan", "Feb", "Mar", "Apr", "Jun", "Jul", "Aug", "Sep", "Sept", "Oct", "Nov", "Dec",
    "vs", "etc", "approx", "No", "Vol", "pp", "ca",
];

fn word_regex() -> &'static Regex {
    static WORD_RE: OnceLock<Regex> = OnceLock::new();
    WORD_RE.get_or_init(|| Regex::new(r"\w+").expect("padrão \\w+ é válido"))
}

/// Divide o texto em palavras minúsculas (`\w+`).
///
/// Texto vazio produz uma lista vazia. Não há condição de erro.
pub fn words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Número de palavras do texto, contando todas (stop-words e palavras curtas incluídas).
pub fn count_words(text: &str) -> usize {
    word_regex().find_iter(&text.to_lowercase()).count()
}

/// Tokeniza um texto preservando offsets e capitalização.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current_start = 0;
    let mut current_text = String::new();
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte_pos, ch) = chars[i];

        if ch.is_alphanumeric() || ch == '-' && !current_text.is_empty() {
            if current_text.is_empty() {
                current_start = byte_pos;
            }
            current_text.push(ch);
        } else if ch == '.' && !current_text.is_empty() {
            let is_abbrev = ABBREVIATIONS.contains(&current_text.as_str());
            // Número decimal (ex: 3.14)
            let current_is_num = current_text.chars().all(char::is_numeric);
            let next_is_num = chars
                .get(i + 1)
                .map(|(_, c)| c.is_numeric())
                .unwrap_or(false);

            if is_abbrev || (current_is_num && next_is_num) {
                current_text.push('.');
            } else {
                flush_token(&mut tokens, &mut current_text, current_start, byte_pos);
                push_token(&mut tokens, ".".to_string(), byte_pos, byte_pos + 1);
            }
        } else if (ch == '\'' || ch == '\u{2019}') && !current_text.is_empty() {
            // Possessivo ("Obama's") vira token separado para não esconder o nome
            let next = chars.get(i + 1).map(|(_, c)| *c);
            let after = chars.get(i + 2).map(|(_, c)| *c);
            let is_possessive = matches!(next, Some('s') | Some('S'))
                && !after.map(char::is_alphanumeric).unwrap_or(false);

            if is_possessive {
                flush_token(&mut tokens, &mut current_text, current_start, byte_pos);
                let end = chars[i + 1].0 + 1;
                push_token(&mut tokens, text[byte_pos..end].to_string(), byte_pos, end);
                i += 2;
                continue;
            }
            // Contrações ("don't") ficam inteiras
            current_text.push(ch);
        } else if ch.is_whitespace() {
            flush_token(&mut tokens, &mut current_text, current_start, byte_pos);
        } else {
            flush_token(&mut tokens, &mut current_text, current_start, byte_pos);
            let ch_len = ch.len_utf8();
            push_token(&mut tokens, ch.to_string(), byte_pos, byte_pos + ch_len);
        }
        i += 1;
    }

    flush_token(&mut tokens, &mut current_text, current_start, text.len());

    tokens
}

/// Fecha o token acumulado e adiciona à lista (se não vazio)
fn flush_token(tokens: &mut Vec<Token>, text: &mut String, start: usize, end: usize) {
    if !text.is_empty() {
        tokens.push(Token {
            text: text.clone(),
            start,
            end,
        });
        text.clear();
    }
}

/// Adiciona um token de pontuação diretamente
fn push_token(tokens: &mut Vec<Token>, text: String, start: usize, end: usize) {
    tokens.push(Token { text, start, end });
}

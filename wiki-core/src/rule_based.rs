//! # Motor de Regras — Gazetteers e Padrões
//!
//! Reconhecedor de entidades baseado em conhecimento explícito: listas de entidades
//! conhecidas (gazetteers) e padrões ortográficos/regex para nomes próprios e datas.
//!
//! ## Ordem de aplicação
//!
//! Cada passo só marca tokens que ainda estão livres, então os primeiros passos têm
//! prioridade:
//!
//! 1. Gazetteers de frases (maior casamento primeiro): PERSON, ORG, GPE, LOC.
//! 2. Padrões de data: mês + dia/ano, ano isolado, décadas, séculos, dias da semana.
//! 3. Título + nome: "President Lincoln", "Dr. Jane Goodall".
//! 4. Primeiro nome conhecido + sobrenome capitalizado: "John Smith".
//! 5. Sufixo de organização: "Acme Corp", "Stanford University".
//! 6. Nacionalidades e grupos (NORP): "American", "Buddhist".
//! 7. Continuação de pessoa: nome conhecido seguido de tokens capitalizados livres.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tagger::{EntityCategory, Tag};
use crate::tokenizer::Token;

/// Uma correspondência de regra: a tag do token e a regra que a atribuiu.
/// O vetor devolvido por [`RuleEngine::apply`] é indexado pela posição do token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMatch {
    pub tag: Tag,
    pub rule_name: String,
    pub confidence: f64,
}

/// Uma frase do gazetteer, já dividida em partes minúsculas.
#[derive(Debug, Clone)]
struct Phrase {
    parts: Vec<String>,
    category: EntityCategory,
}

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december",
    "jan.", "feb.", "mar.", "apr.", "jun.", "jul.", "aug.", "sep.", "sept.", "oct.",
    "nov.", "dec.",
];

const WEEKDAYS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(1[0-9]|20)[0-9]{2}$").expect("regex de ano válida"))
}

fn decade_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(1[0-9]|20)[0-9]0s$").expect("regex de década válida"))
}

fn day_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(0?[1-9]|[12][0-9]|3[01])(st|nd|rd|th)?$").expect("regex de dia válida")
    })
}

fn ordinal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{1,2}(st|nd|rd|th)$").expect("regex de ordinal válida"))
}

fn is_month(s: &str) -> bool {
    MONTHS.contains(&s.to_lowercase().as_str())
}

fn is_year(s: &str) -> bool {
    year_re().is_match(s)
}

fn is_day(s: &str) -> bool {
    day_re().is_match(s)
}

/// Motor de regras com gazetteers e padrões
#[derive(Debug, Clone)]
pub struct RuleEngine {
    /// Frases conhecidas, ordenadas da mais longa para a mais curta
    phrases: Vec<Phrase>,
    /// Primeiros nomes comuns (lowercase)
    first_names: Vec<String>,
    /// Nacionalidades, religiões e grupos políticos (lowercase)
    norp_names: Vec<String>,
    /// Títulos que precedem nomes de pessoas
    person_titles: Vec<String>,
    /// Palavras que fecham o nome de uma organização
    org_suffixes: Vec<String>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self {
            phrases: vec![],
            first_names: vec![],
            norp_names: vec![],
            person_titles: [
                "president", "senator", "governor", "mayor", "minister", "chancellor",
                "king", "queen", "prince", "princess", "pope", "emperor", "empress",
                "admiral", "captain", "judge", "sir", "dame", "lord", "lady", "dr.",
                "mr.", "mrs.", "ms.", "prof.", "gen.", "gov.", "sen.", "rep.", "professor",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            org_suffixes: [
                "inc", "inc.", "corp", "corp.", "corporation", "ltd", "ltd.", "llc",
                "co.", "company", "group", "university", "college", "institute",
                "foundation", "association", "agency", "society", "bank", "party",
                "council", "committee", "commission", "museum", "academy", "records",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    fn add_phrase(&mut self, name: &str, category: EntityCategory) {
        let parts: Vec<String> = name.split_whitespace().map(|p| p.to_lowercase()).collect();
        if parts.is_empty() {
            return;
        }
        // Mantém a lista ordenada por tamanho decrescente (maior casamento vence)
        let pos = self
            .phrases
            .iter()
            .position(|p| p.parts.len() < parts.len())
            .unwrap_or(self.phrases.len());
        self.phrases.insert(pos, Phrase { parts, category });
    }

    pub fn add_person(&mut self, name: &str) {
        self.add_phrase(name, EntityCategory::Person);
    }

    pub fn add_org(&mut self, name: &str) {
        self.add_phrase(name, EntityCategory::Org);
    }

    pub fn add_gpe(&mut self, name: &str) {
        self.add_phrase(name, EntityCategory::Gpe);
    }

    pub fn add_location(&mut self, name: &str) {
        self.add_phrase(name, EntityCategory::Loc);
    }

    pub fn add_first_name(&mut self, name: &str) {
        self.first_names.push(name.to_lowercase());
    }

    pub fn add_norp(&mut self, name: &str) {
        self.norp_names.push(name.to_lowercase());
    }

    /// Número de entradas nos gazetteers (frases + primeiros nomes + NORP).
    pub fn gazetteer_size(&self) -> usize {
        self.phrases.len() + self.first_names.len() + self.norp_names.len()
    }

    /// Aplica todas as regras à sequência de tokens
    ///
    /// Retorna, para cada token, a regra que o marcou (ou `None`).
    pub fn apply(&self, tokens: &[Token]) -> Vec<Option<RuleMatch>> {
        let mut result: Vec<Option<RuleMatch>> = vec![None; tokens.len()];

        self.apply_gazetteers(tokens, &mut result);
        apply_dates(tokens, &mut result);
        self.apply_titles(tokens, &mut result);
        self.apply_first_names(tokens, &mut result);
        self.apply_org_suffixes(tokens, &mut result);
        self.apply_norp(tokens, &mut result);
        extend_persons(tokens, &mut result);

        result
    }

    // 1. Gazetteers de frases (n-gramas)
    fn apply_gazetteers(&self, tokens: &[Token], result: &mut [Option<RuleMatch>]) {
        let mut i = 0;
        'outer: while i < tokens.len() {
            if result[i].is_some() || !tokens[i].is_capitalized() {
                i += 1;
                continue;
            }
            for phrase in &self.phrases {
                let n = phrase.parts.len();
                if i + n > tokens.len() {
                    continue;
                }
                let matches = phrase
                    .parts
                    .iter()
                    .enumerate()
                    .all(|(j, part)| result[i + j].is_none() && tokens[i + j].text.to_lowercase() == *part);
                if matches {
                    let (rule_name, confidence) = match phrase.category {
                        EntityCategory::Person => ("person_gazetteer", 0.92),
                        EntityCategory::Org => ("org_gazetteer", 0.93),
                        EntityCategory::Gpe => ("gpe_gazetteer", 0.90),
                        EntityCategory::Loc => ("location_gazetteer", 0.88),
                        EntityCategory::Norp => ("norp_gazetteer", 0.88),
                        EntityCategory::Date => ("date_gazetteer", 0.88),
                    };
                    mark_span(result, i, n, phrase.category, rule_name, confidence);
                    i += n;
                    continue 'outer;
                }
            }
            i += 1;
        }
    }

    // 3. Regra de título: "President Lincoln" → Lincoln é PERSON
    fn apply_titles(&self, tokens: &[Token], result: &mut [Option<RuleMatch>]) {
        for i in 0..tokens.len().saturating_sub(1) {
            let lower = tokens[i].text.to_lowercase();
            if !self.person_titles.contains(&lower) || result[i + 1].is_some() {
                continue;
            }
            let len = capitalized_run(tokens, result, i + 1);
            if len > 0 {
                mark_span(result, i + 1, len, EntityCategory::Person, "title_pattern", 0.80);
            }
        }
    }

    // 4. Primeiro nome conhecido seguido de sobrenome capitalizado
    fn apply_first_names(&self, tokens: &[Token], result: &mut [Option<RuleMatch>]) {
        let mut i = 0;
        while i < tokens.len() {
            if result[i].is_none()
                && tokens[i].is_capitalized()
                && self.first_names.contains(&tokens[i].text.to_lowercase())
            {
                let surname = capitalized_run(tokens, result, i + 1);
                if surname > 0 {
                    mark_span(result, i, surname + 1, EntityCategory::Person, "first_name_pattern", 0.78);
                    i += surname + 1;
                    continue;
                }
            }
            i += 1;
        }
    }

    // 5. Sufixo de organização: "Acme Corp" → ORG
    fn apply_org_suffixes(&self, tokens: &[Token], result: &mut [Option<RuleMatch>]) {
        for i in 1..tokens.len() {
            if result[i].is_some() || !tokens[i].is_capitalized() {
                continue;
            }
            if !self.org_suffixes.contains(&tokens[i].text.to_lowercase()) {
                continue;
            }
            // Volta enquanto houver tokens capitalizados livres ("of" é permitido no meio)
            let mut start = i;
            while start > 0 {
                let prev = &tokens[start - 1];
                let free = result[start - 1].is_none();
                if free && prev.is_capitalized() && !is_article(&prev.text) {
                    start -= 1;
                } else if free
                    && prev.text == "of"
                    && start >= 2
                    && result[start - 2].is_none()
                    && tokens[start - 2].is_capitalized()
                {
                    start -= 1;
                } else {
                    break;
                }
            }
            if start < i {
                mark_span(result, start, i - start + 1, EntityCategory::Org, "org_suffix_pattern", 0.85);
            }
        }
        // "University of Chicago": sufixo no início seguido de "of" + nome capitalizado
        for i in 0..tokens.len().saturating_sub(2) {
            if result[i].is_some() || !tokens[i].is_capitalized() {
                continue;
            }
            let lower = tokens[i].text.to_lowercase();
            if !self.org_suffixes.contains(&lower) || tokens[i + 1].text != "of" || result[i + 1].is_some() {
                continue;
            }
            let tail = capitalized_run_any(tokens, result, i + 2);
            if tail > 0 {
                mark_span(result, i, tail + 2, EntityCategory::Org, "org_suffix_pattern", 0.85);
            }
        }
    }

    // 6. Nacionalidades e grupos
    fn apply_norp(&self, tokens: &[Token], result: &mut [Option<RuleMatch>]) {
        for (i, token) in tokens.iter().enumerate() {
            if result[i].is_none()
                && token.is_capitalized()
                && self.norp_names.contains(&token.text.to_lowercase())
            {
                mark_span(result, i, 1, EntityCategory::Norp, "norp_gazetteer", 0.86);
            }
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Marca `len` tokens a partir de `start` como B-/I- da categoria.
fn mark_span(
    result: &mut [Option<RuleMatch>],
    start: usize,
    len: usize,
    category: EntityCategory,
    rule_name: &str,
    confidence: f64,
) {
    for j in 0..len {
        let tag = if j == 0 {
            Tag::Begin(category)
        } else {
            Tag::Inside(category)
        };
        result[start + j] = Some(RuleMatch {
            tag,
            rule_name: rule_name.to_string(),
            confidence,
        });
    }
}

/// Quantos tokens capitalizados, livres e alfabéticos seguem a partir de `from`.
fn capitalized_run(tokens: &[Token], result: &[Option<RuleMatch>], from: usize) -> usize {
    let mut len = 0;
    while from + len < tokens.len() {
        let t = &tokens[from + len];
        let alphabetic = t.text.chars().all(|c| c.is_alphabetic() || c == '-' || c == '.');
        if result[from + len].is_none() && t.is_capitalized() && alphabetic && !is_month(&t.text) {
            len += 1;
        } else {
            break;
        }
    }
    len
}

/// Como [`capitalized_run`], mas aceita tokens já marcados (ex: "Chicago" como GPE dentro
/// de "University of Chicago"). Os tokens são remarcados pelo chamador.
fn capitalized_run_any(tokens: &[Token], result: &[Option<RuleMatch>], from: usize) -> usize {
    let mut len = 0;
    while from + len < tokens.len() {
        let t = &tokens[from + len];
        let taken_by_other = result[from + len]
            .as_ref()
            .map(|m| m.tag.category() == Some(EntityCategory::Date))
            .unwrap_or(false);
        if t.is_capitalized() && !taken_by_other {
            len += 1;
        } else {
            break;
        }
    }
    len
}

fn is_article(s: &str) -> bool {
    matches!(s, "The" | "A" | "An" | "This" | "That")
}

fn is_free(result: &[Option<RuleMatch>], k: usize) -> bool {
    k < result.len() && result[k].is_none()
}

// 2. Padrões de data
fn apply_dates(tokens: &[Token], result: &mut [Option<RuleMatch>]) {
    let n = tokens.len();
    let mut i = 0;
    while i < n {
        if result[i].is_some() {
            i += 1;
            continue;
        }
        let text = tokens[i].text.as_str();

        // "January 2015", "July 4, 1776", "March 3rd"
        if tokens[i].is_capitalized() && is_month(text) {
            let mut len = 1;
            if is_free(result, i + len) && is_day(&tokens[i + len].text) {
                len += 1;
                if is_free(result, i + len) && tokens[i + len].text == "," && is_free(result, i + len + 1) && is_year(&tokens[i + len + 1].text) {
                    len += 2;
                } else if is_free(result, i + len) && is_year(&tokens[i + len].text) {
                    len += 1;
                }
            } else if is_free(result, i + len) && is_year(&tokens[i + len].text) {
                len += 1;
            }
            if len > 1 {
                mark_span(result, i, len, EntityCategory::Date, "date_pattern", 0.95);
                i += len;
                continue;
            }
        }

        // "4 July 1776", "4 July"
        if is_day(text) && is_free(result, i + 1) && tokens[i + 1].is_capitalized() && is_month(&tokens[i + 1].text) {
            let mut len = 2;
            if is_free(result, i + 2) && is_year(&tokens[i + 2].text) {
                len += 1;
            }
            mark_span(result, i, len, EntityCategory::Date, "date_pattern", 0.95);
            i += len;
            continue;
        }

        // "the 19th century"
        if ordinal_re().is_match(text) && is_free(result, i + 1) && tokens[i + 1].text.eq_ignore_ascii_case("century") {
            mark_span(result, i, 2, EntityCategory::Date, "date_pattern", 0.90);
            i += 2;
            continue;
        }

        if is_year(text) || decade_re().is_match(text) {
            mark_span(result, i, 1, EntityCategory::Date, "year_pattern", 0.85);
        } else if tokens[i].is_capitalized() && WEEKDAYS.contains(&text.to_lowercase().as_str()) {
            mark_span(result, i, 1, EntityCategory::Date, "weekday_pattern", 0.85);
        }
        i += 1;
    }
}

// 7. "Barack" (gazetteer) + "Hussein Obama" → PERSON contínuo
fn extend_persons(tokens: &[Token], result: &mut [Option<RuleMatch>]) {
    let mut i = 0;
    while i < tokens.len() {
        let is_person = result[i]
            .as_ref()
            .map(|m| m.tag.category() == Some(EntityCategory::Person))
            .unwrap_or(false);
        if !is_person {
            i += 1;
            continue;
        }
        let extra = capitalized_run(tokens, result, i + 1);
        for j in 1..=extra {
            result[i + j] = Some(RuleMatch {
                tag: Tag::Inside(EntityCategory::Person),
                rule_name: "person_continuation".to_string(),
                confidence: 0.75,
            });
        }
        i += extra + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn tag_of(matches: &[Option<RuleMatch>], i: usize) -> Option<Tag> {
        matches[i].as_ref().map(|m| m.tag.clone())
    }

    #[test]
    fn test_person_gazetteer() {
        let mut engine = RuleEngine::new();
        engine.add_person("Barack Obama");

        let tokens = tokenize("Barack Obama won the election");
        let matches = engine.apply(&tokens);

        assert_eq!(tag_of(&matches, 0), Some(Tag::Begin(EntityCategory::Person)));
        assert_eq!(tag_of(&matches, 1), Some(Tag::Inside(EntityCategory::Person)));
        assert!(matches[2].is_none());
    }

    #[test]
    fn test_longest_phrase_wins() {
        let mut engine = RuleEngine::new();
        engine.add_gpe("York");
        engine.add_gpe("New York City");
        engine.add_gpe("New York");

        let tokens = tokenize("She moved to New York City");
        let matches = engine.apply(&tokens);
        assert_eq!(tag_of(&matches, 3), Some(Tag::Begin(EntityCategory::Gpe)));
        assert_eq!(tag_of(&matches, 5), Some(Tag::Inside(EntityCategory::Gpe)));
    }

    #[test]
    fn test_gazetteer_requires_capitalization() {
        let mut engine = RuleEngine::new();
        engine.add_gpe("Turkey");
        let tokens = tokenize("we ate turkey");
        assert!(engine.apply(&tokens).iter().all(|m| m.is_none()));
    }

    #[test]
    fn test_title_pattern() {
        let engine = RuleEngine::new();
        let tokens = tokenize("the speech by President Abraham Lincoln");
        let matches = engine.apply(&tokens);

        assert_eq!(tag_of(&matches, 4), Some(Tag::Begin(EntityCategory::Person)));
        assert_eq!(tag_of(&matches, 5), Some(Tag::Inside(EntityCategory::Person)));
        assert_eq!(matches[4].as_ref().unwrap().rule_name, "title_pattern");
    }

    #[test]
    fn test_first_name_pattern() {
        let mut engine = RuleEngine::new();
        engine.add_first_name("John");
        let tokens = tokenize("yesterday John Smith arrived");
        let matches = engine.apply(&tokens);
        assert_eq!(tag_of(&matches, 1), Some(Tag::Begin(EntityCategory::Person)));
        assert_eq!(tag_of(&matches, 2), Some(Tag::Inside(EntityCategory::Person)));
        assert!(matches[3].is_none());
    }

    #[test]
    fn test_date_patterns() {
        let engine = RuleEngine::new();
        let tokens = tokenize("in January 2015 and on July 4, 1776 during the 1990s");
        let matches = engine.apply(&tokens);
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

        let jan = texts.iter().position(|t| *t == "January").unwrap();
        assert_eq!(tag_of(&matches, jan), Some(Tag::Begin(EntityCategory::Date)));
        assert_eq!(tag_of(&matches, jan + 1), Some(Tag::Inside(EntityCategory::Date)));

        let july = texts.iter().position(|t| *t == "July").unwrap();
        for k in 1..=3 {
            assert_eq!(tag_of(&matches, july + k), Some(Tag::Inside(EntityCategory::Date)));
        }

        let decade = texts.iter().position(|t| *t == "1990s").unwrap();
        assert_eq!(tag_of(&matches, decade), Some(Tag::Begin(EntityCategory::Date)));
    }

    #[test]
    fn test_lone_month_is_not_a_date() {
        let engine = RuleEngine::new();
        let tokens = tokenize("May I come in?");
        assert!(engine.apply(&tokens).iter().all(|m| m.is_none()));
    }

    #[test]
    fn test_org_suffix_pattern() {
        let engine = RuleEngine::new();
        let tokens = tokenize("he joined Acme Widget Corp last year");
        let matches = engine.apply(&tokens);
        assert_eq!(tag_of(&matches, 2), Some(Tag::Begin(EntityCategory::Org)));
        assert_eq!(tag_of(&matches, 4), Some(Tag::Inside(EntityCategory::Org)));
    }

    #[test]
    fn test_university_of_pattern() {
        let mut engine = RuleEngine::new();
        engine.add_gpe("Chicago");
        let tokens = tokenize("she studied at University of Chicago");
        let matches = engine.apply(&tokens);
        // "Chicago" (GPE no gazetteer) passa a fazer parte da organização
        assert_eq!(tag_of(&matches, 3), Some(Tag::Begin(EntityCategory::Org)));
        assert_eq!(tag_of(&matches, 4), Some(Tag::Inside(EntityCategory::Org)));
        assert_eq!(tag_of(&matches, 5), Some(Tag::Inside(EntityCategory::Org)));
    }

    #[test]
    fn test_norp() {
        let mut engine = RuleEngine::new();
        engine.add_norp("American");
        let tokens = tokenize("an American inventor");
        let matches = engine.apply(&tokens);
        assert_eq!(tag_of(&matches, 1), Some(Tag::Begin(EntityCategory::Norp)));
    }

    #[test]
    fn test_person_continuation() {
        let mut engine = RuleEngine::new();
        engine.add_person("Barack");
        let tokens = tokenize("Barack Hussein Obama spoke");
        let matches = engine.apply(&tokens);
        assert_eq!(tag_of(&matches, 2), Some(Tag::Inside(EntityCategory::Person)));
        assert!(matches[3].is_none());
    }
}

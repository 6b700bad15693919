//! # Extração de Entidades
//!
//! Duas camadas:
//!
//! - [`EntityRecognizer`]: a capacidade de NER propriamente dita. Recebe um texto e
//!   devolve entidades com offsets em **caracteres** sobre esse texto. A implementação
//!   embutida é o [`RuleBasedRecognizer`] (tokenizador + [`RuleEngine`] + spans BIO).
//! - [`EntityExtractor`]: o contrato de extração usado pelo pipeline. Limita a entrada a
//!   uma janela de caracteres, chama o reconhecedor e limita o número de resultados.
//!
//! ## Offsets e a janela
//!
//! O texto é truncado nos primeiros [`DEFAULT_WINDOW_CHARS`] caracteres antes do
//! reconhecimento. Os offsets devolvidos são relativos a essa janela: para artigos maiores
//! que a janela eles não indicam posições além dela no texto original.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Result;
use crate::gazetteer::build_rule_engine;
use crate::rule_based::RuleEngine;
use crate::tagger::{tokens_to_spans, Tag, TaggedToken};
use crate::tokenizer::tokenize;

/// Tamanho da janela de texto vista pelo reconhecedor, em caracteres.
pub const DEFAULT_WINDOW_CHARS: usize = 50_000;

/// Número máximo de entidades devolvidas por padrão.
pub const DEFAULT_MAX_ENTITIES: usize = 20;

/// Uma entidade nomeada com offsets em caracteres (`start` inclusivo, `end` exclusivo).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub start: usize,
    pub end: usize,
}

/// Capacidade de reconhecimento de entidades nomeadas.
pub trait EntityRecognizer: Send + Sync {
    fn name(&self) -> &str;

    /// Reconhece entidades em `text`, em ordem de aparição, com offsets em caracteres.
    fn recognize(&self, text: &str) -> Result<Vec<Entity>>;
}

/// Reconhecedor embutido baseado em gazetteers e padrões.
#[derive(Debug, Clone)]
pub struct RuleBasedRecognizer {
    engine: RuleEngine,
}

impl RuleBasedRecognizer {
    pub const NAME: &'static str = "rules";

    /// Reconhecedor com os gazetteers embutidos de inglês.
    pub fn new() -> Self {
        Self::with_engine(build_rule_engine())
    }

    pub fn with_engine(engine: RuleEngine) -> Self {
        debug!(phrases = engine.gazetteer_size(), "motor de regras carregado");
        Self { engine }
    }

    /// Etiqueta cada token com a tag da regra que o marcou (ou `O`).
    pub fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let tokens = tokenize(text);
        let matches = self.engine.apply(&tokens);

        tokens
            .into_iter()
            .zip(matches)
            .map(|(token, m)| match m {
                Some(m) => TaggedToken {
                    token,
                    tag: m.tag,
                    confidence: m.confidence,
                    source: m.rule_name,
                },
                None => TaggedToken {
                    token,
                    tag: Tag::Outside,
                    confidence: 1.0,
                    source: "none".to_string(),
                },
            })
            .collect()
    }
}

impl Default for RuleBasedRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer for RuleBasedRecognizer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn recognize(&self, text: &str) -> Result<Vec<Entity>> {
        let tagged = self.tag(text);
        let spans = tokens_to_spans(&tagged, text);

        // Os spans vêm em ordem de bytes; um único passe converte para caracteres
        let mut entities = Vec::with_capacity(spans.len());
        let mut byte_pos = 0;
        let mut char_pos = 0;
        for span in spans {
            char_pos += text[byte_pos..span.start].chars().count();
            let start = char_pos;
            char_pos += text[span.start..span.end].chars().count();
            byte_pos = span.end;

            trace!(
                text = %span.text,
                category = %span.category,
                rule = %span.source,
                confidence = span.confidence,
                "entidade reconhecida"
            );
            entities.push(Entity {
                text: span.text,
                entity_type: span.category.name().to_string(),
                start,
                end: char_pos,
            });
        }
        Ok(entities)
    }
}

/// Os primeiros `max_chars` caracteres de `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Extrator de entidades: janela de entrada + limite de resultados.
#[derive(Clone)]
pub struct EntityExtractor {
    recognizer: Arc<dyn EntityRecognizer>,
    window_chars: usize,
}

impl EntityExtractor {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            recognizer,
            window_chars: DEFAULT_WINDOW_CHARS,
        }
    }

    pub fn with_window(mut self, window_chars: usize) -> Self {
        self.window_chars = window_chars;
        self
    }

    /// Extrai até `max_entities` entidades, em ordem de aparição.
    ///
    /// O limite é aplicado depois do reconhecimento: o reconhecedor sempre vê a janela
    /// inteira. Entidades com offsets fora da janela são descartadas.
    pub fn extract(&self, text: &str, max_entities: usize) -> Result<Vec<Entity>> {
        let window = truncate_chars(text, self.window_chars);
        let window_len = window.chars().count();

        let mut entities: Vec<Entity> = self
            .recognizer
            .recognize(window)?
            .into_iter()
            .filter(|e| e.start < e.end && e.end <= window_len)
            .collect();

        // sort_by_key é estável: entidades no mesmo offset mantêm a ordem do reconhecedor
        entities.sort_by_key(|e| e.start);
        let found = entities.len();
        entities.truncate(max_entities);

        debug!(
            recognizer = self.recognizer.name(),
            window_len,
            found,
            returned = entities.len(),
            "entidades extraídas"
        );
        Ok(entities)
    }
}

impl std::fmt::Debug for EntityExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityExtractor")
            .field("recognizer", &self.recognizer.name())
            .field("window_chars", &self.window_chars)
            .finish()
    }
}

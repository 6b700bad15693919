//! # Pipeline de Análise — Orquestrador
//!
//! O [`TextAnalyzer`] é o único ponto de entrada público da análise. Ele compõe:
//!
//! 1. **Contagem** ([`crate::tokenizer::count_words`]): total de tokens, sem filtro.
//! 2. **Ranking** ([`crate::frequency::rank`]): top-N palavras sem stop-words.
//! 3. **Sentimento** ([`SentimentClassifier`]): rótulo + três scores.
//! 4. **Entidades** ([`EntityExtractor`]): entidades com offsets em caracteres.
//!
//! As quatro computações são funções puras do texto. Elas rodam em paralelo via
//! `rayon::join`, sem estado mutável compartilhado.
//!
//! ## Falhas
//!
//! Uma falha em qualquer etapa (ex: reconhecedor indisponível) derruba a chamada inteira.
//! Não existe resultado parcial.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entities::{Entity, EntityExtractor};
use crate::error::Result;
use crate::frequency::{rank, WordFrequency};
use crate::model::{AnalyzerConfig, Capabilities};
use crate::sentiment::{SentimentClassifier, SentimentResult};
use crate::stopwords::StopWords;
use crate::tokenizer::{count_words, words};

/// Resultado completo da análise de um texto.
///
/// `sentiment` e `entities` são sempre preenchidos pelo [`TextAnalyzer`]; são opcionais
/// apenas para aceitar snapshots produzidos externamente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleAnalysis {
    pub word_count: usize,
    pub frequent_words: Vec<WordFrequency>,
    #[serde(default)]
    pub sentiment: Option<SentimentResult>,
    #[serde(default)]
    pub entities: Option<Vec<Entity>>,
}

/// Analisador de texto. Barato de clonar e seguro para uso entre threads.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    stop_words: Arc<StopWords>,
    sentiment: SentimentClassifier,
    entities: EntityExtractor,
    top_n: usize,
    max_entities: usize,
}

impl TextAnalyzer {
    pub fn new(capabilities: Capabilities, config: &AnalyzerConfig) -> Self {
        Self {
            stop_words: capabilities.stop_words,
            sentiment: SentimentClassifier::new(capabilities.scorer),
            entities: EntityExtractor::new(capabilities.recognizer).with_window(config.entity_window),
            top_n: config.top_n,
            max_entities: config.max_entities,
        }
    }

    /// Carrega as capacidades e constrói o analisador em um passo.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        let capabilities = Capabilities::load(config)?;
        Ok(Self::new(capabilities, config))
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn max_entities(&self) -> usize {
        self.max_entities
    }

    /// Número de palavras do texto (todas, sem filtro).
    pub fn count_words(&self, text: &str) -> usize {
        count_words(text)
    }

    /// As `top_n` palavras mais frequentes, sem stop-words nem palavras curtas.
    pub fn frequent_words(&self, text: &str, top_n: usize) -> Vec<WordFrequency> {
        rank(&words(text), &self.stop_words, top_n)
    }

    pub fn analyze_sentiment(&self, text: &str) -> Result<SentimentResult> {
        self.sentiment.classify(text)
    }

    /// Entidades limitadas a `max_entities` configurado.
    pub fn extract_entities(&self, text: &str) -> Result<Vec<Entity>> {
        self.entities.extract(text, self.max_entities)
    }

    /// Análise completa com o `top_n` configurado.
    pub fn analyze(&self, text: &str) -> Result<ArticleAnalysis> {
        self.analyze_text(text, self.top_n)
    }

    /// Análise completa: contagem, ranking, sentimento e entidades.
    pub fn analyze_text(&self, text: &str, top_n: usize) -> Result<ArticleAnalysis> {
        let start = std::time::Instant::now();

        let ((word_count, frequent_words), (sentiment, entities)) = rayon::join(
            || {
                let tokens = words(text);
                let ranked = rank(&tokens, &self.stop_words, top_n);
                (tokens.len(), ranked)
            },
            || {
                rayon::join(
                    || self.analyze_sentiment(text),
                    || self.extract_entities(text),
                )
            },
        );
        let sentiment = sentiment?;
        let entities = entities?;

        debug!(
            word_count,
            frequent = frequent_words.len(),
            sentiment = %sentiment.label,
            entities = entities.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "texto analisado"
        );

        Ok(ArticleAnalysis {
            word_count,
            frequent_words,
            sentiment: Some(sentiment),
            entities: Some(entities),
        })
    }
}

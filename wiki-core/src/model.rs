//! # Inicialização das Capacidades
//!
//! O analisador depende de três recursos pesados: o conjunto de stop-words, o scorer de
//! polaridade e o reconhecedor de entidades. Eles são construídos **uma vez**, no início
//! do processo, por [`Capabilities::load`]. Se algum falhar, o processo não sobe.
//!
//! Depois de carregadas, as capacidades são imutáveis e compartilhadas via `Arc`:
//! leituras concorrentes não precisam de sincronização.
//!
//! ## Seleção por configuração
//!
//! | Campo              | Valores aceitos | Implementação             |
//! |--------------------|-----------------|---------------------------|
//! | `sentiment_engine` | `lexicon`       | [`LexiconScorer`]         |
//! | `entity_engine`    | `rules`         | [`RuleBasedRecognizer`]   |

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::entities::{EntityRecognizer, RuleBasedRecognizer, DEFAULT_MAX_ENTITIES, DEFAULT_WINDOW_CHARS};
use crate::error::{AnalysisError, Result};
use crate::sentiment::{LexiconScorer, PolarityScorer};
use crate::stopwords::StopWords;

/// Número padrão de palavras frequentes devolvidas.
pub const DEFAULT_TOP_N: usize = 10;

/// Configuração do analisador.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Idioma das stop-words ("english")
    pub language: String,
    pub top_n: usize,
    pub max_entities: usize,
    /// Janela de texto do reconhecedor, em caracteres
    pub entity_window: usize,
    pub sentiment_engine: String,
    pub entity_engine: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            language: "english".to_string(),
            top_n: DEFAULT_TOP_N,
            max_entities: DEFAULT_MAX_ENTITIES,
            entity_window: DEFAULT_WINDOW_CHARS,
            sentiment_engine: LexiconScorer::NAME.to_string(),
            entity_engine: RuleBasedRecognizer::NAME.to_string(),
        }
    }
}

/// As capacidades carregadas, prontas para serem compartilhadas.
#[derive(Clone)]
pub struct Capabilities {
    pub stop_words: Arc<StopWords>,
    pub scorer: Arc<dyn PolarityScorer>,
    pub recognizer: Arc<dyn EntityRecognizer>,
}

impl Capabilities {
    /// Carrega todas as capacidades a partir da configuração.
    ///
    /// Idioma ou engine desconhecidos falham com [`AnalysisError::Configuration`].
    pub fn load(config: &AnalyzerConfig) -> Result<Self> {
        let stop_words = StopWords::for_language(&config.language)?;

        let scorer: Arc<dyn PolarityScorer> = match config.sentiment_engine.as_str() {
            LexiconScorer::NAME => Arc::new(LexiconScorer::new()),
            other => {
                return Err(AnalysisError::configuration(format!(
                    "unknown sentiment engine '{other}'"
                )))
            }
        };

        let recognizer: Arc<dyn EntityRecognizer> = match config.entity_engine.as_str() {
            RuleBasedRecognizer::NAME => Arc::new(RuleBasedRecognizer::new()),
            other => {
                return Err(AnalysisError::configuration(format!(
                    "unknown entity engine '{other}'"
                )))
            }
        };

        info!(
            language = stop_words.language().name(),
            stop_words = stop_words.len(),
            sentiment = scorer.name(),
            entities = recognizer.name(),
            "capacidades de análise carregadas"
        );

        Ok(Self {
            stop_words: Arc::new(stop_words),
            scorer,
            recognizer,
        })
    }

    /// Monta as capacidades a partir de implementações já construídas.
    pub fn from_parts(
        stop_words: StopWords,
        scorer: Arc<dyn PolarityScorer>,
        recognizer: Arc<dyn EntityRecognizer>,
    ) -> Self {
        Self {
            stop_words: Arc::new(stop_words),
            scorer,
            recognizer,
        }
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("language", &self.stop_words.language())
            .field("scorer", &self.scorer.name())
            .field("recognizer", &self.recognizer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let caps = Capabilities::load(&AnalyzerConfig::default()).unwrap();
        assert_eq!(caps.scorer.name(), "lexicon");
        assert_eq!(caps.recognizer.name(), "rules");
        assert!(caps.stop_words.is_stopword("the"));
    }

    #[test]
    fn test_unknown_engines_are_configuration_errors() {
        let config = AnalyzerConfig {
            sentiment_engine: "vader".to_string(),
            ..AnalyzerConfig::default()
        };
        assert!(matches!(
            Capabilities::load(&config),
            Err(AnalysisError::Configuration(_))
        ));

        let config = AnalyzerConfig {
            entity_engine: "spacy".to_string(),
            ..AnalyzerConfig::default()
        };
        assert!(matches!(
            Capabilities::load(&config),
            Err(AnalysisError::Configuration(_))
        ));

        let config = AnalyzerConfig {
            language: "klingon".to_string(),
            ..AnalyzerConfig::default()
        };
        assert!(Capabilities::load(&config).is_err());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: AnalyzerConfig = serde_json::from_str(r#"{"top_n": 5}"#).unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.max_entities, 20);
        assert_eq!(config.entity_window, 50_000);
        assert_eq!(config.language, "english");
    }
}

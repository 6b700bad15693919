//! # wiki-core — Análise de Texto de Artigos
//!
//! Núcleo de análise do Wikipedia Analyzer: recebe o texto bruto de um artigo e produz
//! um [`ArticleAnalysis`] com contagem de palavras, palavras mais frequentes, sentimento
//! e entidades nomeadas.
//!
//! ## Arquitetura
//!
//! 1.  **Tokenização** ([`tokenizer`]): `\w+` em minúsculas para contagem; tokens com
//!     offsets para o NER.
//! 2.  **Stop-words** ([`stopwords`]): conjunto fixo por idioma.
//! 3.  **Ranking** ([`frequency`]): top-N com desempate por primeira aparição.
//! 4.  **Sentimento** ([`sentiment`]): polaridade → rótulo + três scores.
//! 5.  **Entidades** ([`entities`]): regras e gazetteers ([`rule_based`], [`gazetteer`])
//!     montados em spans BIO ([`tagger`]).
//! 6.  **Orquestrador** ([`pipeline`]): compõe tudo em paralelo.
//!
//! As capacidades pesadas (scorer e reconhecedor) são carregadas uma vez por
//! [`model::Capabilities::load`] e trocáveis via os traits [`PolarityScorer`] e
//! [`EntityRecognizer`].
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use wiki_core::{AnalyzerConfig, SentimentLabel, TextAnalyzer};
//!
//! let analyzer = TextAnalyzer::from_config(&AnalyzerConfig::default()).unwrap();
//!
//! let analysis = analyzer
//!     .analyze_text("Marie Curie was a wonderful scientist who moved to France.", 5)
//!     .unwrap();
//!
//! assert_eq!(analysis.word_count, 10);
//! assert_eq!(analysis.sentiment.unwrap().label, SentimentLabel::Positive);
//! for entity in analysis.entities.unwrap() {
//!     println!("{} ({}) [{}..{}]", entity.text, entity.entity_type, entity.start, entity.end);
//! }
//! ```

pub mod entities;
pub mod error;
pub mod frequency;
pub mod gazetteer;
pub mod model;
pub mod pipeline;
pub mod rule_based;
pub mod sentiment;
pub mod stopwords;
pub mod tagger;
pub mod tokenizer;

pub use entities::{Entity, EntityExtractor, EntityRecognizer, RuleBasedRecognizer};
pub use error::{AnalysisError, Result};
pub use frequency::WordFrequency;
pub use model::{AnalyzerConfig, Capabilities};
pub use pipeline::{ArticleAnalysis, TextAnalyzer};
pub use sentiment::{LexiconScorer, PolarityScorer, SentimentClassifier, SentimentLabel, SentimentResult};
pub use stopwords::StopWords;
pub use tagger::{EntityCategory, EntitySpan, Tag, TaggedToken};
pub use tokenizer::Token;

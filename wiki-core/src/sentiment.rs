//! # Classificação de Sentimento
//!
//! O classificador depende de uma capacidade externa de **polaridade**
//! ([`PolarityScorer`]): um escalar em `[-1, 1]` (positivo = tom favorável, magnitude =
//! força). A polaridade é então mapeada de forma determinística para um rótulo de 3
//! classes e três pontuações derivadas:
//!
//! | Polaridade       | Rótulo   | positive    | negative    | neutral       |
//! |------------------|----------|-------------|-------------|---------------|
//! | `p > 0.1`        | Positive | `0.5 + p/2` | `0.5 - p/2` | `0.5 - abs(p)/2` |
//! | `p < -0.1`       | Negative | `0.5 + p/2` | `0.5 - p/2` | `0.5 - abs(p)/2` |
//! | `-0.1 ≤ p ≤ 0.1` | Neutral  | `0.5 + p`   | `0.5 - p`   | `0.8`         |
//!
//! As três pontuações **não** formam uma distribuição (não somam 1). São indicadores
//! independentes e assim devem permanecer: consumidores já dependem desses valores.
//!
//! ## Scorer embutido
//!
//! [`LexiconScorer`] é um scorer léxico leve no estilo do TextBlob: cada palavra do
//! léxico tem uma polaridade, intensificadores ("very") multiplicam a palavra seguinte
//! e negações ("not") a invertem pela metade. Um modificador vale só para a palavra
//! seguinte: qualquer outra palavra (exceto sobras curtas como o "t" de "don't") ou o
//! fim da sentença o descarta. A polaridade do texto é a média das palavras pontuadas.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::tokenizer::words;

/// Limiar (exclusivo) que separa Neutral de Positive/Negative.
pub const NEUTRAL_BAND: f64 = 0.1;

/// Capacidade de pontuação de polaridade.
///
/// Implementações são carregadas uma vez na inicialização e compartilhadas entre
/// threads; `score` não pode depender de estado mutável.
pub trait PolarityScorer: Send + Sync {
    /// Nome da capacidade, usado em logs e erros.
    fn name(&self) -> &str;

    /// Polaridade do texto em `[-1, 1]`.
    fn score(&self, text: &str) -> Result<f64>;
}

/// Rótulo de sentimento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn name(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Resultado da classificação de sentimento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl SentimentResult {
    /// Mapeia uma polaridade para rótulo e pontuações (tabela no topo do módulo).
    pub fn from_polarity(p: f64) -> Self {
        if p > NEUTRAL_BAND {
            Self {
                label: SentimentLabel::Positive,
                positive: 0.5 + p / 2.0,
                negative: 0.5 - p / 2.0,
                neutral: 0.5 - p.abs() / 2.0,
            }
        } else if p < -NEUTRAL_BAND {
            Self {
                label: SentimentLabel::Negative,
                positive: 0.5 + p / 2.0,
                negative: 0.5 - p / 2.0,
                neutral: 0.5 - p.abs() / 2.0,
            }
        } else {
            Self {
                label: SentimentLabel::Neutral,
                positive: 0.5 + p,
                negative: 0.5 - p,
                neutral: 0.8,
            }
        }
    }
}

/// Classificador de sentimento sobre uma capacidade de polaridade.
#[derive(Clone)]
pub struct SentimentClassifier {
    scorer: Arc<dyn PolarityScorer>,
}

impl SentimentClassifier {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self { scorer }
    }

    /// Classifica o texto. Falhas do scorer são propagadas sem retry.
    pub fn classify(&self, text: &str) -> Result<SentimentResult> {
        let p = self.scorer.score(text)?;
        if !p.is_finite() || !(-1.0..=1.0).contains(&p) {
            return Err(AnalysisError::unavailable(
                self.scorer.name(),
                format!("polarity {p} outside [-1, 1]"),
            ));
        }
        Ok(SentimentResult::from_polarity(p))
    }
}

impl std::fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentClassifier")
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

/// Léxico de polaridade (inglês). Valores na escala do TextBlob.
const LEXICON: &[(&str, f64)] = &[
    // positivos
    ("good", 0.7), ("great", 0.8), ("excellent", 1.0), ("amazing", 0.6),
    ("wonderful", 1.0), ("awesome", 1.0), ("fantastic", 0.4), ("brilliant", 0.9),
    ("best", 1.0), ("better", 0.5), ("love", 0.5), ("loved", 0.7), ("lovely", 0.5),
    ("like", 0.2), ("nice", 0.6), ("happy", 0.8), ("glad", 0.5), ("beautiful", 0.85),
    ("perfect", 1.0), ("superb", 1.0), ("outstanding", 0.5), ("impressive", 1.0),
    ("pleasant", 0.73), ("enjoy", 0.4), ("enjoyed", 0.4), ("favorite", 0.5),
    ("success", 0.3), ("successful", 0.75), ("positive", 0.23), ("remarkable", 0.75),
    ("popular", 0.6), ("important", 0.4), ("famous", 0.5), ("notable", 0.5),
    ("significant", 0.38), ("powerful", 0.3), ("strong", 0.43), ("effective", 0.6),
    ("helpful", 0.5), ("useful", 0.3), ("easy", 0.43), ("fun", 0.3), ("fine", 0.42),
    ("interesting", 0.5), ("exciting", 0.3), ("incredible", 0.9), ("elegant", 0.5),
    ("win", 0.8), ("won", 0.3), ("victory", 0.5), ("peace", 0.3), ("hope", 0.3),
    ("benefit", 0.3), ("celebrated", 0.5), ("influential", 0.5), ("acclaimed", 0.6),
    // negativos
    ("bad", -0.7), ("terrible", -1.0), ("awful", -1.0), ("horrible", -1.0),
    ("worst", -1.0), ("worse", -0.4), ("hate", -0.8), ("hated", -0.9),
    ("disappointing", -0.6), ("disappointed", -0.75), ("poor", -0.4), ("sad", -0.5),
    ("angry", -0.5), ("ugly", -0.7), ("boring", -1.0), ("wrong", -0.5),
    ("fail", -0.5), ("failed", -0.5), ("failure", -0.32), ("negative", -0.3),
    ("difficult", -0.5), ("hard", -0.29), ("problem", -0.2), ("dangerous", -0.6),
    ("violent", -0.8), ("war", -0.5), ("death", -0.4), ("dead", -0.2),
    ("died", -0.3), ("killed", -0.2), ("crisis", -0.5), ("disaster", -0.8),
    ("tragic", -0.75), ("painful", -0.7), ("stupid", -0.8), ("annoying", -0.8),
    ("useless", -0.5), ("weak", -0.38), ("evil", -1.0), ("cruel", -1.0),
    ("corrupt", -0.5), ("controversial", -0.2), ("lost", -0.2), ("loss", -0.3),
    ("decline", -0.3), ("destroyed", -0.6), ("pathetic", -1.0), ("mediocre", -0.5),
];

/// Intensificadores e o fator aplicado à próxima palavra do léxico.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3), ("really", 1.3), ("extremely", 1.5), ("incredibly", 1.4),
    ("so", 1.2), ("too", 1.2), ("quite", 1.1), ("highly", 1.3), ("absolutely", 1.5),
    ("totally", 1.4), ("completely", 1.4), ("most", 1.2),
];

/// Negações. Tokens como "isn" vêm de "isn't" após a divisão por `\w+`.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "without", "cannot", "isn", "wasn",
    "aren", "weren", "don", "doesn", "didn", "wouldn", "couldn", "shouldn",
    "hasn", "haven", "hadn", "ain",
];

/// Fator aplicado a uma palavra negada ("not good" = 0.7 * -0.5).
const NEGATION_FACTOR: f64 = -0.5;

/// Palavras fora do léxico com até este tamanho não desfazem uma negação.
const NEGATION_SKIP_LEN: usize = 1;

/// Palavras fora do léxico com até este tamanho não desfazem um intensificador.
const INTENSIFIER_SKIP_LEN: usize = 2;

/// Scorer léxico embutido.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    polarities: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
}

impl LexiconScorer {
    pub const NAME: &'static str = "lexicon";

    pub fn new() -> Self {
        Self {
            polarities: LEXICON.iter().map(|(w, p)| (w.to_string(), *p)).collect(),
            intensifiers: INTENSIFIERS.iter().map(|(w, f)| (w.to_string(), *f)).collect(),
        }
    }

    fn polarity(&self, text: &str) -> f64 {
        let mut assessments: Vec<f64> = Vec::new();

        // Modificadores não atravessam o fim de uma sentença
        for sentence in text.split(is_sentence_break) {
            let mut negated = false;
            let mut intensity = 1.0;

            for word in words(sentence) {
                if NEGATORS.contains(&word.as_str()) {
                    negated = true;
                    continue;
                }
                if let Some(&factor) = self.intensifiers.get(&word) {
                    intensity *= factor;
                    continue;
                }
                if let Some(&p) = self.polarities.get(&word) {
                    let mut value = p * intensity;
                    if negated {
                        value *= NEGATION_FACTOR;
                    }
                    assessments.push(value.clamp(-1.0, 1.0));
                    negated = false;
                    intensity = 1.0;
                    continue;
                }

                // Qualquer outra palavra encerra o alcance; sobras curtas ("t" de "don't") não
                let len = word.chars().count();
                if len > NEGATION_SKIP_LEN {
                    negated = false;
                }
                if len > INTENSIFIER_SKIP_LEN {
                    intensity = 1.0;
                }
            }
        }

        if assessments.is_empty() {
            return 0.0;
        }
        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

fn is_sentence_break(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | ';')
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconScorer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn score(&self, text: &str) -> Result<f64> {
        Ok(self.polarity(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    struct FixedScorer(f64);

    impl PolarityScorer for FixedScorer {
        fn name(&self) -> &str {
            "fixed"
        }
        fn score(&self, _text: &str) -> Result<f64> {
            Ok(self.0)
        }
    }

    struct BrokenScorer;

    impl PolarityScorer for BrokenScorer {
        fn name(&self) -> &str {
            "broken"
        }
        fn score(&self, _text: &str) -> Result<f64> {
            Err(AnalysisError::unavailable("broken", "model not loaded"))
        }
    }

    fn classify_with(p: f64) -> SentimentResult {
        SentimentClassifier::new(Arc::new(FixedScorer(p)))
            .classify("irrelevante")
            .unwrap()
    }

    #[test]
    fn test_boundary_is_neutral() {
        assert_eq!(classify_with(0.1).label, SentimentLabel::Neutral);
        assert_eq!(classify_with(-0.1).label, SentimentLabel::Neutral);
        assert_eq!(classify_with(0.1000001).label, SentimentLabel::Positive);
        assert_eq!(classify_with(-0.1000001).label, SentimentLabel::Negative);
    }

    #[test]
    fn test_positive_mapping() {
        let r = classify_with(0.6);
        assert_eq!(r.label, SentimentLabel::Positive);
        assert!((r.positive - 0.8).abs() < EPS);
        assert!((r.negative - 0.2).abs() < EPS);
        assert!((r.neutral - 0.2).abs() < EPS);
    }

    #[test]
    fn test_negative_mapping() {
        let r = classify_with(-0.4);
        assert_eq!(r.label, SentimentLabel::Negative);
        assert!((r.positive - 0.3).abs() < EPS);
        assert!((r.negative - 0.7).abs() < EPS);
        assert!((r.neutral - 0.3).abs() < EPS);
    }

    #[test]
    fn test_neutral_mapping_is_not_normalized() {
        let r = classify_with(0.05);
        assert_eq!(r.label, SentimentLabel::Neutral);
        assert!((r.positive - 0.55).abs() < EPS);
        assert!((r.negative - 0.45).abs() < EPS);
        assert!((r.neutral - 0.8).abs() < EPS);
        // As três pontuações somam mais que 1
        assert!(r.positive + r.negative + r.neutral > 1.0);
    }

    #[test]
    fn test_extreme_polarity() {
        let r = classify_with(1.0);
        assert!((r.positive - 1.0).abs() < EPS);
        assert!((r.negative - 0.0).abs() < EPS);
        assert!((r.neutral - 0.0).abs() < EPS);
    }

    #[test]
    fn test_scorer_failure_propagates() {
        let classifier = SentimentClassifier::new(Arc::new(BrokenScorer));
        let err = classifier.classify("texto").unwrap_err();
        assert!(matches!(err, AnalysisError::CapabilityUnavailable { .. }));
    }

    #[test]
    fn test_out_of_range_polarity_is_rejected() {
        let classifier = SentimentClassifier::new(Arc::new(FixedScorer(f64::NAN)));
        assert!(classifier.classify("x").is_err());
        let classifier = SentimentClassifier::new(Arc::new(FixedScorer(1.5)));
        assert!(classifier.classify("x").is_err());
    }

    #[test]
    fn test_lexicon_positive_and_negative() {
        let classifier = SentimentClassifier::new(Arc::new(LexiconScorer::new()));

        let pos = classifier
            .classify("I love this product! It's amazing and wonderful.")
            .unwrap();
        assert_eq!(pos.label, SentimentLabel::Positive);
        assert!(pos.positive > 0.5);

        let neg = classifier
            .classify("I hate this product. It's terrible and disappointing.")
            .unwrap();
        assert_eq!(neg.label, SentimentLabel::Negative);
        assert!(neg.negative > 0.5);
    }

    #[test]
    fn test_lexicon_empty_text_is_neutral() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score("").unwrap(), 0.0);
        let r = SentimentClassifier::new(Arc::new(scorer)).classify("").unwrap();
        assert_eq!(r.label, SentimentLabel::Neutral);
        assert!((r.positive - 0.5).abs() < EPS);
        assert!((r.negative - 0.5).abs() < EPS);
        assert!((r.neutral - 0.8).abs() < EPS);
    }

    #[test]
    fn test_lexicon_negation_and_intensifier() {
        let scorer = LexiconScorer::new();
        let plain = scorer.score("good").unwrap();
        let very = scorer.score("very good").unwrap();
        let negated = scorer.score("not good").unwrap();

        assert!(very > plain);
        assert!(negated < 0.0);
        assert!((negated - (0.7 * NEGATION_FACTOR)).abs() < EPS);
    }

    #[test]
    fn test_negation_stops_at_sentence_break() {
        let scorer = LexiconScorer::new();
        let great = scorer.score("great").unwrap();

        assert!((scorer.score("It was not. The weather was great.").unwrap() - great).abs() < EPS);
        assert!((scorer.score("It was not raining. The weather was great.").unwrap() - great).abs() < EPS);
        let r = SentimentClassifier::new(Arc::new(scorer))
            .classify("It was not raining. The weather was great.")
            .unwrap();
        assert_eq!(r.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_modifiers_apply_only_to_next_word() {
        let scorer = LexiconScorer::new();
        let good = scorer.score("good").unwrap();

        let intensified = scorer.score("Very few people came, the show was good").unwrap();
        assert!((intensified - good).abs() < EPS);

        let negated = scorer.score("I don't know why, but the food was good.").unwrap();
        assert!((negated - good).abs() < EPS);
    }

    #[test]
    fn test_contraction_keeps_negation() {
        let scorer = LexiconScorer::new();
        let liked = scorer.score("I don't like it").unwrap();
        assert!(liked < 0.0);
        assert!((liked - 0.2 * NEGATION_FACTOR).abs() < EPS);
    }

    #[test]
    fn test_label_serializes_capitalized() {
        let json = serde_json::to_string(&SentimentResult::from_polarity(0.0)).unwrap();
        assert!(json.contains("\"label\":\"Neutral\""));
    }
}

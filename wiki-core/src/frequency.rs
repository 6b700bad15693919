//! # Ranking de Frequência
//!
//! Conta as ocorrências de cada token, descartando stop-words e tokens curtos, e
//! devolve os `top_n` mais frequentes.
//!
//! ## Desempate
//!
//! A ordenação é por contagem decrescente. Em caso de empate vence quem apareceu
//! primeiro no fluxo filtrado: as contagens são mantidas em ordem de inserção e a
//! ordenação é estável.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::stopwords::StopWords;

/// Tokens com até 2 caracteres nunca entram no ranking.
pub const MIN_WORD_LEN: usize = 3;

/// Uma palavra e quantas vezes ela aparece no texto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

/// O token participa do ranking?
pub fn is_rankable(token: &str, stop_words: &StopWords) -> bool {
    token.chars().count() >= MIN_WORD_LEN && !stop_words.is_stopword(token)
}

/// Devolve os `top_n` tokens mais frequentes.
///
/// `tokens` deve vir de [`crate::tokenizer::words`] (minúsculas). A comparação entre
/// tokens é por igualdade exata de string.
pub fn rank<S: AsRef<str>>(tokens: &[S], stop_words: &StopWords, top_n: usize) -> Vec<WordFrequency> {
    if top_n == 0 {
        return Vec::new();
    }

    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for token in tokens.iter().map(AsRef::as_ref) {
        if !is_rankable(token, stop_words) {
            continue;
        }
        match positions.get(token) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    // sort_by é estável: empates preservam a ordem da primeira aparição
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(top_n);

    counts
        .into_iter()
        .map(|(word, count)| WordFrequency {
            word: word.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::words;

    #[test]
    fn test_rank_python_example() {
        let text = "Python python PYTHON Python. Test test testing tests. Word word words wording.";
        let ranked = rank(&words(text), &StopWords::default(), 3);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0], WordFrequency { word: "python".into(), count: 4 });
        assert_eq!(ranked[1], WordFrequency { word: "test".into(), count: 2 });
        assert_eq!(ranked[2], WordFrequency { word: "word".into(), count: 2 });
    }

    #[test]
    fn test_rank_filters_stopwords_and_short_tokens() {
        let tokens = words("The cat and the dog ran to an ox by the sea of an ox");
        let ranked = rank(&tokens, &StopWords::default(), 10);
        let ranked_words: Vec<&str> = ranked.iter().map(|wf| wf.word.as_str()).collect();

        assert_eq!(ranked_words, vec!["cat", "dog", "ran", "sea"]);
        assert!(ranked.iter().all(|wf| wf.count >= 1));
    }

    #[test]
    fn test_rank_tie_break_first_appearance() {
        let tokens = words("zebra apple mango apple zebra mango kiwi");
        let ranked = rank(&tokens, &StopWords::default(), 10);
        let ranked_words: Vec<&str> = ranked.iter().map(|wf| wf.word.as_str()).collect();
        assert_eq!(ranked_words, vec!["zebra", "apple", "mango", "kiwi"]);
    }

    #[test]
    fn test_rank_truncates_and_handles_empty() {
        let tokens = words("alpha beta gamma delta epsilon");
        assert_eq!(rank(&tokens, &StopWords::default(), 2).len(), 2);
        assert!(rank(&tokens, &StopWords::default(), 0).is_empty());
        assert!(rank::<String>(&[], &StopWords::default(), 5).is_empty());
    }

    #[test]
    fn test_short_length_counts_characters() {
        // "né" tem 2 caracteres (3 bytes) e deve ser descartado
        let tokens = words("né né café");
        let ranked = rank(&tokens, &StopWords::default(), 5);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].word, "café");
    }
}

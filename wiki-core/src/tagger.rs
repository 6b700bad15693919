//! # Esquema de Tags BIO e Tipos de Entidade
//!
//! Define o esquema de anotação **BIO** (Beginning-Inside-Outside) utilizado
//! para rotular tokens no reconhecimento de entidades nomeadas.
//!
//! ## Categorias de Entidades
//!
//! Os nomes seguem o esquema OntoNotes, o mesmo usado pelos modelos de NER mais comuns
//! para inglês, para que um reconhecedor externo possa ser trocado pelo embutido sem
//! mudar o contrato de saída.
//!
//! | Tag    | Significado                       | Exemplos                         |
//! |--------|-----------------------------------|----------------------------------|
//! | PERSON | Pessoa                            | Barack Obama, Ada Lovelace       |
//! | NORP   | Nacionalidade, grupo religioso    | American, Christian              |
//! | ORG    | Organização                       | NASA, United Nations             |
//! | GPE    | País, cidade, estado              | United States, New York          |
//! | LOC    | Local não-político                | Europe, Pacific Ocean            |
//! | DATE   | Data ou período                   | January 2015, 1990s              |
//!
//! ## Esquema BIO
//!
//! - `B-TAG`: Begin — primeiro token de uma entidade
//! - `I-TAG`: Inside — tokens subsequentes da mesma entidade
//! - `O`: Outside — não é parte de nenhuma entidade

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// Categorias de entidade reconhecidas pelo reconhecedor embutido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    /// **Pessoa**: "Barack Obama", "Marie Curie".
    Person,
    /// **Nacionalidades e grupos**: "American", "Buddhist".
    Norp,
    /// **Organização**: empresas, agências, instituições. "Google", "NASA".
    Org,
    /// **Entidade geopolítica**: países, cidades, estados. "France", "New York".
    Gpe,
    /// **Localização**: continentes, rios, montanhas. "Europe", "Mount Everest".
    Loc,
    /// **Data**: datas absolutas ou relativas, anos, décadas. "January 2015", "1990s".
    Date,
}

impl EntityCategory {
    /// Nome da categoria como string (para serialização e resposta HTTP)
    pub fn name(&self) -> &'static str {
        match self {
            EntityCategory::Person => "PERSON",
            EntityCategory::Norp => "NORP",
            EntityCategory::Org => "ORG",
            EntityCategory::Gpe => "GPE",
            EntityCategory::Loc => "LOC",
            EntityCategory::Date => "DATE",
        }
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag BIO aplicada a um token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    /// **Begin**: Marca o INÍCIO de uma entidade. Ex: **New** (B-GPE) York.
    Begin(EntityCategory),
    /// **Inside**: Marca a CONTINUAÇÃO de uma entidade. Ex: New **York** (I-GPE).
    Inside(EntityCategory),
    /// **Outside**: O token não faz parte de nenhuma entidade.
    Outside,
}

impl Tag {
    /// Retorna a categoria desta tag (se for B- ou I-)
    pub fn category(&self) -> Option<EntityCategory> {
        match self {
            Tag::Begin(c) | Tag::Inside(c) => Some(*c),
            Tag::Outside => None,
        }
    }
}

/// Um token com sua tag BIO e confiança
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: Token,
    pub tag: Tag,
    /// Confiança desta atribuição (0.0 a 1.0)
    pub confidence: f64,
    /// Regra que atribuiu a tag ("person_gazetteer", "date_pattern"...)
    pub source: String,
}

/// Uma entidade identificada no texto (spans de múltiplos tokens)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Texto da entidade (ex: "New York")
    pub text: String,
    /// Categoria da entidade
    pub category: EntityCategory,
    /// Posição de byte inicial no texto original
    pub start: usize,
    /// Posição de byte final no texto original
    pub end: usize,
    /// Confiança média dos tokens
    pub confidence: f64,
    /// Regra do primeiro token da entidade
    pub source: String,
}

/// Converte uma sequência de tokens classificados (BIO) em spans de entidades.
///
/// Implementa a máquina de estados finita do esquema BIO para reconstruir as entidades completas:
/// - Inicia uma nova entidade ao encontrar `B-XXX`.
/// - Continua a entidade enquanto encontrar `I-XXX` da **mesma** categoria.
/// - Finaliza a entidade ao encontrar `O`, `B-YYY` ou `I-YYY` (de outra categoria).
///
/// Um `I-XXX` órfão (sem `B-XXX` antes) é ignorado.
///
/// # Exemplo
/// `[B-PERSON, I-PERSON, O, B-GPE]` -> `[EntitySpan(PERSON), EntitySpan(GPE)]`
pub fn tokens_to_spans(tagged: &[TaggedToken], original_text: &str) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tagged.len() {
        if let Tag::Begin(cat) = &tagged[i].tag {
            let cat = *cat;
            let start_byte = tagged[i].token.start;
            let mut end_byte = tagged[i].token.end;
            let mut conf_sum = tagged[i].confidence;
            let mut count = 1usize;

            // Acumula tokens I-XXX consecutivos da mesma categoria
            let mut j = i + 1;
            while j < tagged.len() {
                if let Tag::Inside(next_cat) = &tagged[j].tag {
                    if *next_cat == cat {
                        end_byte = tagged[j].token.end;
                        conf_sum += tagged[j].confidence;
                        count += 1;
                        j += 1;
                        continue;
                    }
                }
                break;
            }

            spans.push(EntitySpan {
                text: original_text[start_byte..end_byte].to_string(),
                category: cat,
                start: start_byte,
                end: end_byte,
                confidence: conf_sum / count as f64,
                source: tagged[i].source.clone(),
            });

            i = j;
        } else {
            i += 1;
        }
    }

    spans
}

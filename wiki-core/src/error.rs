//! # Erros do Pipeline de Análise
//!
//! Apenas dois tipos de falha podem sair do núcleo:
//!
//! - **Configuration**: idioma de stop-words desconhecido ou capacidade (modelo)
//!   que não pôde ser inicializada. É fatal na inicialização do processo.
//! - **CapabilityUnavailable**: o classificador de sentimento ou o reconhecedor de
//!   entidades falhou durante uma chamada. A chamada inteira de `analyze_text` falha.
//!
//! Texto vazio ou malformado nunca é erro.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Falha de configuração ou de carregamento de uma capacidade.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Uma capacidade (sentimento, entidades) falhou ao executar.
    #[error("capability '{capability}' unavailable: {message}")]
    CapabilityUnavailable {
        capability: String,
        message: String,
    },
}

impl AnalysisError {
    pub fn configuration(message: impl Into<String>) -> Self {
        AnalysisError::Configuration(message.into())
    }

    pub fn unavailable(capability: impl Into<String>, message: impl Into<String>) -> Self {
        AnalysisError::CapabilityUnavailable {
            capability: capability.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

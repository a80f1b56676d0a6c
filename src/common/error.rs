// src/common/error.rs

use std::collections::HashMap;

use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Nesta camada não existe superfície HTTP própria: quem consome as mensagens
// são o campo `erro` dos stores e o Notificador.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    CredenciaisInvalidas,

    #[error("Sessão não encontrada")]
    SessaoAusente,

    #[error("Registro não encontrado")]
    NaoEncontrado,

    // Rejeição vinda da plataforma hospedada (auth, constraint, RLS...)
    #[error("Erro do backend: {0}")]
    Backend(String),

    #[error("Erro de rede: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Erro de serialização: {0}")]
    Json(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno")]
    Interno(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Erros de validação campo a campo, no formato que as views esperam:
    /// chave do campo -> mensagens de erro.
    pub fn detalhes_validacao(&self) -> Option<HashMap<String, Vec<String>>> {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(details)
            }
            _ => None,
        }
    }
}

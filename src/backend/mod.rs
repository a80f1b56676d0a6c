// src/backend/mod.rs

//! Contrato estreito com a plataforma hospedada: CRUD por tabela mais o
//! sub-API de autenticação. Toda a persistência e toda a autorização moram
//! do lado de lá; aqui só existe o vínculo.
//!
//! - [`BackendClient`] é o trait que os stores consomem
//! - [`HttpBackend`] fala com a API REST real
//! - [`MockBackend`] troca tudo por tabelas em memória e uma credencial fixa
//! - [`BackendSource`] escolhe entre os dois na composição

pub mod http;
pub mod mock;

pub use http::HttpBackend;
pub use mock::MockBackend;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::Sessao};

/// Filtro de igualdade sobre uma coluna (o único operador que a aplicação
/// usa; a plataforma suporta mais, mas o contrato fica estreito de propósito).
#[derive(Debug, Clone)]
pub struct Filtro {
    pub coluna: String,
    pub valor: Value,
}

impl Filtro {
    pub fn eq(coluna: &str, valor: impl Into<Value>) -> Self {
        Self {
            coluna: coluna.to_string(),
            valor: valor.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ordenacao {
    pub coluna: String,
    pub ascendente: bool,
}

impl Ordenacao {
    pub fn asc(coluna: &str) -> Self {
        Self {
            coluna: coluna.to_string(),
            ascendente: true,
        }
    }

    pub fn desc(coluna: &str) -> Self {
        Self {
            coluna: coluna.to_string(),
            ascendente: false,
        }
    }
}

/// Notificação assíncrona de mudança de sessão, emitida pelo backend
/// (login e logout). O store de auth assina isso em `initialize`.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    SignedIn(Sessao),
    SignedOut,
}

#[async_trait]
pub trait BackendClient: Send + Sync {
    // --- Dados (CRUD por tabela) ---

    /// Lê linhas de uma tabela, opcionalmente filtradas e ordenadas.
    async fn select(
        &self,
        tabela: &str,
        filtros: &[Filtro],
        ordem: Option<&Ordenacao>,
    ) -> Result<Vec<Value>, AppError>;

    /// Insere um registro; id e timestamps são atribuídos pelo servidor,
    /// e a linha completa volta na resposta.
    async fn insert(&self, tabela: &str, registro: Value) -> Result<Value, AppError>;

    /// Atualiza por id só os campos presentes em `patch`; devolve a linha
    /// já mesclada pelo servidor.
    async fn update(&self, tabela: &str, id: Uuid, patch: Value) -> Result<Value, AppError>;

    /// Remove a linha de verdade. Exclusão lógica é decisão dos stores,
    /// via `update` de `ativo`.
    async fn delete(&self, tabela: &str, id: Uuid) -> Result<(), AppError>;

    // --- Autenticação ---

    async fn sign_in(&self, email: &str, senha: &str) -> Result<Sessao, AppError>;

    async fn sign_out(&self) -> Result<(), AppError>;

    /// Sessão persistida pela plataforma, se ainda houver uma válida.
    async fn get_session(&self) -> Result<Option<Sessao>, AppError>;

    /// Troca a senha do usuário da sessão vigente.
    async fn update_password(&self, nova_senha: &str) -> Result<(), AppError>;

    /// Remoção administrativa de um usuário da plataforma.
    async fn delete_user(&self, user_id: Uuid) -> Result<(), AppError>;

    /// Assina as notificações de mudança de sessão.
    fn subscribe_auth(&self) -> broadcast::Receiver<AuthEvent>;
}

/// Configuração da fonte de dados: mock em memória ou plataforma real.
#[derive(Debug, Clone)]
pub enum BackendSource {
    /// Tabelas em memória e credencial fixa, para desenvolvimento local.
    Mock,

    /// Plataforma hospedada de verdade.
    Live { url: String, anon_key: String },
}

impl BackendSource {
    /// Constrói a implementação correspondente de [`BackendClient`].
    pub fn into_client(self) -> Arc<dyn BackendClient> {
        match self {
            Self::Mock => Arc::new(MockBackend::new()),
            Self::Live { url, anon_key } => Arc::new(HttpBackend::new(&url, &anon_key)),
        }
    }
}

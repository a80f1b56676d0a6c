// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Identidade de autenticação da plataforma (o "user" do sub-API de auth).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usuario {
    pub id: Uuid,
    pub email: String,
}

// Registro de perfil da aplicação (papel, flags), distinto da identidade
// de autenticação. Vive na tabela `perfis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Perfil {
    pub id: Uuid,
    pub user_id: Uuid,
    pub nome: String,
    pub email: String,
    pub funcao: String,
    pub ativo: bool,
    pub precisa_trocar_senha: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// Sessão autenticada, persistida e restaurada pela própria plataforma.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sessao {
    pub access_token: String,
    pub usuario: Usuario,
}

// Estrutura de dados ("claims") dentro do token de sessão do modo mock.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

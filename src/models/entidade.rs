// src/models/entidade.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Cliente, parceiro ou fornecedor. Os três papéis são flags independentes:
// a mesma entidade pode ser cliente E fornecedora.
// Exclusão é sempre lógica (ativo = false), nunca remove a linha.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entidade {
    pub id: Uuid,
    pub nome: String,

    #[serde(default)]
    pub eh_cliente: bool,
    #[serde(default)]
    pub eh_parceiro: bool,
    #[serde(default)]
    pub eh_fornecedor: bool,

    // CPF/CNPJ
    pub documento: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub endereco: Option<String>,

    pub ativo: bool,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

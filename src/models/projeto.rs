// src/models/projeto.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Enums (conjunto fechado, validado no cliente) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusProjeto {
    Planejamento,
    Aprovado,
    EmAndamento,
    Concluido,
    Cancelado,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projeto {
    pub id: Uuid,
    pub nome: String,
    pub descricao: Option<String>,

    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,

    pub status: StatusProjeto,

    pub orcamento: Option<Decimal>,
    pub responsavel: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

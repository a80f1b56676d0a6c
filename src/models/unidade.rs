// src/models/unidade.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Unidade/espaço locável (salão, pavilhão, arena...).
// Exclusão é lógica, como nas entidades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unidade {
    pub id: Uuid,
    pub nome: String,
    pub descricao: Option<String>,
    pub localizacao: Option<String>,

    // Capacidade de público
    pub capacidade: Option<i32>,

    // Valor base de locação
    pub valor_base: Option<Decimal>,

    // Empresa proprietária do espaço
    pub empresa_id: Option<Uuid>,

    pub ativo: bool,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// src/models/canal.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoCanal {
    Online,
    Fisico,
    Parceiro,
}

// Canal de venda de ingressos (bilheteria). Carrega a flag `ativo`
// padrão, então a exclusão é lógica.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanalVenda {
    pub id: Uuid,
    pub nome: String,

    pub tipo: TipoCanal,

    pub responsavel: Option<String>,
    pub contato: Option<String>,

    // Percentual da taxa de serviço cobrada pelo canal
    pub taxa_servico: Option<Decimal>,

    pub ativo: bool,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

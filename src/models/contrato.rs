// src/models/contrato.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusContrato {
    Rascunho,
    Assinado,
    EmAndamento,
    Concluido,
    Cancelado,
}

// Contrato de evento: amarra projeto, entidade contratante e espaço,
// com os marcos de data e os valores negociados.
// Diferente de entidades/unidades, contrato é removido de verdade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contrato {
    pub id: Uuid,
    pub numero_contrato: String,

    pub nome_evento: String,
    pub tipo_evento: Option<String>,

    // Vínculos
    pub projeto_id: Option<Uuid>,
    pub entidade_id: Option<Uuid>,
    pub unidade_id: Option<Uuid>,
    pub espaco_id: Option<Uuid>,

    // Marcos de data
    pub data_assinatura: Option<NaiveDate>,
    pub data_montagem: Option<NaiveDate>,
    pub data_realizacao: Option<NaiveDate>,
    pub data_desmontagem: Option<NaiveDate>,

    // Valores
    pub valor_locacao: Option<Decimal>,
    pub valor_servicos: Option<Decimal>,
    pub valor_caucao: Option<Decimal>,
    pub valor_total: Option<Decimal>,

    pub status: StatusContrato,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

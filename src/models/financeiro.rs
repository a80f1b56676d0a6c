// src/models/financeiro.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoMovimentacao {
    Receita,
    Despesa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMovimentacao {
    Pendente,
    Pago,
    Atrasado,
    Cancelado,
}

// Movimentação financeira ligada a um projeto. Remoção é física.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovimentacaoFinanceira {
    pub id: Uuid,

    pub projeto_id: Option<Uuid>,

    pub tipo: TipoMovimentacao,
    pub categoria: Option<String>,
    pub descricao: String,

    pub valor: Decimal,

    pub data_vencimento: Option<NaiveDate>,
    pub data_pagamento: Option<NaiveDate>,

    pub status: StatusMovimentacao,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

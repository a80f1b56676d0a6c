// src/forms/financeiro.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    forms::{Formulario, normalizar_opcional},
    models::financeiro::{StatusMovimentacao, TipoMovimentacao},
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MovimentacaoForm {
    pub projeto_id: Option<Uuid>,

    pub tipo: TipoMovimentacao,

    pub categoria: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub descricao: String,

    pub valor: Decimal,

    pub data_vencimento: Option<NaiveDate>,
    pub data_pagamento: Option<NaiveDate>,

    #[serde(default = "status_padrao")]
    pub status: StatusMovimentacao,
}

fn status_padrao() -> StatusMovimentacao {
    StatusMovimentacao::Pendente
}

impl Formulario for MovimentacaoForm {
    fn normalizado(mut self) -> Self {
        self.descricao = self.descricao.trim().to_string();
        self.categoria = normalizar_opcional(self.categoria);
        self
    }
}

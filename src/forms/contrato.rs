// src/forms/contrato.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    forms::{Formulario, normalizar_opcional},
    models::contrato::StatusContrato,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContratoForm {
    #[validate(length(min = 1, message = "required"))]
    pub numero_contrato: String,

    #[validate(length(min = 1, message = "required"))]
    pub nome_evento: String,

    pub tipo_evento: Option<String>,

    pub projeto_id: Option<Uuid>,
    pub entidade_id: Option<Uuid>,
    pub unidade_id: Option<Uuid>,
    pub espaco_id: Option<Uuid>,

    pub data_assinatura: Option<NaiveDate>,
    pub data_montagem: Option<NaiveDate>,
    pub data_realizacao: Option<NaiveDate>,
    pub data_desmontagem: Option<NaiveDate>,

    pub valor_locacao: Option<Decimal>,
    pub valor_servicos: Option<Decimal>,
    pub valor_caucao: Option<Decimal>,
    pub valor_total: Option<Decimal>,

    #[serde(default = "status_padrao")]
    pub status: StatusContrato,
}

fn status_padrao() -> StatusContrato {
    StatusContrato::Rascunho
}

impl Formulario for ContratoForm {
    fn normalizado(mut self) -> Self {
        self.numero_contrato = self.numero_contrato.trim().to_string();
        self.nome_evento = self.nome_evento.trim().to_string();
        self.tipo_evento = normalizar_opcional(self.tipo_evento);
        self
    }
}

// src/forms/projeto.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    forms::{Formulario, normalizar_opcional},
    models::projeto::StatusProjeto,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProjetoForm {
    #[validate(length(min = 1, message = "required"))]
    pub nome: String,

    pub descricao: Option<String>,

    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,

    #[serde(default = "status_padrao")]
    pub status: StatusProjeto,

    pub orcamento: Option<Decimal>,
    pub responsavel: Option<String>,
}

fn status_padrao() -> StatusProjeto {
    StatusProjeto::Planejamento
}

impl Formulario for ProjetoForm {
    fn normalizado(mut self) -> Self {
        self.nome = self.nome.trim().to_string();
        self.descricao = normalizar_opcional(self.descricao);
        self.responsavel = normalizar_opcional(self.responsavel);
        self
    }
}

// src/forms/canal.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    forms::{Formulario, normalizar_opcional},
    models::canal::TipoCanal,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CanalVendaForm {
    #[validate(length(min = 1, message = "required"))]
    pub nome: String,

    pub tipo: TipoCanal,

    pub responsavel: Option<String>,
    pub contato: Option<String>,

    // Percentual cobrado pelo canal sobre cada venda
    pub taxa_servico: Option<Decimal>,

    #[serde(default = "ativo_padrao")]
    pub ativo: bool,
}

fn ativo_padrao() -> bool {
    true
}

impl Formulario for CanalVendaForm {
    fn normalizado(mut self) -> Self {
        self.nome = self.nome.trim().to_string();
        self.responsavel = normalizar_opcional(self.responsavel);
        self.contato = normalizar_opcional(self.contato);
        self
    }
}

// src/forms/unidade.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::forms::{Formulario, normalizar_opcional};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UnidadeForm {
    #[validate(length(min = 1, message = "required"))]
    pub nome: String,

    pub descricao: Option<String>,
    pub localizacao: Option<String>,

    #[validate(range(min = 1, message = "invalid_capacity"))]
    pub capacidade: Option<i32>,

    pub valor_base: Option<Decimal>,
    pub empresa_id: Option<Uuid>,

    #[serde(default = "ativo_padrao")]
    pub ativo: bool,
}

fn ativo_padrao() -> bool {
    true
}

impl Formulario for UnidadeForm {
    fn normalizado(mut self) -> Self {
        self.nome = self.nome.trim().to_string();
        self.descricao = normalizar_opcional(self.descricao);
        self.localizacao = normalizar_opcional(self.localizacao);
        self
    }
}

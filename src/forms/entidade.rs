// src/forms/entidade.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::forms::{Formulario, normalizar_opcional};

// Cadastro/edição de cliente, parceiro ou fornecedor.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EntidadeForm {
    #[validate(length(min = 1, message = "required"))]
    pub nome: String,

    #[serde(default)]
    pub eh_cliente: bool,
    #[serde(default)]
    pub eh_parceiro: bool,
    #[serde(default)]
    pub eh_fornecedor: bool,

    pub documento: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    pub telefone: Option<String>,
    pub endereco: Option<String>,

    #[serde(default = "ativo_padrao")]
    pub ativo: bool,
}

fn ativo_padrao() -> bool {
    true
}

impl Formulario for EntidadeForm {
    fn normalizado(mut self) -> Self {
        self.nome = self.nome.trim().to_string();
        self.documento = normalizar_opcional(self.documento);
        self.email = normalizar_opcional(self.email);
        self.telefone = normalizar_opcional(self.telefone);
        self.endereco = normalizar_opcional(self.endereco);
        self
    }
}

// src/forms/auth.rs

use serde::Deserialize;
use validator::Validate;

use crate::{
    common::{error::AppError, notify::Notificador},
    stores::auth::{AuthStore, Entrada},
};

// Dados para login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha: String,
}

// Dados para a troca de senha (primeiro acesso ou voluntária)
#[derive(Debug, Deserialize, Validate)]
pub struct TrocarSenhaForm {
    #[validate(length(min = 1, message = "required"))]
    pub senha_atual: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha_nova: String,

    pub confirmar_senha: String,
}

impl TrocarSenhaForm {
    // A conferência das duas senhas não é um atributo declarativo: o erro
    // é montado à mão, apontando para o campo de confirmação.
    fn conferir_senhas(&self) -> Result<(), validator::ValidationErrors> {
        if self.senha_nova == self.confirmar_senha {
            return Ok(());
        }

        let mut erros = validator::ValidationErrors::new();
        let mut erro = validator::ValidationError::new("password_mismatch");
        erro.message = Some("As senhas não conferem.".into());
        erros.add("confirmar_senha", erro);
        Err(erros)
    }
}

/// Submete o login. Credencial rejeitada vira toast; o chamador decide o
/// destino (dashboard ou troca de senha) pelo flag em [`Entrada`].
pub async fn entrar(
    auth: &AuthStore,
    notificador: &Notificador,
    form: LoginForm,
) -> Result<Entrada, AppError> {
    form.validate()?;

    match auth.sign_in(form.email.trim(), &form.senha).await {
        Ok(entrada) => {
            notificador.sucesso("Login realizado com sucesso!");
            Ok(entrada)
        }
        Err(e) => {
            notificador.erro(e.to_string());
            Err(e)
        }
    }
}

pub async fn trocar_senha(
    auth: &AuthStore,
    notificador: &Notificador,
    form: TrocarSenhaForm,
) -> Result<(), AppError> {
    form.validate()?;
    form.conferir_senhas()?;

    match auth.change_password(&form.senha_atual, &form.senha_nova).await {
        Ok(()) => {
            notificador.sucesso("Senha alterada com sucesso!");
            Ok(())
        }
        Err(e) => {
            notificador.erro(format!("Erro ao alterar a senha: {}", e));
            Err(e)
        }
    }
}

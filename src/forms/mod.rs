// src/forms/mod.rs

//! Formulários: validação declarativa (`validator`) + exatamente uma
//! mutação de store por submissão. Campo opcional vazio vira `None` antes
//! de ir para o backend; falha de validação vira erro de campo e nunca
//! chega ao store; o desfecho vai para o [`Notificador`].

pub mod auth;
pub mod canal;
pub mod contrato;
pub mod entidade;
pub mod financeiro;
pub mod projeto;
pub mod unidade;

use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, notify::Notificador},
    stores::{Recurso, ResourceStore},
};

/// Payload de formulário pronto para submissão.
pub trait Formulario: Validate + Serialize {
    /// Normaliza o que veio da UI (campos opcionais vazios viram `None`).
    fn normalizado(self) -> Self
    where
        Self: Sized,
    {
        self
    }
}

/// Campo opcional da UI: vazio ou só espaço é ausência de valor.
pub fn normalizar_opcional(campo: Option<String>) -> Option<String> {
    campo.and_then(|valor| {
        let valor = valor.trim().to_string();
        if valor.is_empty() { None } else { Some(valor) }
    })
}

/// Submete um formulário de recurso: cria quando não há registro inicial,
/// atualiza pelo id quando há. `Ok` é o sinal para fechar o diálogo e
/// recarregar a listagem de quem chamou.
pub async fn submeter<T, F>(
    store: &mut ResourceStore<T>,
    notificador: &Notificador,
    registro_inicial: Option<Uuid>,
    form: F,
    rotulo: &str,
) -> Result<T, AppError>
where
    T: Recurso,
    F: Formulario,
{
    let form = form.normalizado();
    form.validate()?;

    let dados = serde_json::to_value(&form)?;
    let resultado = match registro_inicial {
        None => store.create(dados).await,
        Some(id) => store.update(id, dados).await,
    };

    match &resultado {
        Ok(_) => notificador.sucesso(format!("{} salvo com sucesso!", rotulo)),
        Err(e) => notificador.erro(format!("Erro ao salvar {}: {}", rotulo, e)),
    }
    resultado
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::{
        backend::{BackendClient, MockBackend},
        common::notify::Nivel,
        forms::entidade::EntidadeForm,
        stores::EntidadeStore,
    };

    fn mock() -> Arc<MockBackend> {
        Arc::new(MockBackend::com_atraso(Duration::ZERO))
    }

    fn form_valido(nome: &str) -> EntidadeForm {
        EntidadeForm {
            nome: nome.to_string(),
            eh_cliente: true,
            eh_parceiro: false,
            eh_fornecedor: false,
            documento: None,
            email: None,
            telefone: None,
            endereco: None,
            ativo: true,
        }
    }

    #[tokio::test]
    async fn nome_vazio_bloqueia_sem_tocar_no_store() {
        let backend = mock();
        let mut store = EntidadeStore::new(backend.clone());
        let notificador = Notificador::new();

        let erro = submeter(&mut store, &notificador, None, form_valido(""), "Entidade")
            .await
            .unwrap_err();

        // Erro de campo, apontando o campo certo
        let detalhes = erro.detalhes_validacao().unwrap();
        assert!(detalhes.contains_key("nome"));

        // E o store nem soube da tentativa
        assert!(store.itens.is_empty());
        let tabela = backend.select("entidades", &[], None).await.unwrap();
        assert!(tabela.is_empty());
    }

    #[tokio::test]
    async fn opcional_vazio_vira_none_antes_de_enviar() {
        let backend = mock();
        let mut store = EntidadeStore::new(backend.clone());
        let notificador = Notificador::new();

        let mut form = form_valido("Circo Estrela");
        form.email = Some("   ".to_string());
        form.telefone = Some(String::new());

        let criada = submeter(&mut store, &notificador, None, form, "Entidade")
            .await
            .unwrap();

        assert!(criada.email.is_none());
        assert!(criada.telefone.is_none());
    }

    #[tokio::test]
    async fn email_invalido_bloqueia() {
        let mut store = EntidadeStore::new(mock());
        let notificador = Notificador::new();

        let mut form = form_valido("Circo Estrela");
        form.email = Some("nao-eh-email".to_string());

        let erro = submeter(&mut store, &notificador, None, form, "Entidade")
            .await
            .unwrap_err();
        assert!(erro.detalhes_validacao().unwrap().contains_key("email"));
    }

    #[tokio::test]
    async fn com_registro_inicial_a_submissao_atualiza() {
        let mut store = EntidadeStore::new(mock());
        let notificador = Notificador::new();

        let criada = submeter(&mut store, &notificador, None, form_valido("Antigo"), "Entidade")
            .await
            .unwrap();

        let atualizada = submeter(
            &mut store,
            &notificador,
            Some(criada.id),
            form_valido("Novo"),
            "Entidade",
        )
        .await
        .unwrap();

        assert_eq!(atualizada.id, criada.id);
        assert_eq!(atualizada.nome, "Novo");
        assert_eq!(store.itens.len(), 1);
    }

    #[tokio::test]
    async fn sucesso_emite_toast() {
        let mut store = EntidadeStore::new(mock());
        let notificador = Notificador::new();
        let mut toasts = notificador.inscrever();

        submeter(&mut store, &notificador, None, form_valido("Circo"), "Entidade")
            .await
            .unwrap();

        let toast = toasts.try_recv().unwrap();
        assert_eq!(toast.nivel, Nivel::Sucesso);
        assert!(toast.mensagem.contains("Entidade"));
    }
}

// tests/fluxo_mock.rs

//! Fluxo completo da aplicação em MODO_MOCK: subir o estado, inicializar a
//! sessão, passar pela guarda, operar os stores via formulários e sair.

use gestao_chevals::{
    AppConfig, AppState,
    backend::{
        BackendSource,
        mock::{EMAIL_MOCK, SENHA_MOCK},
    },
    forms::{
        self,
        auth::LoginForm,
        entidade::EntidadeForm,
        financeiro::MovimentacaoForm,
    },
    guard::{Decisao, GuardaRota},
    models::financeiro::{StatusMovimentacao, TipoMovimentacao},
};
use rust_decimal::Decimal;

fn estado_mock() -> AppState {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .compact()
        .try_init();

    AppState::new(AppConfig {
        origem: BackendSource::Mock,
    })
}

#[tokio::test]
async fn fluxo_de_login_guarda_e_crud() {
    let mut estado = estado_mock();

    estado.auth.initialize().await;
    let guarda = GuardaRota::new(estado.auth.clone());

    // Sem sessão: rota protegida manda para o login, guardando a origem
    let decisao = guarda.decidir("/contratos").await;
    assert_eq!(
        decisao,
        Decisao::RedirecionarLogin {
            retorno: "/contratos".to_string()
        }
    );

    // Login pela credencial fixa do modo mock
    let entrada = forms::auth::entrar(
        &estado.auth,
        &estado.notificador,
        LoginForm {
            email: EMAIL_MOCK.into(),
            senha: SENHA_MOCK.into(),
        },
    )
    .await
    .unwrap();
    assert!(!entrada.precisa_trocar_senha);

    // Agora a guarda admite
    assert_eq!(guarda.decidir("/contratos").await, Decisao::Permitir);

    // Cadastro de entidade via formulário
    let criada = forms::submeter(
        &mut estado.entidades,
        &estado.notificador,
        None,
        EntidadeForm {
            nome: "Circo Estrela Produções".into(),
            eh_cliente: true,
            eh_parceiro: false,
            eh_fornecedor: false,
            documento: Some("12.345.678/0001-90".into()),
            email: Some("contato@circoestrela.com.br".into()),
            telefone: None,
            endereco: None,
            ativo: true,
        },
        "Entidade",
    )
    .await
    .unwrap();

    estado.entidades.fetch().await.unwrap();
    assert_eq!(estado.entidades.itens.len(), 1);
    assert!(estado.entidades.get_by_id(criada.id).is_some());

    // Exclusão lógica: some da listagem, linha continua existindo
    estado.entidades.delete(criada.id).await.unwrap();
    estado.entidades.fetch().await.unwrap();
    assert!(estado.entidades.itens.is_empty());

    // Movimentação financeira: criada e removida de verdade
    let movimentacao = forms::submeter(
        &mut estado.financeiro,
        &estado.notificador,
        None,
        MovimentacaoForm {
            projeto_id: None,
            tipo: TipoMovimentacao::Receita,
            categoria: Some("Locação".into()),
            descricao: "Sinal do contrato CT-2025-001".into(),
            valor: Decimal::new(1500000, 2),
            data_vencimento: None,
            data_pagamento: None,
            status: StatusMovimentacao::Pendente,
        },
        "Movimentação",
    )
    .await
    .unwrap();

    estado.financeiro.delete(movimentacao.id).await.unwrap();
    estado.financeiro.fetch().await.unwrap();
    assert!(estado.financeiro.itens.is_empty());

    // Logout derruba a guarda de novo
    estado.auth.sign_out().await.unwrap();
    assert!(matches!(
        guarda.decidir("/dashboard").await,
        Decisao::RedirecionarLogin { .. }
    ));
}

#[tokio::test]
async fn credencial_errada_nao_abre_sessao() {
    let estado = estado_mock();
    estado.auth.initialize().await;

    let erro = forms::auth::entrar(
        &estado.auth,
        &estado.notificador,
        LoginForm {
            email: "alguem@gestao-chevals.com".into(),
            senha: "senha-errada".into(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(erro.to_string(), "Credenciais inválidas");
    assert!(estado.auth.usuario().await.is_none());
}

// src/guard.rs

//! Guarda de rota: portão de estado derivado sobre o store de auth.
//! Espera a inicialização terminar, deixa o estado assentar por um
//! instante e então admite ou manda para o login, guardando a rota de
//! origem para voltar depois.

use std::time::Duration;

use crate::stores::auth::AuthStore;

// Pausa curta depois do flag de inicialização virar, para o estado da
// sessão assentar antes da primeira decisão.
const ATRASO_ASSENTAMENTO: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decisao {
    /// Renderiza o conteúdo protegido.
    Permitir,

    /// Sem usuário: vai para o login, voltando para `retorno` depois.
    RedirecionarLogin { retorno: String },
}

pub struct GuardaRota {
    auth: AuthStore,
    atraso: Duration,
}

impl GuardaRota {
    pub fn new(auth: AuthStore) -> Self {
        Self {
            auth,
            atraso: ATRASO_ASSENTAMENTO,
        }
    }

    #[cfg(test)]
    fn com_atraso(auth: AuthStore, atraso: Duration) -> Self {
        Self { auth, atraso }
    }

    /// Decide o destino de uma rota protegida. Só resolve depois de o
    /// store de auth estar inicializado e o atraso de assentamento passar.
    pub async fn decidir(&self, rota: &str) -> Decisao {
        let mut inicializado = self.auth.inscrever_inicializado();
        while !*inicializado.borrow() {
            if inicializado.changed().await.is_err() {
                break;
            }
        }

        tokio::time::sleep(self.atraso).await;

        if self.auth.usuario().await.is_some() {
            Decisao::Permitir
        } else {
            tracing::info!("Rota protegida sem sessão, redirecionando: {}", rota);
            Decisao::RedirecionarLogin {
                retorno: rota.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::{
        MockBackend,
        mock::{EMAIL_MOCK, SENHA_MOCK},
    };

    fn store_mock() -> AuthStore {
        AuthStore::new(Arc::new(MockBackend::com_atraso(Duration::ZERO)))
    }

    fn guarda(auth: AuthStore) -> GuardaRota {
        GuardaRota::com_atraso(auth, Duration::ZERO)
    }

    #[tokio::test]
    async fn anonimo_inicializado_redireciona_preservando_a_rota() {
        let auth = store_mock();
        auth.initialize().await;

        let decisao = guarda(auth).decidir("/contratos").await;

        assert_eq!(
            decisao,
            Decisao::RedirecionarLogin {
                retorno: "/contratos".to_string()
            }
        );
    }

    #[tokio::test]
    async fn autenticado_e_inicializado_permite() {
        let auth = store_mock();
        auth.initialize().await;
        auth.sign_in(EMAIL_MOCK, SENHA_MOCK).await.unwrap();

        assert_eq!(guarda(auth).decidir("/dashboard").await, Decisao::Permitir);
    }

    #[tokio::test]
    async fn decisao_espera_a_inicializacao_terminar() {
        let auth = store_mock();
        let clone = auth.clone();

        // A decisão dispara antes do initialize e precisa esperar por ele
        let pendente = tokio::spawn(async move { guarda(clone).decidir("/unidades").await });
        tokio::task::yield_now().await;

        auth.initialize().await;
        let decisao = pendente.await.unwrap();

        assert!(matches!(decisao, Decisao::RedirecionarLogin { .. }));
    }
}

// src/config.rs

use std::env;

use anyhow::Context;

use crate::{
    backend::BackendSource,
    common::notify::Notificador,
    stores::{
        CanalVendaStore, ContratoStore, EntidadeStore, FinanceiroStore, ProjetoStore,
        UnidadeStore, auth::AuthStore,
    },
};

/// Configuração lida do ambiente. `MODO_MOCK=true` troca a plataforma
/// real pelo backend em memória com a credencial fixa.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub origem: BackendSource,
}

impl AppConfig {
    pub fn carregar() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let modo_mock = env::var("MODO_MOCK")
            .map(|valor| valor == "true" || valor == "1")
            .unwrap_or(false);

        if modo_mock {
            tracing::info!("⚠️ MODO_MOCK ligado: backend em memória com credencial fixa");
            return Ok(Self {
                origem: BackendSource::Mock,
            });
        }

        let url = env::var("BACKEND_URL").context("BACKEND_URL deve ser definida")?;
        let anon_key = env::var("BACKEND_ANON_KEY").context("BACKEND_ANON_KEY deve ser definida")?;

        Ok(Self {
            origem: BackendSource::Live { url, anon_key },
        })
    }
}

/// A raiz de composição: dona de todos os stores, sem singletons.
/// Quem monta a aplicação cria um `AppState` e passa os stores por
/// referência às views.
pub struct AppState {
    pub auth: AuthStore,
    pub entidades: EntidadeStore,
    pub unidades: UnidadeStore,
    pub projetos: ProjetoStore,
    pub contratos: ContratoStore,
    pub financeiro: FinanceiroStore,
    pub canais: CanalVendaStore,
    pub notificador: Notificador,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        // --- Monta o gráfico de dependências ---
        let client = config.origem.into_client();
        tracing::info!("✅ Cliente do backend configurado");

        Self {
            auth: AuthStore::new(client.clone()),
            entidades: EntidadeStore::new(client.clone()),
            unidades: UnidadeStore::new(client.clone()),
            projetos: ProjetoStore::new(client.clone()),
            contratos: ContratoStore::new(client.clone()),
            financeiro: FinanceiroStore::new(client.clone()),
            canais: CanalVendaStore::new(client),
            notificador: Notificador::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modo_mock_dispensa_url_e_chave() {
        // Único teste que mexe em env, para não disputar com os demais
        unsafe {
            env::set_var("MODO_MOCK", "true");
            env::remove_var("BACKEND_URL");
            env::remove_var("BACKEND_ANON_KEY");
        }

        let config = AppConfig::carregar().unwrap();
        assert!(matches!(config.origem, BackendSource::Mock));

        unsafe {
            env::remove_var("MODO_MOCK");
        }
    }

    #[tokio::test]
    async fn app_state_monta_todos_os_stores() {
        let estado = AppState::new(AppConfig {
            origem: BackendSource::Mock,
        });

        assert!(estado.entidades.itens.is_empty());
        assert!(estado.contratos.itens.is_empty());
        assert!(!estado.auth.inicializado());
    }
}

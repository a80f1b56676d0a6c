// src/stores/mod.rs

//! Stores de recurso: o padrão lista-muta-recarrega usado por toda página
//! da aplicação. Cada store guarda a cópia em memória de uma tabela remota
//! (`itens`), um flag de carregamento e um slot de erro, e expõe as cinco
//! operações de sempre. Os seis stores concretos são o mesmo molde
//! ([`ResourceStore`]) estampado com um [`Recurso`] diferente.

pub mod auth;

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::{
    backend::{BackendClient, Filtro, Ordenacao},
    common::error::AppError,
    models::{
        canal::CanalVenda, contrato::Contrato, entidade::Entidade,
        financeiro::MovimentacaoFinanceira, projeto::Projeto, unidade::Unidade,
    },
};

/// O que um registro precisa dizer sobre si para ganhar um store.
pub trait Recurso: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Tabela remota correspondente.
    const TABELA: &'static str;

    /// Exclusão lógica (`ativo = false`) em vez de remover a linha.
    const SOFT_DELETE: bool;

    /// Ordenação padrão da listagem.
    fn ordenacao() -> Ordenacao;

    fn id(&self) -> Uuid;

    /// Filtros aplicados no `fetch`; recursos de exclusão lógica listam
    /// só os ativos.
    fn filtros_busca() -> Vec<Filtro> {
        if Self::SOFT_DELETE {
            vec![Filtro::eq("ativo", true)]
        } else {
            Vec::new()
        }
    }
}

pub struct ResourceStore<T: Recurso> {
    client: Arc<dyn BackendClient>,
    pub itens: Vec<T>,
    pub carregando: bool,
    pub erro: Option<String>,
    mudancas: broadcast::Sender<()>,
}

impl<T: Recurso> ResourceStore<T> {
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        let (mudancas, _) = broadcast::channel(32);
        Self {
            client,
            itens: Vec::new(),
            carregando: false,
            erro: None,
            mudancas,
        }
    }

    /// Recarrega `itens` do backend.
    ///
    /// Chamadas concorrentes não são coalescidas nem canceladas: as duas
    /// escrevem em `carregando`/`itens` e a última resposta a chegar fica.
    pub async fn fetch(&mut self) -> Result<(), AppError> {
        self.carregando = true;
        self.erro = None;

        let resultado = self
            .client
            .select(T::TABELA, &T::filtros_busca(), Some(&T::ordenacao()))
            .await
            .and_then(|linhas| {
                linhas
                    .into_iter()
                    .map(|linha| serde_json::from_value(linha).map_err(AppError::from))
                    .collect::<Result<Vec<T>, _>>()
            });

        self.carregando = false;
        match resultado {
            Ok(itens) => {
                self.itens = itens;
                let _ = self.mudancas.send(());
                Ok(())
            }
            Err(e) => {
                tracing::error!("Falha ao buscar {}: {}", T::TABELA, e);
                self.erro = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Insere no backend e põe o registro devolvido no topo da lista.
    /// Em caso de falha, o erro fica no store E é propagado para o
    /// formulário que chamou.
    pub async fn create(&mut self, registro: Value) -> Result<T, AppError> {
        let resultado = self
            .client
            .insert(T::TABELA, registro)
            .await
            .and_then(|linha| serde_json::from_value::<T>(linha).map_err(AppError::from));

        match resultado {
            Ok(novo) => {
                self.itens.insert(0, novo.clone());
                self.erro = None;
                let _ = self.mudancas.send(());
                Ok(novo)
            }
            Err(e) => {
                self.erro = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Atualiza por id e substitui o registro local pela linha já mesclada
    /// que o servidor devolve.
    pub async fn update(&mut self, id: Uuid, patch: Value) -> Result<T, AppError> {
        let resultado = self
            .client
            .update(T::TABELA, id, patch)
            .await
            .and_then(|linha| serde_json::from_value::<T>(linha).map_err(AppError::from));

        match resultado {
            Ok(atualizado) => {
                if let Some(existente) = self.itens.iter_mut().find(|i| i.id() == id) {
                    *existente = atualizado.clone();
                }
                self.erro = None;
                let _ = self.mudancas.send(());
                Ok(atualizado)
            }
            Err(e) => {
                self.erro = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Remove o registro: de verdade para recursos de exclusão física,
    /// via `ativo = false` para os de exclusão lógica. Nos dois casos o
    /// id some da lista local.
    pub async fn delete(&mut self, id: Uuid) -> Result<(), AppError> {
        let resultado = if T::SOFT_DELETE {
            self.client
                .update(T::TABELA, id, json!({ "ativo": false }))
                .await
                .map(|_| ())
        } else {
            self.client.delete(T::TABELA, id).await
        };

        match resultado {
            Ok(()) => {
                self.itens.retain(|i| i.id() != id);
                self.erro = None;
                let _ = self.mudancas.send(());
                Ok(())
            }
            Err(e) => {
                self.erro = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Busca puramente local, sem ir ao backend.
    pub fn get_by_id(&self, id: Uuid) -> Option<&T> {
        self.itens.iter().find(|i| i.id() == id)
    }

    /// Assina o evento de mudança emitido após cada fetch/mutação bem
    /// sucedidos, o observador explícito no lugar de re-render implícito.
    pub fn inscrever(&self) -> broadcast::Receiver<()> {
        self.mudancas.subscribe()
    }
}

// =============================================================================
//  OS SEIS RECURSOS
// =============================================================================

impl Recurso for Entidade {
    const TABELA: &'static str = "entidades";
    const SOFT_DELETE: bool = true;

    fn ordenacao() -> Ordenacao {
        Ordenacao::asc("nome")
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Recurso for Unidade {
    const TABELA: &'static str = "unidades";
    const SOFT_DELETE: bool = true;

    fn ordenacao() -> Ordenacao {
        Ordenacao::asc("nome")
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Recurso for Projeto {
    const TABELA: &'static str = "projetos";
    const SOFT_DELETE: bool = false;

    fn ordenacao() -> Ordenacao {
        Ordenacao::desc("data_inicio")
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Recurso for Contrato {
    const TABELA: &'static str = "contratos";
    const SOFT_DELETE: bool = false;

    fn ordenacao() -> Ordenacao {
        Ordenacao::desc("created_at")
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Recurso for MovimentacaoFinanceira {
    const TABELA: &'static str = "movimentacoes_financeiras";
    const SOFT_DELETE: bool = false;

    fn ordenacao() -> Ordenacao {
        Ordenacao::asc("data_vencimento")
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Recurso for CanalVenda {
    const TABELA: &'static str = "canais_venda";
    const SOFT_DELETE: bool = true;

    fn ordenacao() -> Ordenacao {
        Ordenacao::asc("nome")
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

pub type EntidadeStore = ResourceStore<Entidade>;
pub type UnidadeStore = ResourceStore<Unidade>;
pub type ProjetoStore = ResourceStore<Projeto>;
pub type ContratoStore = ResourceStore<Contrato>;
pub type FinanceiroStore = ResourceStore<MovimentacaoFinanceira>;
pub type CanalVendaStore = ResourceStore<CanalVenda>;

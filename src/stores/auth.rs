// src/stores/auth.rs

//! Store de autenticação/sessão: `uninitialized → initializing →
//! ready{anônimo | autenticado}`. A sessão em si é da plataforma; aqui
//! vive só a cópia (usuário + perfil) e a assinatura dos eventos que a
//! mantêm em dia.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::{OnceCell, RwLock, broadcast, watch};
use uuid::Uuid;

use crate::{
    backend::{AuthEvent, BackendClient, Filtro},
    common::error::AppError,
    models::auth::{Perfil, Sessao, Usuario},
};

#[derive(Default)]
struct EstadoAuth {
    usuario: Option<Usuario>,
    perfil: Option<Perfil>,
    carregando: bool,
}

/// Resultado de um login bem-sucedido. Primeiro acesso com senha
/// provisória não é falha: vem como sucesso com o flag ligado.
#[derive(Debug, Clone, Copy)]
pub struct Entrada {
    pub precisa_trocar_senha: bool,
}

#[derive(Clone)]
pub struct AuthStore {
    client: Arc<dyn BackendClient>,
    inner: Arc<RwLock<EstadoAuth>>,
    init: Arc<OnceCell<()>>,
    inicializado: Arc<watch::Sender<bool>>,
}

impl AuthStore {
    pub fn new(client: Arc<dyn BackendClient>) -> Self {
        let (inicializado, _) = watch::channel(false);
        Self {
            client,
            inner: Arc::new(RwLock::new(EstadoAuth::default())),
            init: Arc::new(OnceCell::new()),
            inicializado: Arc::new(inicializado),
        }
    }

    /// Restaura a sessão persistida (se houver), assina os eventos de
    /// mudança de sessão e marca o store como inicializado.
    ///
    /// Idempotente: chamadas concorrentes fazem o trabalho uma única vez.
    /// Falha na restauração não impede a inicialização: o app sobe
    /// anônimo e o usuário loga de novo.
    pub async fn initialize(&self) {
        self.init
            .get_or_init(|| async {
                self.inner.write().await.carregando = true;

                match self.client.get_session().await {
                    Ok(Some(sessao)) => {
                        let perfil =
                            match buscar_perfil(self.client.as_ref(), sessao.usuario.id).await {
                                Ok(p) => p,
                                Err(e) => {
                                    tracing::error!("Falha ao carregar perfil: {}", e);
                                    None
                                }
                            };
                        let mut estado = self.inner.write().await;
                        estado.usuario = Some(sessao.usuario);
                        estado.perfil = perfil;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!("Falha ao restaurar sessão: {}", e);
                    }
                }

                self.inner.write().await.carregando = false;

                // Mantém usuário/perfil em sincronia daqui em diante:
                // login e logout chegam como eventos, sem polling.
                let mut eventos = self.client.subscribe_auth();
                let inner = Arc::clone(&self.inner);
                let client = Arc::clone(&self.client);
                tokio::spawn(async move {
                    loop {
                        match eventos.recv().await {
                            Ok(AuthEvent::SignedIn(sessao)) => {
                                aplicar_sessao(&client, &inner, sessao).await;
                            }
                            Ok(AuthEvent::SignedOut) => {
                                let mut estado = inner.write().await;
                                estado.usuario = None;
                                estado.perfil = None;
                            }
                            // Perdemos eventos por atraso do consumidor; a
                            // sessão vigente na plataforma é a verdade.
                            Err(broadcast::error::RecvError::Lagged(perdidos)) => {
                                tracing::warn!(
                                    "{} eventos de sessão perdidos, ressincronizando",
                                    perdidos
                                );
                                match client.get_session().await {
                                    Ok(Some(sessao)) => {
                                        aplicar_sessao(&client, &inner, sessao).await;
                                    }
                                    Ok(None) => {
                                        let mut estado = inner.write().await;
                                        estado.usuario = None;
                                        estado.perfil = None;
                                    }
                                    Err(e) => {
                                        tracing::error!("Falha ao ressincronizar sessão: {}", e);
                                    }
                                }
                            }
                            Err(broadcast::error::RecvError::Closed) => break,
                        }
                    }
                });

                self.inicializado.send_replace(true);
                tracing::info!("✅ Store de autenticação inicializado");
            })
            .await;
    }

    pub async fn sign_in(&self, email: &str, senha: &str) -> Result<Entrada, AppError> {
        let sessao = self.client.sign_in(email, senha).await?;

        let mut perfil = buscar_perfil(self.client.as_ref(), sessao.usuario.id).await?;

        let precisa_trocar_senha = perfil
            .as_ref()
            .map(|p| p.precisa_trocar_senha)
            .unwrap_or(false);

        // Primeiro acesso: o flag é limpo já no servidor e reportado ao
        // chamador, que decide levar o usuário para a troca de senha.
        if precisa_trocar_senha {
            if let Some(p) = perfil.as_mut() {
                let linha = self
                    .client
                    .update("perfis", p.id, json!({ "precisa_trocar_senha": false }))
                    .await?;
                *p = serde_json::from_value(linha)?;
            }
        }

        let mut estado = self.inner.write().await;
        estado.usuario = Some(sessao.usuario);
        estado.perfil = perfil;

        Ok(Entrada {
            precisa_trocar_senha,
        })
    }

    /// Encerra a sessão. A cópia local cai mesmo que o logout remoto
    /// falhe (token já expirado, rede fora): quem pediu para sair, sai.
    pub async fn sign_out(&self) -> Result<(), AppError> {
        let resultado = self.client.sign_out().await;

        let mut estado = self.inner.write().await;
        estado.usuario = None;
        estado.perfil = None;
        drop(estado);

        resultado
    }

    /// Troca a senha do usuário logado. A senha atual não é reencaminhada:
    /// a plataforma valida pela sessão vigente.
    pub async fn change_password(
        &self,
        _senha_atual: &str,
        senha_nova: &str,
    ) -> Result<(), AppError> {
        self.client.update_password(senha_nova).await
    }

    pub async fn usuario(&self) -> Option<Usuario> {
        self.inner.read().await.usuario.clone()
    }

    pub async fn perfil(&self) -> Option<Perfil> {
        self.inner.read().await.perfil.clone()
    }

    pub async fn carregando(&self) -> bool {
        self.inner.read().await.carregando
    }

    pub fn inicializado(&self) -> bool {
        *self.inicializado.borrow()
    }

    /// Receptor do flag de inicialização, para quem precisa esperar por
    /// ele (a guarda de rota).
    pub fn inscrever_inicializado(&self) -> watch::Receiver<bool> {
        self.inicializado.subscribe()
    }
}

// Sessão aberta (por evento ou ressincronização): carrega o perfil e
// atualiza o estado compartilhado.
async fn aplicar_sessao(
    client: &Arc<dyn BackendClient>,
    inner: &Arc<RwLock<EstadoAuth>>,
    sessao: Sessao,
) {
    let perfil = buscar_perfil(client.as_ref(), sessao.usuario.id)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Falha ao carregar perfil: {}", e);
            None
        });
    let mut estado = inner.write().await;
    estado.usuario = Some(sessao.usuario);
    if perfil.is_some() {
        estado.perfil = perfil;
    }
}

async fn buscar_perfil(
    client: &dyn BackendClient,
    user_id: Uuid,
) -> Result<Option<Perfil>, AppError> {
    let linhas = client
        .select("perfis", &[Filtro::eq("user_id", json!(user_id))], None)
        .await?;

    match linhas.into_iter().next() {
        Some(linha) => Ok(Some(serde_json::from_value(linha)?)),
        None => Ok(None),
    }
}

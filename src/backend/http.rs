// src/backend/http.rs

//! Cliente da plataforma hospedada de verdade. O dialeto é o da API REST
//! dela: filtros `coluna=eq.valor`, `order=coluna.asc`, mutações com
//! `Prefer: return=representation` e o sub-API de auth por baixo de
//! `/auth/v1`. Sem retry, sem paginação, sem timeout além do padrão do
//! cliente HTTP: falha vira mensagem para o usuário e pronto.

use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::{
    backend::{AuthEvent, BackendClient, Filtro, Ordenacao},
    common::error::AppError,
    models::auth::{Sessao, Usuario},
};

pub struct HttpBackend {
    url: String,
    anon_key: String,
    http: ReqwestClient,
    // A persistência da sessão entre processos é da plataforma; aqui ela
    // vive só enquanto o processo viver.
    sessao: RwLock<Option<Sessao>>,
    auth_tx: broadcast::Sender<AuthEvent>,
}

// Resposta do endpoint de token (grant_type=password)
#[derive(Debug, Deserialize)]
struct RespostaToken {
    access_token: String,
    user: UsuarioRemoto,
}

#[derive(Debug, Deserialize)]
struct UsuarioRemoto {
    id: Uuid,
    email: String,
}

impl HttpBackend {
    pub fn new(url: &str, anon_key: &str) -> Self {
        let (auth_tx, _) = broadcast::channel(16);
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            http: ReqwestClient::new(),
            sessao: RwLock::new(None),
            auth_tx,
        }
    }

    fn url_tabela(&self, tabela: &str) -> String {
        format!("{}/rest/v1/{}", self.url, tabela)
    }

    fn url_auth(&self, caminho: &str) -> String {
        format!("{}/auth/v1/{}", self.url, caminho)
    }

    // A chave pública vai sempre; o Bearer é o token da sessão quando há
    // uma, senão a própria chave (comportamento padrão da plataforma).
    fn autenticar(&self, req: RequestBuilder) -> RequestBuilder {
        let token = self
            .sessao
            .read()
            .unwrap()
            .as_ref()
            .map(|s| s.access_token.clone())
            .unwrap_or_else(|| self.anon_key.clone());

        req.header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    async fn conferir(&self, resposta: Response) -> Result<Response, AppError> {
        let status = resposta.status();
        if status.is_success() {
            return Ok(resposta);
        }

        let corpo = resposta.text().await.unwrap_or_default();
        let mensagem = serde_json::from_str::<Value>(&corpo)
            .ok()
            .and_then(|v| {
                ["message", "msg", "error_description", "error"]
                    .iter()
                    .find_map(|chave| v.get(chave).and_then(|m| m.as_str().map(str::to_string)))
            })
            .unwrap_or(corpo);

        tracing::error!("Backend respondeu {}: {}", status, mensagem);
        Err(AppError::Backend(format!("{}: {}", status, mensagem)))
    }

    fn valor_de_filtro(valor: &Value) -> String {
        match valor {
            Value::String(s) => s.clone(),
            outro => outro.to_string(),
        }
    }
}

#[async_trait]
impl BackendClient for HttpBackend {
    async fn select(
        &self,
        tabela: &str,
        filtros: &[Filtro],
        ordem: Option<&Ordenacao>,
    ) -> Result<Vec<Value>, AppError> {
        let mut query: Vec<(String, String)> = vec![("select".into(), "*".into())];
        for filtro in filtros {
            query.push((
                filtro.coluna.clone(),
                format!("eq.{}", Self::valor_de_filtro(&filtro.valor)),
            ));
        }
        if let Some(ordem) = ordem {
            let direcao = if ordem.ascendente { "asc" } else { "desc" };
            query.push(("order".into(), format!("{}.{}", ordem.coluna, direcao)));
        }

        let resposta = self
            .autenticar(self.http.get(self.url_tabela(tabela)).query(&query))
            .send()
            .await?;
        let resposta = self.conferir(resposta).await?;

        Ok(resposta.json::<Vec<Value>>().await?)
    }

    async fn insert(&self, tabela: &str, registro: Value) -> Result<Value, AppError> {
        let resposta = self
            .autenticar(self.http.post(self.url_tabela(tabela)))
            .header("Prefer", "return=representation")
            .json(&registro)
            .send()
            .await?;
        let resposta = self.conferir(resposta).await?;

        let mut linhas = resposta.json::<Vec<Value>>().await?;
        if linhas.is_empty() {
            return Err(AppError::Backend(
                "Insert não devolveu a linha criada".into(),
            ));
        }
        Ok(linhas.remove(0))
    }

    async fn update(&self, tabela: &str, id: Uuid, patch: Value) -> Result<Value, AppError> {
        let resposta = self
            .autenticar(
                self.http
                    .patch(self.url_tabela(tabela))
                    .query(&[("id", format!("eq.{}", id))]),
            )
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await?;
        let resposta = self.conferir(resposta).await?;

        let mut linhas = resposta.json::<Vec<Value>>().await?;
        if linhas.is_empty() {
            return Err(AppError::NaoEncontrado);
        }
        Ok(linhas.remove(0))
    }

    async fn delete(&self, tabela: &str, id: Uuid) -> Result<(), AppError> {
        let resposta = self
            .autenticar(
                self.http
                    .delete(self.url_tabela(tabela))
                    .query(&[("id", format!("eq.{}", id))]),
            )
            .send()
            .await?;
        self.conferir(resposta).await?;
        Ok(())
    }

    async fn sign_in(&self, email: &str, senha: &str) -> Result<Sessao, AppError> {
        let resposta = self
            .http
            .post(self.url_auth("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": senha }))
            .send()
            .await?;

        // Credencial rejeitada não é "erro do backend", é resposta esperada
        let status = resposta.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(AppError::CredenciaisInvalidas);
        }
        let resposta = self.conferir(resposta).await?;

        let token = resposta.json::<RespostaToken>().await?;
        let sessao = Sessao {
            access_token: token.access_token,
            usuario: Usuario {
                id: token.user.id,
                email: token.user.email,
            },
        };

        *self.sessao.write().unwrap() = Some(sessao.clone());
        let _ = self.auth_tx.send(AuthEvent::SignedIn(sessao.clone()));

        tracing::info!("✅ Sessão aberta para {}", email);
        Ok(sessao)
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        let resultado = self
            .autenticar(self.http.post(self.url_auth("logout")))
            .send()
            .await;

        // A sessão em memória cai mesmo com o logout remoto rejeitado
        // (token já expirado devolve 401): a intenção de sair prevalece.
        *self.sessao.write().unwrap() = None;
        let _ = self.auth_tx.send(AuthEvent::SignedOut);

        self.conferir(resultado?).await?;
        Ok(())
    }

    async fn get_session(&self) -> Result<Option<Sessao>, AppError> {
        Ok(self.sessao.read().unwrap().clone())
    }

    async fn update_password(&self, nova_senha: &str) -> Result<(), AppError> {
        if self.sessao.read().unwrap().is_none() {
            return Err(AppError::SessaoAusente);
        }

        let resposta = self
            .autenticar(self.http.put(self.url_auth("user")))
            .json(&json!({ "password": nova_senha }))
            .send()
            .await?;
        self.conferir(resposta).await?;
        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), AppError> {
        let resposta = self
            .autenticar(
                self.http
                    .delete(self.url_auth(&format!("admin/users/{}", user_id))),
            )
            .send()
            .await?;
        self.conferir(resposta).await?;
        Ok(())
    }

    fn subscribe_auth(&self) -> broadcast::Receiver<AuthEvent> {
        self.auth_tx.subscribe()
    }
}

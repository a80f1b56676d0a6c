// src/backend/mock.rs

//! Backend mock para desenvolvimento local e testes: tabelas em memória,
//! uma única credencial fixa e sessões com JWT de verdade, sem rede.

use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::{Value, json};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::{
    backend::{AuthEvent, BackendClient, Filtro, Ordenacao},
    common::error::AppError,
    models::auth::{Claims, Sessao, Usuario},
};

/// Credencial fixa do modo mock.
pub const EMAIL_MOCK: &str = "admin@gestao-chevals.com";
pub const SENHA_MOCK: &str = "123456";

// Custo baixo de bcrypt: o hash do mock só existe para manter o mesmo
// caminho de verificação do backend real, não para resistir a ataque.
const CUSTO_BCRYPT_MOCK: u32 = 4;

pub struct MockBackend {
    tabelas: RwLock<HashMap<String, Vec<Value>>>,
    sessao: RwLock<Option<Sessao>>,
    senha_hash: RwLock<String>,
    admin_id: Uuid,
    jwt_secret: String,
    auth_tx: broadcast::Sender<AuthEvent>,
    // Latência simulada do sign-in, para a UI se comportar como no real
    atraso: Duration,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::com_atraso(Duration::from_millis(50))
    }

    pub fn com_atraso(atraso: Duration) -> Self {
        let (auth_tx, _) = broadcast::channel(16);
        let admin_id = Uuid::new_v4();

        // Só falha com custo fora da faixa do bcrypt; nesse caso o modo
        // mock inteiro é inviável e o processo deve cair na hora.
        let senha_hash = hash(SENHA_MOCK, CUSTO_BCRYPT_MOCK)
            .expect("bcrypt não conseguiu gerar o hash da credencial mock");

        let backend = Self {
            tabelas: RwLock::new(HashMap::new()),
            sessao: RwLock::new(None),
            senha_hash: RwLock::new(senha_hash),
            admin_id,
            jwt_secret: "segredo-mock-gestao-chevals".to_string(),
            auth_tx,
            atraso,
        };

        // Perfil do administrador, espelhando o que o seed do projeto cria
        backend.semear(
            "perfis",
            vec![json!({
                "id": Uuid::new_v4(),
                "user_id": admin_id,
                "nome": "Administrador",
                "email": EMAIL_MOCK,
                "funcao": "admin",
                "ativo": true,
                "precisa_trocar_senha": false,
                "created_at": Utc::now().to_rfc3339(),
                "updated_at": Utc::now().to_rfc3339(),
            })],
        );

        backend
    }

    pub fn admin_id(&self) -> Uuid {
        self.admin_id
    }

    /// Pré-popula uma tabela (dados de demonstração, fixtures de teste).
    pub fn semear(&self, tabela: &str, linhas: Vec<Value>) {
        let mut tabelas = self.tabelas.write().unwrap();
        tabelas.entry(tabela.to_string()).or_default().extend(linhas);
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    fn token_valido(&self, token: &str) -> bool {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .is_ok()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

// Comparação tolerante para a ordenação: números como números, o resto
// pela forma textual.
fn comparar_valores(a: &Value, b: &Value) -> CmpOrdering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(CmpOrdering::Equal),
        _ => {
            let xa = a.as_str().map(str::to_string).unwrap_or_else(|| a.to_string());
            let xb = b.as_str().map(str::to_string).unwrap_or_else(|| b.to_string());
            xa.cmp(&xb)
        }
    }
}

#[async_trait]
impl BackendClient for MockBackend {
    async fn select(
        &self,
        tabela: &str,
        filtros: &[Filtro],
        ordem: Option<&Ordenacao>,
    ) -> Result<Vec<Value>, AppError> {
        let tabelas = self.tabelas.read().unwrap();
        let mut linhas: Vec<Value> = tabelas
            .get(tabela)
            .map(|linhas| {
                linhas
                    .iter()
                    .filter(|linha| {
                        filtros
                            .iter()
                            .all(|f| linha.get(&f.coluna) == Some(&f.valor))
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(ordem) = ordem {
            linhas.sort_by(|a, b| {
                let cmp = comparar_valores(
                    a.get(&ordem.coluna).unwrap_or(&Value::Null),
                    b.get(&ordem.coluna).unwrap_or(&Value::Null),
                );
                if ordem.ascendente { cmp } else { cmp.reverse() }
            });
        }

        Ok(linhas)
    }

    async fn insert(&self, tabela: &str, registro: Value) -> Result<Value, AppError> {
        let mut linha = registro;
        let obj = linha
            .as_object_mut()
            .ok_or_else(|| AppError::Backend("O registro precisa ser um objeto JSON".into()))?;

        // Identidade e timestamps são sempre do servidor, nunca do cliente
        obj.insert("id".into(), json!(Uuid::new_v4()));
        obj.insert("created_at".into(), json!(Utc::now().to_rfc3339()));
        obj.insert("updated_at".into(), json!(Utc::now().to_rfc3339()));

        let mut tabelas = self.tabelas.write().unwrap();
        tabelas
            .entry(tabela.to_string())
            .or_default()
            .push(linha.clone());

        Ok(linha)
    }

    async fn update(&self, tabela: &str, id: Uuid, patch: Value) -> Result<Value, AppError> {
        let campos = patch
            .as_object()
            .ok_or_else(|| AppError::Backend("O patch precisa ser um objeto JSON".into()))?
            .clone();

        let id_json = json!(id);
        let mut tabelas = self.tabelas.write().unwrap();
        let linhas = tabelas.get_mut(tabela).ok_or(AppError::NaoEncontrado)?;

        let linha = linhas
            .iter_mut()
            .find(|linha| linha.get("id") == Some(&id_json))
            .ok_or(AppError::NaoEncontrado)?;

        let obj = linha
            .as_object_mut()
            .ok_or_else(|| AppError::Backend("Linha corrompida na tabela mock".into()))?;

        // Mescla somente o que veio no patch
        for (chave, valor) in campos {
            obj.insert(chave, valor);
        }
        obj.insert("updated_at".into(), json!(Utc::now().to_rfc3339()));

        Ok(linha.clone())
    }

    async fn delete(&self, tabela: &str, id: Uuid) -> Result<(), AppError> {
        let id_json = json!(id);
        let mut tabelas = self.tabelas.write().unwrap();
        let linhas = tabelas.get_mut(tabela).ok_or(AppError::NaoEncontrado)?;

        let antes = linhas.len();
        linhas.retain(|linha| linha.get("id") != Some(&id_json));

        if linhas.len() == antes {
            return Err(AppError::NaoEncontrado);
        }
        Ok(())
    }

    async fn sign_in(&self, email: &str, senha: &str) -> Result<Sessao, AppError> {
        tokio::time::sleep(self.atraso).await;

        if email != EMAIL_MOCK {
            return Err(AppError::CredenciaisInvalidas);
        }

        let senha_clone = senha.to_owned();
        let hash_clone = self.senha_hash.read().unwrap().clone();

        // Executa a verificação em um thread separado
        let senha_confere = tokio::task::spawn_blocking(move || {
            verify(&senha_clone, &hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !senha_confere {
            return Err(AppError::CredenciaisInvalidas);
        }

        let sessao = Sessao {
            access_token: self.create_token(self.admin_id)?,
            usuario: Usuario {
                id: self.admin_id,
                email: email.to_string(),
            },
        };

        *self.sessao.write().unwrap() = Some(sessao.clone());
        let _ = self.auth_tx.send(AuthEvent::SignedIn(sessao.clone()));

        tracing::info!("✅ [mock] Sessão aberta para {}", email);
        Ok(sessao)
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        *self.sessao.write().unwrap() = None;
        let _ = self.auth_tx.send(AuthEvent::SignedOut);
        tracing::info!("[mock] Sessão encerrada");
        Ok(())
    }

    async fn get_session(&self) -> Result<Option<Sessao>, AppError> {
        let sessao = self.sessao.read().unwrap().clone();
        match sessao {
            Some(s) if self.token_valido(&s.access_token) => Ok(Some(s)),
            Some(_) => {
                // Token expirado: a "persistência" da plataforma descarta
                *self.sessao.write().unwrap() = None;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn update_password(&self, nova_senha: &str) -> Result<(), AppError> {
        if self.sessao.read().unwrap().is_none() {
            return Err(AppError::SessaoAusente);
        }

        let senha_clone = nova_senha.to_owned();
        let novo_hash = tokio::task::spawn_blocking(move || {
            hash(&senha_clone, CUSTO_BCRYPT_MOCK)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        *self.senha_hash.write().unwrap() = novo_hash;
        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), AppError> {
        let user_json = json!(user_id);
        {
            let mut tabelas = self.tabelas.write().unwrap();
            if let Some(perfis) = tabelas.get_mut("perfis") {
                perfis.retain(|linha| linha.get("user_id") != Some(&user_json));
            }
        }

        let sessao_do_usuario = self
            .sessao
            .read()
            .unwrap()
            .as_ref()
            .map(|s| s.usuario.id == user_id)
            .unwrap_or(false);

        if sessao_do_usuario {
            self.sign_out().await?;
        }
        Ok(())
    }

    fn subscribe_auth(&self) -> broadcast::Receiver<AuthEvent> {
        self.auth_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn mock_rapido() -> MockBackend {
        MockBackend::com_atraso(Duration::ZERO)
    }

    #[tokio::test]
    async fn insert_atribui_id_e_timestamps() {
        let backend = mock_rapido();

        let linha = backend
            .insert("entidades", json!({"nome": "Circo Estrela", "ativo": true}))
            .await
            .unwrap();

        assert!(linha.get("id").and_then(|v| v.as_str()).is_some());
        assert!(linha.get("created_at").is_some());
        assert!(linha.get("updated_at").is_some());
        assert_eq!(linha["nome"], "Circo Estrela");
    }

    #[tokio::test]
    async fn select_filtra_e_ordena() {
        let backend = mock_rapido();
        backend
            .insert("entidades", json!({"nome": "Bravo", "ativo": true}))
            .await
            .unwrap();
        backend
            .insert("entidades", json!({"nome": "Alfa", "ativo": true}))
            .await
            .unwrap();
        backend
            .insert("entidades", json!({"nome": "Inativa", "ativo": false}))
            .await
            .unwrap();

        let linhas = backend
            .select(
                "entidades",
                &[Filtro::eq("ativo", true)],
                Some(&Ordenacao::asc("nome")),
            )
            .await
            .unwrap();

        let nomes: Vec<_> = linhas.iter().map(|l| l["nome"].as_str().unwrap()).collect();
        assert_eq!(nomes, vec!["Alfa", "Bravo"]);
    }

    #[tokio::test]
    async fn select_de_tabela_vazia_devolve_lista_vazia() {
        let backend = mock_rapido();
        let linhas = backend.select("inexistente", &[], None).await.unwrap();
        assert!(linhas.is_empty());
    }

    #[tokio::test]
    async fn update_mescla_somente_o_patch() {
        let backend = mock_rapido();
        let linha = backend
            .insert(
                "unidades",
                json!({"nome": "Pavilhão A", "capacidade": 500, "ativo": true}),
            )
            .await
            .unwrap();
        let id = Uuid::parse_str(linha["id"].as_str().unwrap()).unwrap();

        let atualizada = backend
            .update("unidades", id, json!({"capacidade": 800}))
            .await
            .unwrap();

        assert_eq!(atualizada["capacidade"], 800);
        // Campos fora do patch continuam intactos
        assert_eq!(atualizada["nome"], "Pavilhão A");
        assert_eq!(atualizada["ativo"], true);
    }

    #[tokio::test]
    async fn update_de_id_inexistente_falha() {
        let backend = mock_rapido();
        backend
            .insert("unidades", json!({"nome": "Pavilhão A"}))
            .await
            .unwrap();

        let resultado = backend
            .update("unidades", Uuid::new_v4(), json!({"nome": "Outro"}))
            .await;
        assert!(matches!(resultado, Err(AppError::NaoEncontrado)));
    }

    #[tokio::test]
    async fn delete_remove_a_linha() {
        let backend = mock_rapido();
        let linha = backend
            .insert("contratos", json!({"numero_contrato": "CT-001"}))
            .await
            .unwrap();
        let id = Uuid::parse_str(linha["id"].as_str().unwrap()).unwrap();

        backend.delete("contratos", id).await.unwrap();

        let restantes = backend.select("contratos", &[], None).await.unwrap();
        assert!(restantes.is_empty());
    }

    #[tokio::test]
    async fn sign_in_com_credencial_fixa_abre_sessao() {
        let backend = mock_rapido();

        let sessao = backend.sign_in(EMAIL_MOCK, SENHA_MOCK).await.unwrap();
        assert_eq!(sessao.usuario.email, EMAIL_MOCK);
        assert!(!sessao.access_token.is_empty());

        let persistida = backend.get_session().await.unwrap();
        assert!(persistida.is_some());
    }

    #[tokio::test]
    async fn sign_in_com_senha_errada_falha() {
        let backend = mock_rapido();

        let resultado = backend.sign_in(EMAIL_MOCK, "senha-errada").await;
        assert!(matches!(resultado, Err(AppError::CredenciaisInvalidas)));
        assert!(backend.get_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sign_out_emite_evento_e_limpa_sessao() {
        let backend = mock_rapido();
        let mut eventos = backend.subscribe_auth();

        backend.sign_in(EMAIL_MOCK, SENHA_MOCK).await.unwrap();
        backend.sign_out().await.unwrap();

        assert!(matches!(eventos.recv().await, Ok(AuthEvent::SignedIn(_))));
        assert!(matches!(eventos.recv().await, Ok(AuthEvent::SignedOut)));
        assert!(backend.get_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_password_passa_a_valer_no_proximo_login() {
        let backend = mock_rapido();
        backend.sign_in(EMAIL_MOCK, SENHA_MOCK).await.unwrap();

        backend.update_password("nova-senha-123").await.unwrap();
        backend.sign_out().await.unwrap();

        assert!(matches!(
            backend.sign_in(EMAIL_MOCK, SENHA_MOCK).await,
            Err(AppError::CredenciaisInvalidas)
        ));
        assert!(backend.sign_in(EMAIL_MOCK, "nova-senha-123").await.is_ok());
    }

    #[tokio::test]
    async fn update_password_sem_sessao_falha() {
        let backend = mock_rapido();
        let resultado = backend.update_password("qualquer").await;
        assert!(matches!(resultado, Err(AppError::SessaoAusente)));
    }

    #[tokio::test]
    async fn delete_user_remove_perfil_e_encerra_sessao() {
        let backend = mock_rapido();
        backend.sign_in(EMAIL_MOCK, SENHA_MOCK).await.unwrap();

        backend.delete_user(backend.admin_id()).await.unwrap();

        let perfis = backend.select("perfis", &[], None).await.unwrap();
        assert!(perfis.is_empty());
        assert!(backend.get_session().await.unwrap().is_none());
    }
}

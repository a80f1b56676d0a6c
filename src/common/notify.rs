// src/common/notify.rs

use tokio::sync::broadcast;

/// Nível visual da notificação transitória ("toast").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nivel {
    Sucesso,
    Erro,
}

#[derive(Debug, Clone)]
pub struct Notificacao {
    pub nivel: Nivel,
    pub mensagem: String,
}

/// Canal de notificações transitórias: os formulários emitem, as views
/// assinam. Sem assinante a mensagem é simplesmente descartada.
#[derive(Clone)]
pub struct Notificador {
    tx: broadcast::Sender<Notificacao>,
}

impl Notificador {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(32);
        Self { tx }
    }

    pub fn sucesso(&self, mensagem: impl Into<String>) {
        self.emitir(Nivel::Sucesso, mensagem.into());
    }

    pub fn erro(&self, mensagem: impl Into<String>) {
        self.emitir(Nivel::Erro, mensagem.into());
    }

    pub fn inscrever(&self) -> broadcast::Receiver<Notificacao> {
        self.tx.subscribe()
    }

    fn emitir(&self, nivel: Nivel, mensagem: String) {
        match nivel {
            Nivel::Sucesso => tracing::info!("🔔 {}", mensagem),
            Nivel::Erro => tracing::error!("🔔 {}", mensagem),
        }
        let _ = self.tx.send(Notificacao { nivel, mensagem });
    }
}

impl Default for Notificador {
    fn default() -> Self {
        Self::new()
    }
}

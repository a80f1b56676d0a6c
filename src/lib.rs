// src/lib.rs

//! Camada de estado da Gestão Chevals: modelos tipados, stores por recurso,
//! store de autenticação/sessão, guarda de rota e formulários validados,
//! tudo por cima de um contrato estreito com o backend hospedado
//! ([`backend::BackendClient`]).
//!
//! A composição acontece em [`config::AppState`]: nada de singletons, quem
//! monta a aplicação é dono dos stores e os passa por referência às views.

pub mod backend;
pub mod common;
pub mod config;
pub mod forms;
pub mod guard;
pub mod models;
pub mod stores;

pub use common::error::AppError;
pub use config::{AppConfig, AppState};

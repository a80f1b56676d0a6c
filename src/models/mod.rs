// src/models/mod.rs

pub mod auth;
pub mod canal;
pub mod contrato;
pub mod entidade;
pub mod financeiro;
pub mod projeto;
pub mod unidade;

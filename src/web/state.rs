//! # Estado da Aplicação Web
//!
//! A KB é lida por todas as consultas e trocada inteira por `/api/reload`:
//!
//! ```text
//! GET / · POST /infer · /api/*  ──read()──▶  Arc<RwLock<KnowledgeBase>>
//! POST /api/reload              ──write()─▶  (substitui a KB inteira)
//! ```
//!
//! Uma consulta nunca vê uma KB pela metade: a nova é construída e
//! validada fora do lock e só depois instalada.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::Config;
use crate::core::KnowledgeBase;

/// Estado compartilhado da aplicação Axum.
#[derive(Clone)]
pub struct AppState {
    /// Base de conhecimento, protegida por `RwLock`.
    pub kb: Arc<RwLock<KnowledgeBase>>,
    /// Caminhos dos arquivos, usados para recarregar a KB.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(kb: KnowledgeBase, config: Config) -> Self {
        Self {
            kb: Arc::new(RwLock::new(kb)),
            config: Arc::new(config),
        }
    }
}

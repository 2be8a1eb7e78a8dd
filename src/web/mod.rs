//! # Módulo Web — A Interface do Sistema de Produção
//!
//! Camada web construída com **Axum** + **Maud**.
//!
//! ## Arquitetura Web
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Browser (formulário HTML, sem JavaScript)               │
//! ├─────────────────────────────────────────────────────────┤
//! │ Axum Router (este módulo)                               │
//! │  ├── GET  /              → formulário vazio             │
//! │  ├── POST /infer         → formulário + resultado       │
//! │  ├── GET  /api/kb        → JSON: itens e receitas       │
//! │  ├── POST /api/forward   → JSON: Outcome                │
//! │  ├── POST /api/backward  → JSON: Outcome                │
//! │  └── POST /api/reload    → relê os arquivos de dados    │
//! ├─────────────────────────────────────────────────────────┤
//! │ Static Assets (tower_http::ServeDir → /assets/)         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Submódulos
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`state`] | Estado compartilhado (`AppState`) |
//! | [`handlers`] | Handlers Axum para cada rota |
//! | [`templates`] | Templates Maud (HTML server-side) |

pub mod handlers;
pub mod state;
pub mod templates;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

use state::AppState;

/// Cria o router Axum com todas as rotas da aplicação.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // ── Páginas HTML ──────────────────────────────────────
        .route("/", get(handlers::index))
        .route("/infer", post(handlers::infer))
        // ── API JSON ──────────────────────────────────────────
        .route("/api/kb", get(handlers::kb_summary))
        .route("/api/forward", post(handlers::api_forward))
        .route("/api/backward", post(handlers::api_backward))
        .route("/api/reload", post(handlers::reload))
        // ── Arquivos estáticos ────────────────────────────────
        .nest_service("/assets", ServeDir::new("assets"))
        .with_state(state)
}

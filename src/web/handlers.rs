//! # Handlers HTTP — Os Endpoints da Aplicação
//!
//! Cada função pública neste módulo é um handler Axum, mapeado a uma
//! rota em [`super::create_router()`].
//!
//! ## Padrão de Resposta
//!
//! | Handler | Método | Retorno | Uso |
//! |---------|--------|---------|-----|
//! | `index` | GET | HTML completo | Formulário vazio |
//! | `infer` | POST | HTML completo | Formulário + resultado |
//! | `kb_summary` | GET | JSON | Itens e receitas da KB |
//! | `api_forward` | POST | JSON | Encadeamento para frente |
//! | `api_backward` | POST | JSON | Encadeamento para trás |
//! | `reload` | POST | JSON | Relê os arquivos de dados |
//!
//! Erros do motor viram `400` na API JSON e um aviso no painel da página.

use std::collections::{HashMap, HashSet};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use super::state::AppState;
use super::templates::{self, Panel, Selection};
use crate::core::{EngineError, Fact, FactId, KnowledgeBase, Rule};
use crate::loader;
use crate::orchestrator::{Mode, Orchestrator, Outcome, Query};

/// Prefixo dos checkboxes de inventário no formulário (`have:f1=on`).
const HAVE_PREFIX: &str = "have:";

/// Corpo das rotas `/api/forward` e `/api/backward`.
#[derive(Debug, Deserialize)]
pub struct InferRequest {
    #[serde(default)]
    pub given: Vec<FactId>,
    #[serde(default)]
    pub target: Option<FactId>,
}

/// Erro devolvido pela API JSON.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

// ─── Tipos para o endpoint /api/kb ───────────────────────────────

/// Conteúdo da KB, na ordem de exibição.
#[derive(Serialize)]
pub struct KbSummary<'a> {
    pub facts: Vec<&'a Fact>,
    pub rules: Vec<&'a Rule>,
    /// Descrições repetidas entre ids diferentes.
    pub duplicates: Vec<(String, Vec<FactId>)>,
}

/// Resposta do `/api/reload`.
#[derive(Serialize)]
pub struct ReloadResponse {
    pub facts: usize,
    pub rules: usize,
}

/// Converte Markup do Maud para resposta HTML do Axum.
fn markup_to_html(m: maud::Markup) -> Html<String> {
    Html(m.into_string())
}

/// GET / — Página inicial, nada selecionado.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let kb = state.kb.read();
    markup_to_html(templates::full_page(&kb, &Selection::default(), Panel::Empty))
}

/// POST /infer — Roda a consulta do formulário e devolve a página inteira.
pub async fn infer(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Html<String> {
    let (mode, selection) = parse_form(&form);
    let kb = state.kb.read();

    let result = match mode {
        Some(mode) => {
            let mut given: Vec<FactId> = selection.given.iter().cloned().collect();
            given.sort();
            let query = Query {
                mode,
                given,
                target: selection.target.clone(),
            };
            Orchestrator::new(&kb).run(&query).map_err(|e| e.to_string())
        }
        None => Err("modo de inferência ausente".to_string()),
    };

    let panel = match &result {
        Ok(outcome) => Panel::Outcome(outcome),
        Err(message) => {
            tracing::warn!(error = %message, "Consulta rejeitada");
            Panel::Error(message.clone())
        }
    };
    markup_to_html(templates::full_page(&kb, &selection, panel))
}

/// Extrai modo, inventário e alvo dos campos do formulário.
///
/// Alvo vazio significa "sem alvo".
fn parse_form(form: &HashMap<String, String>) -> (Option<Mode>, Selection) {
    let mode = match form.get("mode").map(String::as_str) {
        Some("forward") => Some(Mode::Forward),
        Some("backward") => Some(Mode::Backward),
        _ => None,
    };
    let given: HashSet<FactId> = form
        .keys()
        .filter_map(|key| key.strip_prefix(HAVE_PREFIX))
        .map(str::to_string)
        .collect();
    let target = form
        .get("target")
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    (mode, Selection { given, target })
}

/// GET /api/kb — Itens e receitas em JSON.
///
/// Uma falha de serialização vira `500` com a mensagem do serde.
pub async fn kb_summary(State(state): State<AppState>) -> Response {
    let kb = state.kb.read();
    // serializa antes de soltar o lock
    Json(summarize(&kb)).into_response()
}

fn summarize(kb: &KnowledgeBase) -> KbSummary<'_> {
    KbSummary {
        facts: kb.facts().iter().collect(),
        rules: kb.rules().iter().collect(),
        duplicates: kb.duplicate_descriptions(),
    }
}

/// POST /api/forward
pub async fn api_forward(
    State(state): State<AppState>,
    Json(req): Json<InferRequest>,
) -> Result<Json<Outcome>, ApiError> {
    run_api(&state, Mode::Forward, req)
}

/// POST /api/backward
pub async fn api_backward(
    State(state): State<AppState>,
    Json(req): Json<InferRequest>,
) -> Result<Json<Outcome>, ApiError> {
    run_api(&state, Mode::Backward, req)
}

fn run_api(state: &AppState, mode: Mode, req: InferRequest) -> Result<Json<Outcome>, ApiError> {
    let query = Query {
        mode,
        given: req.given,
        target: req.target,
    };
    let kb = state.kb.read();
    match Orchestrator::new(&kb).run(&query) {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e) => {
            let status = match e {
                EngineError::ProofTooLarge { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::BAD_REQUEST,
            };
            tracing::warn!(error = %e, ?mode, "Consulta rejeitada");
            Err(api_error(status, e))
        }
    }
}

/// POST /api/reload — Relê os arquivos e troca a KB.
///
/// A KB antiga continua servindo se a nova for rejeitada.
pub async fn reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, ApiError> {
    let config = state.config.clone();
    let loaded = tokio::task::spawn_blocking(move || loader::load_kb(&config))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    match loaded {
        Ok(kb) => {
            let response = ReloadResponse {
                facts: kb.fact_count(),
                rules: kb.rule_count(),
            };
            *state.kb.write() = kb;
            tracing::info!(facts = response.facts, rules = response.rules, "KB recarregada");
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Falha ao recarregar KB");
            Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, format!("{e:#}")))
        }
    }
}

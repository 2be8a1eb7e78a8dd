//! # Craftsys — Sistema de Produção para Receitas de Fabricação
//!
//! **Ponto de entrada** da aplicação: carrega a base de conhecimento dos
//! arquivos de texto e sobe o servidor web.
//!
//! ## Fluxo de Inicialização
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging
//!   ├── Lê Config das variáveis de ambiente
//!   ├── Carrega e valida a KB (aborta se inválida)
//!   ├── Monta AppState e Router
//!   └── Inicia servidor TCP
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Executar com logs padrão (info)
//! cargo run
//!
//! # Outra base e outra porta, com logs detalhados
//! CRAFTSYS_FACTS=kb/f.txt CRAFTSYS_RULES=kb/r.txt CRAFTSYS_ADDR=127.0.0.1:8080 \
//!     RUST_LOG=debug cargo run
//! ```

/// Módulo `config` — configuração por variáveis de ambiente.
mod config;

/// Módulo `core` — tipos fundamentais: Fact, Rule, KnowledgeBase.
mod core;

/// Módulo `inference` — átomos, encadeamento para frente e para trás.
mod inference;

/// Módulo `loader` — leitura dos arquivos de fatos e regras.
mod loader;

/// Módulo `orchestrator` — traduz consultas em resultados exibíveis.
mod orchestrator;

/// Módulo `web` — servidor web axum, handlers HTTP e templates.
mod web;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::web::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG controla o nível; padrão info
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("⛏ Craftsys — Starting...");

    let config = Config::from_env();

    // KB inválida é fatal: nenhum raciocínio roda sobre dados quebrados
    let kb = loader::load_kb(&config)?;
    let raw = kb.raw_materials().len();
    tracing::info!(
        facts = kb.fact_count(),
        rules = kb.rule_count(),
        raw_materials = raw,
        "KB pronta"
    );

    let addr = config.addr.clone();
    let state = AppState::new(kb, config);
    let app = web::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Server running at http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

//! # Templates Maud — HTML Server-Side
//!
//! Uma única página: à esquerda o inventário (um checkbox por item), à
//! direita o alvo, os dois botões de inferência e o painel de resultado.
//!
//! ```text
//! ┌──────────────── nav-bar ───────────────────────┐
//! │ Sistema de Produção          21 itens · 18 receitas │
//! ├───────────────────────┬────────────────────────┤
//! │ Inventário            │ Alvo [ Torch      ▾]   │
//! │ ☑ Coal        ⛏      │ [Para frente][Para trás]│
//! │ ☐ Furnace             │                        │
//! │ ☑ Oak Log     ⛏      │ ✅ Torch pode ser ...   │
//! │ ...                   │ 1. Oak Log -> ...       │
//! └───────────────────────┴────────────────────────┘
//! ```
//!
//! Sem JavaScript: o formulário faz POST em `/infer` e a página volta
//! inteira, com a seleção preservada.

use std::collections::HashSet;

use maud::{html, Markup, DOCTYPE};

use crate::core::{FactId, KnowledgeBase};
use crate::orchestrator::{Mode, Outcome};

/// O que o usuário marcou no formulário.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub given: HashSet<FactId>,
    pub target: Option<FactId>,
}

/// O que mostrar no painel de resultado.
pub enum Panel<'a> {
    Empty,
    Outcome(&'a Outcome),
    Error(String),
}

/// Página completa.
pub fn full_page(kb: &KnowledgeBase, selection: &Selection, panel: Panel<'_>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Sistema de Produção" }
                link rel="stylesheet" href="/assets/style.css";
            }
            body {
                nav class="nav-bar" {
                    span class="nav-brand" { "Sistema de Produção" }
                    span class="nav-status" {
                        (kb.fact_count()) " itens · " (kb.rule_count()) " receitas"
                    }
                }
                form class="app-container" method="post" action="/infer" {
                    (inventory_panel(kb, selection))
                    div class="query-panel" {
                        (target_select(kb, selection))
                        div class="actions" {
                            button type="submit" name="mode" value="forward" {
                                (Mode::Forward.label())
                            }
                            button type="submit" name="mode" value="backward" {
                                (Mode::Backward.label())
                            }
                            a class="reset" href="/" { "Limpar" }
                        }
                        (result_panel(panel))
                    }
                }
            }
        }
    }
}

/// Lista de itens com checkbox; matérias-primas recebem o ícone ⛏.
fn inventory_panel(kb: &KnowledgeBase, selection: &Selection) -> Markup {
    html! {
        fieldset class="inventory" {
            legend { "Inventário" }
            @for fact in kb.facts() {
                label class=(if fact.is_atomic() { "item atomic" } else { "item" }) {
                    input type="checkbox"
                        name=(format!("have:{}", fact.id))
                        checked[selection.given.contains(&fact.id)];
                    span class="item-name" { (fact.description) }
                    @if fact.is_atomic() {
                        span class="item-tag" title="matéria-prima" { "⛏" }
                    }
                }
            }
        }
    }
}

fn target_select(kb: &KnowledgeBase, selection: &Selection) -> Markup {
    html! {
        label class="target" {
            "Alvo "
            select name="target" {
                option value="" selected[selection.target.is_none()] { "— nenhum (fecho completo) —" }
                @for fact in kb.facts() {
                    option value=(fact.id)
                        selected[selection.target.as_deref() == Some(fact.id.as_str())] {
                        (fact.description)
                    }
                }
            }
        }
    }
}

fn result_panel(panel: Panel<'_>) -> Markup {
    html! {
        div class="result" {
            @match panel {
                Panel::Empty => {
                    p class="hint" {
                        "Marque os itens que você tem, escolha um alvo e peça a inferência."
                    }
                }
                Panel::Error(message) => {
                    div class="result-error" { "Erro: " (message) }
                }
                Panel::Outcome(outcome) => {
                    div class=(if outcome.success { "headline success" } else { "headline failure" }) {
                        (outcome.headline)
                    }
                    div class="mode" { (outcome.mode.label()) }
                    @if !outcome.steps.is_empty() {
                        ol class="steps" {
                            @for step in &outcome.steps {
                                li { (step) }
                            }
                        }
                    }
                    @if !outcome.derived.is_empty() {
                        div class="derived" {
                            "Obtidos: " (outcome.derived.join(", "))
                        }
                    }
                    @for note in &outcome.notes {
                        div class="note" { (note) }
                    }
                    @if let Some(proof) = &outcome.proof {
                        pre class="proof" { (proof) }
                    }
                }
            }
        }
    }
}

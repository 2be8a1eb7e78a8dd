//! # Avaliação da Árvore de Prova
//!
//! Percorre a [`ProofTree`] em pós-ordem contra o inventário:
//!
//! | Nó | Satisfeito se |
//! |----|---------------|
//! | folha | o fato está no inventário |
//! | `And` | todos os filhos satisfeitos (todos são avaliados) |
//! | `Or` | algum filho satisfeito (para no primeiro) |
//!
//! Uma folha fora do inventário é sempre falsa: ou falta a matéria-prima,
//! ou o ramo foi cortado por ciclo.
//!
//! ## Trace
//!
//! Quando uma expansão de ingredientes fecha (todos satisfeitos), a regra
//! que eles compartilham entra no trace, se ainda não estiver lá. Como o
//! percurso é pós-ordem, ingredientes aparecem antes das receitas que os
//! consomem. Alternativas que falham no meio não deixam regras no trace.

use serde::Serialize;

use crate::core::{Inventory, Rule, RuleId};

use super::proof::{NodeId, NodeKind, ProofTree};

/// Resultado do encadeamento para trás.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BackwardResult {
    /// A raiz foi satisfeita.
    pub success: bool,
    /// Regras usadas, sem repetição, de baixo para cima.
    pub trace: Vec<RuleId>,
}

/// Avalia a árvore contra `given`, gravando `satisfied` em cada nó visitado.
///
/// Uma regra só entra no trace quando todos os seus ingredientes são
/// satisfeitos: regras de uma alternativa que falhou nunca são registradas,
/// mesmo que parte dos ingredientes tenha sido satisfeita.
pub fn evaluate_proof(tree: &mut ProofTree<'_>, given: &Inventory<'_>) -> BackwardResult {
    let mut trace: Vec<&Rule> = Vec::new();
    let success = evaluate_node(tree, ProofTree::ROOT, given, &mut trace);
    tracing::debug!(success, rules = trace.len(), "proof: árvore avaliada");
    BackwardResult {
        success,
        trace: trace.into_iter().map(|rule| rule.id.clone()).collect(),
    }
}

fn evaluate_node<'kb>(
    tree: &mut ProofTree<'kb>,
    id: NodeId,
    given: &Inventory<'_>,
    trace: &mut Vec<&'kb Rule>,
) -> bool {
    let node = tree.node(id);
    let (fact, kind) = (node.fact, node.kind);
    let children = node.children.clone();

    let satisfied = if children.is_empty() {
        given.contains(fact)
    } else {
        match kind {
            NodeKind::Or => children
                .iter()
                .any(|&child| evaluate_node(tree, child, given, trace)),
            NodeKind::And => {
                let mut all = true;
                for &child in &children {
                    all &= evaluate_node(tree, child, given, trace);
                }
                if all {
                    // ingredientes de uma expansão compartilham a regra
                    if let Some(rule) = tree.node(children[0]).rule {
                        if !trace.contains(&rule) {
                            trace.push(rule);
                        }
                    }
                }
                all
            }
        }
    };

    tree.node_mut(id).satisfied = Some(satisfied);
    satisfied
}

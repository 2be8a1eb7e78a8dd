//! # Árvore de Prova AND/OR (Encadeamento Para Trás)
//!
//! Parte do alvo e desce até as matérias-primas, montando uma árvore em que
//! cada nó é uma **instância** de um fato dentro da tentativa de prova.
//!
//! ## Tipos de Nó
//!
//! | Produtores do fato | Nó | Filhos |
//! |--------------------|----|--------|
//! | 1 | `And` | um filho por ingrediente |
//! | 2+ | `Or` | um nó intermediário (`And`) por receita alternativa |
//! | 0 / no inventário | folha | nenhum |
//!
//! ```text
//! Torch [AND]
//! ├── Stick ← r3        (ingrediente; r3 o consome para fazer Torch)
//! │   └── Plank ← r2
//! │       └── Log ← r1  (folha: matéria-prima)
//! └── Coal ← r3         (folha)
//! ```
//!
//! Cada filho guarda a regra que **o consome para produzir o pai**, e não a
//! regra que o produz. Todos os ingredientes de uma mesma expansão apontam
//! para a mesma regra.
//!
//! ## Ciclos
//!
//! Cada ramo carrega a sequência de regras da raiz até ele. Se a regra de
//! uma expansão já está nessa sequência, o filho nasce com `leads_to_loop`
//! e nunca é expandido. Um caminho não repete regra, logo a profundidade é
//! limitada pelo número de regras e a construção sempre termina.
//!
//! Os nós vivem numa arena (`Vec<ProofNode>`); pai e filhos são índices.

use std::collections::VecDeque;
use std::fmt::Write;

use serde::Serialize;

use crate::core::{EngineError, Fact, Inventory, KnowledgeBase, Rule};

/// Limite de nós de uma árvore. Receitas muito ramificadas crescem
/// exponencialmente; acima disto a construção é abortada.
pub const MAX_PROOF_NODES: usize = 200_000;

/// Índice de um nó na arena de [`ProofTree`].
pub type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    /// Todos os filhos precisam ser satisfeitos.
    And,
    /// Basta um filho (receita alternativa) satisfeito.
    Or,
}

/// Um fato dentro de uma tentativa de prova.
#[derive(Clone, Debug)]
pub struct ProofNode<'kb> {
    pub fact: &'kb Fact,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Regra que consome este fato para produzir o pai. Fixada na criação.
    pub rule: Option<&'kb Rule>,
    pub leads_to_loop: bool,
    /// Preenchido por [`evaluate_proof`](super::evaluate_proof); `None` se o
    /// nó não foi visitado.
    pub satisfied: Option<bool>,
}

/// Árvore AND/OR enraizada no alvo. A raiz é sempre o nó `0`.
#[derive(Clone, Debug)]
pub struct ProofTree<'kb> {
    nodes: Vec<ProofNode<'kb>>,
}

impl<'kb> ProofTree<'kb> {
    pub const ROOT: NodeId = 0;

    pub fn node(&self, id: NodeId) -> &ProofNode<'kb> {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut ProofNode<'kb> {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Nós em ordem de criação (largura).
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ProofNode<'kb>)> + '_ {
        self.nodes.iter().enumerate()
    }

    /// Nós marcados como ciclo.
    pub fn loops(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| node.leads_to_loop)
            .map(|(id, _)| id)
            .collect()
    }

    /// Regras da raiz até `id`, reconstruídas subindo pelos pais.
    ///
    /// Nós intermediários de receitas alternativas não carregam regra e não
    /// contribuem. Num nó `leads_to_loop` a regra repetida aparece duas vezes.
    pub fn rule_path(&self, id: NodeId) -> Vec<&'kb Rule> {
        let mut path = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &self.nodes[current];
            if let Some(rule) = node.rule {
                path.push(rule);
            }
            cursor = node.parent;
        }
        path.reverse();
        path
    }

    /// Visão textual indentada, uma linha por nó.
    ///
    /// `✓`/`✗` mostram o resultado da avaliação, `·` um nó não visitado,
    /// `↺` um ramo cortado por ciclo.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(Self::ROOT, 0, &mut out);
        out
    }

    fn render_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = &self.nodes[id];
        let mark = match node.satisfied {
            Some(true) => '✓',
            Some(false) => '✗',
            None => '·',
        };
        let _ = write!(out, "{}{} {}", "  ".repeat(depth), mark, node.fact);
        if !node.children.is_empty() {
            let kind = match node.kind {
                NodeKind::And => "AND",
                NodeKind::Or => "OR",
            };
            let _ = write!(out, " [{kind}]");
        }
        if node.leads_to_loop {
            out.push_str(" ↺");
        }
        out.push('\n');
        for &child in &node.children {
            self.render_node(child, depth + 1, out);
        }
    }

    fn push(
        &mut self,
        fact: &'kb Fact,
        parent: Option<NodeId>,
        rule: Option<&'kb Rule>,
    ) -> Result<NodeId, EngineError> {
        if self.nodes.len() >= MAX_PROOF_NODES {
            return Err(EngineError::ProofTooLarge {
                limit: MAX_PROOF_NODES,
            });
        }
        let id = self.nodes.len();
        self.nodes.push(ProofNode {
            fact,
            kind: NodeKind::And,
            parent,
            children: Vec::new(),
            rule,
            leads_to_loop: false,
            satisfied: None,
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        Ok(id)
    }
}

/// Fila da construção em largura: nó + regras da raiz até ele.
type Frontier<'kb> = VecDeque<(NodeId, Vec<&'kb Rule>)>;

/// Monta a árvore AND/OR para `target`, em largura.
///
/// Fatos presentes em `inventory` e fatos atômicos viram folhas.
///
/// # Erros
///
/// - [`EngineError::UnknownFact`] — `target` não existe
/// - [`EngineError::Inconsistent`] — fato não atômico sem produtores
/// - [`EngineError::ProofTooLarge`] — árvore acima de [`MAX_PROOF_NODES`]
pub fn build_proof<'kb>(
    kb: &'kb KnowledgeBase,
    target: &str,
    inventory: &Inventory<'kb>,
) -> Result<ProofTree<'kb>, EngineError> {
    let root = kb
        .fact(target)
        .ok_or_else(|| EngineError::UnknownFact(target.to_string()))?;

    let mut tree = ProofTree { nodes: Vec::new() };
    let mut queue: Frontier<'kb> = VecDeque::new();
    let root_id = tree.push(root, None, None)?;
    queue.push_back((root_id, Vec::new()));

    while let Some((id, path)) = queue.pop_front() {
        let node = tree.node(id);
        let fact = node.fact;
        if node.leads_to_loop || inventory.contains(fact) || fact.is_atomic() {
            continue;
        }

        match kb.producers(&fact.id).as_slice() {
            [] => return Err(EngineError::Inconsistent(fact.id.clone())),
            [rule] => expand(kb, &mut tree, &mut queue, id, *rule, &path)?,
            alternatives => {
                tree.node_mut(id).kind = NodeKind::Or;
                for &rule in alternatives {
                    let alt = tree.push(fact, Some(id), None)?;
                    expand(kb, &mut tree, &mut queue, alt, rule, &path)?;
                }
            }
        }
    }

    tracing::debug!(
        target = %root,
        nodes = tree.len(),
        loops = tree.loops().len(),
        "proof: árvore construída"
    );
    Ok(tree)
}

/// Cria um filho por ingrediente de `rule` sob `parent` e os enfileira.
fn expand<'kb>(
    kb: &'kb KnowledgeBase,
    tree: &mut ProofTree<'kb>,
    queue: &mut Frontier<'kb>,
    parent: NodeId,
    rule: &'kb Rule,
    path: &[&'kb Rule],
) -> Result<(), EngineError> {
    let repeats = path.contains(&rule);
    let mut child_path = path.to_vec();
    child_path.push(rule);

    for ingredient in &rule.lhs {
        let fact = kb
            .fact(ingredient)
            .ok_or_else(|| EngineError::UnknownFact(ingredient.clone()))?;
        let child = tree.push(fact, Some(parent), Some(rule))?;
        if repeats {
            tree.node_mut(child).leads_to_loop = true;
            tracing::trace!(rule = %rule.id, fact = %fact, "proof: ciclo detectado");
        }
        queue.push_back((child, child_path.clone()));
    }
    Ok(())
}

//! # Orquestrador — Do Pedido do Usuário ao Texto Exibido
//!
//! O [`Orchestrator`] recebe uma [`Query`] vinda da camada web, escolhe o
//! modo de raciocínio e traduz o resultado do motor num [`Outcome`] pronto
//! para exibição.
//!
//! ## Fluxo
//!
//! ```text
//! Query { mode, given, target }
//!   │
//!   ├── Forward  → forward(kb, given, target)
//!   │               └── passos = descrições das regras, na ordem de disparo
//!   │
//!   └── Backward → inventory(given) → build_proof → evaluate_proof
//!                   └── passos = descrições invertidas, do alvo para baixo
//!                       + árvore renderizada + ciclos encontrados
//! ```
//!
//! "Não dá para fabricar" é um `Outcome` com `success == false`, nunca um erro.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, FactId, KnowledgeBase, RuleId};
use crate::inference::{build_proof, evaluate_proof, forward};

/// Modo de raciocínio pedido pelo usuário.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Encadeamento para frente (dos itens para o alvo).
    Forward,
    /// Encadeamento para trás (do alvo para os itens).
    Backward,
}

impl Mode {
    /// Label legível em PT-BR, usado nos botões e no resultado.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Forward => "Encadeamento para frente",
            Mode::Backward => "Encadeamento para trás",
        }
    }
}

/// Pedido de inferência.
#[derive(Clone, Debug, Deserialize)]
pub struct Query {
    pub mode: Mode,
    /// Ids dos itens no inventário.
    #[serde(default)]
    pub given: Vec<FactId>,
    /// Item desejado. Obrigatório no modo `Backward`.
    #[serde(default)]
    pub target: Option<FactId>,
}

/// Resultado pronto para exibição.
#[derive(Clone, Debug, Serialize)]
pub struct Outcome {
    pub mode: Mode,
    pub success: bool,
    /// Frase-resumo ("✅ Torch pode ser fabricado").
    pub headline: String,
    /// Regras usadas, pelos ids.
    pub trace: Vec<RuleId>,
    /// Regras usadas, como texto.
    pub steps: Vec<String>,
    /// Itens obtidos no encadeamento para frente.
    pub derived: Vec<String>,
    /// Observações extras (ciclos cortados).
    pub notes: Vec<String>,
    /// Árvore de prova renderizada (só no modo `Backward`).
    pub proof: Option<String>,
}

/// Coordena uma consulta sobre uma KB emprestada.
pub struct Orchestrator<'kb> {
    kb: &'kb KnowledgeBase,
}

impl<'kb> Orchestrator<'kb> {
    pub fn new(kb: &'kb KnowledgeBase) -> Self {
        Self { kb }
    }

    /// Executa a consulta e registra o resultado no log.
    ///
    /// # Erros
    ///
    /// [`EngineError`] para ids desconhecidos, modo `Backward` sem alvo, ou
    /// árvore de prova grande demais.
    pub fn run(&self, query: &Query) -> Result<Outcome, EngineError> {
        let outcome = match query.mode {
            Mode::Forward => self.run_forward(query)?,
            Mode::Backward => self.run_backward(query)?,
        };
        tracing::info!(
            mode = ?query.mode,
            given = query.given.len(),
            target = ?query.target,
            success = outcome.success,
            rules = outcome.trace.len(),
            "Consulta respondida"
        );
        Ok(outcome)
    }

    fn run_forward(&self, query: &Query) -> Result<Outcome, EngineError> {
        let target = query.target.as_deref();
        let result = forward(self.kb, &query.given, target)?;

        let headline = match target {
            None => format!("🔎 {} item(ns) novo(s) alcançável(is)", result.derived.len()),
            Some(id) => self.verdict(id, result.success),
        };
        let steps = result
            .trace
            .iter()
            .filter_map(|id| self.kb.rule(id))
            .map(|rule| rule.description.clone())
            .collect();
        let derived = result
            .derived
            .iter()
            .filter_map(|id| self.kb.fact(id))
            .map(|fact| fact.description.clone())
            .collect();

        Ok(Outcome {
            mode: Mode::Forward,
            success: result.success,
            headline,
            trace: result.trace,
            steps,
            derived,
            notes: Vec::new(),
            proof: None,
        })
    }

    fn run_backward(&self, query: &Query) -> Result<Outcome, EngineError> {
        let target = query.target.as_deref().ok_or(EngineError::MissingTarget)?;
        let inventory = self.kb.inventory(&query.given)?;
        let mut tree = build_proof(self.kb, target, &inventory)?;
        let result = evaluate_proof(&mut tree, &inventory);

        // do alvo para as matérias-primas
        let steps = result
            .trace
            .iter()
            .rev()
            .filter_map(|id| self.kb.rule(id))
            .map(|rule| rule.reverse_description())
            .collect();
        let notes = tree
            .loops()
            .into_iter()
            .map(|id| {
                let path: Vec<&str> = tree
                    .rule_path(id)
                    .iter()
                    .map(|rule| rule.id.as_str())
                    .collect();
                format!("↺ ciclo cortado em {}: {}", tree.node(id).fact, path.join(" → "))
            })
            .collect();

        Ok(Outcome {
            mode: Mode::Backward,
            success: result.success,
            headline: self.verdict(target, result.success),
            trace: result.trace,
            steps,
            derived: Vec::new(),
            notes,
            proof: Some(tree.render()),
        })
    }

    fn verdict(&self, target: &str, success: bool) -> String {
        let name = self
            .kb
            .fact(target)
            .map(|f| f.description.as_str())
            .unwrap_or(target);
        if success {
            format!("✅ {name} pode ser fabricado")
        } else {
            format!("❌ Não é possível fabricar {name}")
        }
    }
}

//! # Rule — Uma Receita
//!
//! Uma [`Rule`] transforma um conjunto de ingredientes (`lhs`) em um
//! produto (`rhs`). O arquivo de regras permite uma lista no lado direito,
//! mas a [`KnowledgeBase`](super::KnowledgeBase) só aceita regras com
//! **exatamente um** produto.
//!
//! ## Exemplo
//!
//! ```text
//! r3; f3, f5; f4; 1; Stick, Coal -> Torch
//! ```
//!
//! | Campo | Valor |
//! |-------|-------|
//! | `id` | `r3` |
//! | `lhs` | `[f3, f5]` |
//! | `rhs` | `[f4]` |
//! | `description` | `Stick, Coal -> Torch` |
//!
//! Assim como [`Fact`](super::Fact), igualdade e hash usam apenas a descrição.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use super::fact::FactId;

/// Alias de tipo para o identificador estável de uma [Rule] (ex: `"r3"`).
pub type RuleId = String;

/// Separador entre ingredientes e produto nas descrições de receitas.
const ARROW: &str = " -> ";

/// Receita: ingredientes → produto.
///
/// `lhs` e `rhs` são conjuntos ordenados: ids repetidos são descartados,
/// mas a ordem do arquivo é preservada (ela define a ordem dos filhos na
/// árvore de prova).
#[derive(Clone, Debug, Serialize)]
pub struct Rule {
    pub id: RuleId,
    pub description: String,
    pub lhs: Vec<FactId>,
    pub rhs: Vec<FactId>,
}

impl Rule {
    pub fn new<L, R>(id: impl Into<RuleId>, description: impl Into<String>, lhs: L, rhs: R) -> Self
    where
        L: IntoIterator,
        L::Item: Into<FactId>,
        R: IntoIterator,
        R::Item: Into<FactId>,
    {
        Self {
            id: id.into(),
            description: description.into(),
            lhs: ordered_set(lhs),
            rhs: ordered_set(rhs),
        }
    }

    /// Descrição lida de trás para frente, do produto para os ingredientes.
    ///
    /// `"Stick, Coal -> Torch"` vira `"Torch -> Stick, Coal"`. Usada para
    /// exibir o encadeamento para trás. Descrições sem seta voltam intactas.
    pub fn reverse_description(&self) -> String {
        self.description
            .rsplit(ARROW)
            .collect::<Vec<_>>()
            .join(ARROW)
    }
}

fn ordered_set<I>(ids: I) -> Vec<FactId>
where
    I: IntoIterator,
    I::Item: Into<FactId>,
{
    let mut out: Vec<FactId> = Vec::new();
    for id in ids {
        let id = id.into();
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
    }
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.description.hash(state);
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_ingredients_collapse_in_file_order() {
        let rule = Rule::new("r1", "a", ["f3", "f1", "f3"], ["f2"]);
        assert_eq!(rule.lhs, vec!["f3".to_string(), "f1".to_string()]);
    }

    #[test]
    fn reverse_description_swaps_sides() {
        let rule = Rule::new("r3", "Stick, Coal -> Torch", ["f3", "f5"], ["f4"]);
        assert_eq!(rule.reverse_description(), "Torch -> Stick, Coal");
    }

    #[test]
    fn reverse_description_with_single_ingredient() {
        let rule = Rule::new("r1", "Log -> Plank", ["f1"], ["f2"]);
        assert_eq!(rule.reverse_description(), "Plank -> Log");
    }

    #[test]
    fn reverse_description_without_arrow_is_unchanged() {
        let rule = Rule::new("r1", "smelt", ["f1"], ["f2"]);
        assert_eq!(rule.reverse_description(), "smelt");
    }

    #[test]
    fn equality_by_description() {
        let a = Rule::new("r1", "Log -> Plank", ["f1"], ["f2"]);
        let b = Rule::new("r7", "Log -> Plank", ["f9"], ["f2"]);
        assert_eq!(a, b);
    }
}

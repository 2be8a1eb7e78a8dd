//! # Erros do Domínio
//!
//! Dois grupos de falhas, separados pelo momento em que acontecem:
//!
//! | Enum | Quando | Exemplo |
//! |------|--------|---------|
//! | [`KbError`] | Construção da [`KnowledgeBase`](super::KnowledgeBase) | regra citando fato inexistente |
//! | [`EngineError`] | Consulta ao motor de inferência | alvo desconhecido |
//!
//! "Não dá para fabricar" **não** é erro — é um resultado normal
//! (`success == false`) devolvido pelos encadeadores.

use thiserror::Error;

use super::fact::FactId;
use super::rule::RuleId;

/// Falhas estruturais detectadas uma única vez, ao montar a KB.
///
/// Se qualquer uma ocorrer a KB não é construída e nenhum raciocínio roda.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KbError {
    #[error("rule {rule} references unknown fact {fact}")]
    UnknownFactReference { rule: RuleId, fact: FactId },

    /// O lado direito de uma regra precisa ter exatamente um fato.
    #[error("rule {rule} must produce exactly one fact, found {count}")]
    InvariantViolation { rule: RuleId, count: usize },

    #[error("rule {rule} has no ingredients")]
    EmptyIngredients { rule: RuleId },

    #[error("duplicate fact id {0}")]
    DuplicateFactId(FactId),

    #[error("duplicate rule id {0}")]
    DuplicateRuleId(RuleId),
}

/// Falhas de uma consulta individual ao motor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Inventário ou alvo citou um id ausente da tabela de fatos.
    #[error("unknown fact {0}")]
    UnknownFact(FactId),

    #[error("backward chaining needs a target fact")]
    MissingTarget,

    /// Fato não atômico sem produtores: a classificação de átomos está
    /// inconsistente com o índice de produtores.
    #[error("fact {0} is not atomic but has no producing rule")]
    Inconsistent(FactId),

    #[error("proof tree exceeded {limit} nodes")]
    ProofTooLarge { limit: usize },
}


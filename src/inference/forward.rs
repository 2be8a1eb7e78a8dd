//! # Encadeamento Para Frente (Data-Driven)
//!
//! Parte do inventário e aplica receitas em **rodadas** até que nada novo
//! apareça (ponto fixo) ou até que o alvo seja produzido.
//!
//! ## Algoritmo
//!
//! ```text
//! prev = cur = given
//! repete:
//!   para cada regra, na ordem do arquivo:
//!     se lhs ⊆ prev e rhs ⊄ cur:
//!       cur ∪= rhs; trace += regra
//!       se alvo ∈ cur: sucesso
//!   se cur == prev: ponto fixo
//!   prev = cur
//! ```
//!
//! A habilitação usa o retrato `prev` do início da rodada: um item fabricado
//! no meio da rodada só habilita outras receitas na rodada seguinte. O teste
//! `rhs ⊄ cur` usa o conjunto vivo, então uma regra nunca dispara duas vezes.
//!
//! Cada rodada que não é a última acrescenta pelo menos um fato a `cur`,
//! então o laço termina em no máximo `|fatos|` rodadas.

use std::collections::HashSet;

use serde::Serialize;

use crate::core::{EngineError, FactId, KnowledgeBase, RuleId};

/// Resultado do encadeamento para frente.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ForwardResult {
    /// Com alvo: o alvo foi alcançado. Sem alvo: sempre `true`.
    pub success: bool,
    /// Regras disparadas, na ordem de disparo.
    pub trace: Vec<RuleId>,
    /// Fatos obtidos que não estavam no inventário, na ordem em que surgiram
    /// (ids canônicos).
    pub derived: Vec<FactId>,
    /// Rodadas executadas.
    pub rounds: usize,
}

/// Calcula o fecho do inventário `given`, opcionalmente parando em `target`.
///
/// Sem alvo o laço roda até o ponto fixo e o `trace` traz todas as regras
/// que dispararam. Com alvo inalcançável o resultado é `success == false`
/// com o `trace` parcial.
///
/// # Erros
///
/// [`EngineError::UnknownFact`] se `given` ou `target` citar id inexistente.
pub fn forward<'kb, I, S>(
    kb: &'kb KnowledgeBase,
    given: I,
    target: Option<&str>,
) -> Result<ForwardResult, EngineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // ids com a mesma descrição são o mesmo item
    let item = move |id: &str| {
        kb.canonical_id(id)
            .ok_or_else(|| EngineError::UnknownFact(id.to_string()))
    };
    let mut cur: HashSet<&'kb str> = HashSet::new();
    for id in given {
        cur.insert(item(id.as_ref())?);
    }
    let target = target.map(item).transpose()?;
    if target.is_some_and(|t| cur.contains(t)) {
        return Ok(ForwardResult {
            success: true,
            trace: Vec::new(),
            derived: Vec::new(),
            rounds: 0,
        });
    }
    // regras só citam ids validados na construção da KB
    let known = move |id: &'kb FactId| kb.canonical_id(id).unwrap_or(id.as_str());

    let mut prev = cur.clone();
    let mut trace = Vec::new();
    let mut derived = Vec::new();
    let mut rounds = 0;
    let max_rounds = kb.fact_count() + 1;

    loop {
        rounds += 1;
        for rule in kb.rules() {
            let enabled = rule.lhs.iter().all(|id| prev.contains(known(id)));
            let produced = rule.rhs.iter().all(|id| cur.contains(known(id)));
            if !enabled || produced {
                continue;
            }
            for out in &rule.rhs {
                let out = known(out);
                if cur.insert(out) {
                    derived.push(out.to_string());
                }
            }
            trace.push(rule.id.clone());
            tracing::trace!(rule = %rule.id, round = rounds, "forward: regra disparada");

            if target.is_some_and(|t| cur.contains(t)) {
                tracing::debug!(rounds, fired = trace.len(), "forward: alvo alcançado");
                return Ok(ForwardResult {
                    success: true,
                    trace,
                    derived,
                    rounds,
                });
            }
        }

        if cur == prev {
            break;
        }
        if rounds >= max_rounds {
            tracing::warn!(rounds, "forward: limite de rodadas atingido");
            break;
        }
        prev.clone_from(&cur);
    }

    tracing::debug!(rounds, fired = trace.len(), "forward: ponto fixo");
    Ok(ForwardResult {
        success: target.is_none(),
        trace,
        derived,
        rounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fact, Rule};

    fn torch_kb(rules: Vec<Rule>) -> KnowledgeBase {
        KnowledgeBase::build(
            vec![
                Fact::new("f1", "Log"),
                Fact::new("f2", "Plank"),
                Fact::new("f3", "Stick"),
                Fact::new("f4", "Torch"),
                Fact::new("f5", "Coal"),
            ],
            rules,
        )
        .unwrap()
    }

    fn torch_rules() -> Vec<Rule> {
        vec![
            Rule::new("r1", "Log -> Plank", ["f1"], ["f2"]),
            Rule::new("r2", "Plank -> Stick", ["f2"], ["f3"]),
            Rule::new("r3", "Stick, Coal -> Torch", ["f3", "f5"], ["f4"]),
        ]
    }

    #[test]
    fn reaches_torch_one_rule_per_round() {
        let kb = torch_kb(torch_rules());
        let res = forward(&kb, ["f1", "f5"], Some("f4")).unwrap();
        assert!(res.success);
        assert_eq!(res.trace, ["r1", "r2", "r3"]);
        // o retrato `prev` impede r2 de usar a tábua da mesma rodada
        assert_eq!(res.rounds, 3);
        assert_eq!(res.derived, ["f2", "f3", "f4"]);
    }

    #[test]
    fn missing_log_fails() {
        let kb = torch_kb(torch_rules());
        let res = forward(&kb, ["f5"], Some("f4")).unwrap();
        assert!(!res.success);
        assert!(res.trace.is_empty());
        assert_eq!(res.rounds, 1);
    }

    #[test]
    fn partial_trace_kept_on_failure() {
        let kb = torch_kb(torch_rules());
        let res = forward(&kb, ["f1"], Some("f4")).unwrap();
        assert!(!res.success);
        assert_eq!(res.trace, ["r1", "r2"]);
    }

    #[test]
    fn without_target_runs_to_fixpoint() {
        let kb = torch_kb(torch_rules());
        let res = forward(&kb, ["f1", "f5"], None).unwrap();
        assert!(res.success);
        assert_eq!(res.trace, ["r1", "r2", "r3"]);
        // a quarta rodada não dispara nada e confirma o ponto fixo
        assert_eq!(res.rounds, 4);
    }

    #[test]
    fn rule_order_within_round_uses_snapshot() {
        // r2 vem antes de r1: na rodada 1 a tábua ainda não existe para r2
        let rules = vec![
            Rule::new("r2", "Plank -> Stick", ["f2"], ["f3"]),
            Rule::new("r1", "Log -> Plank", ["f1"], ["f2"]),
        ];
        let kb = torch_kb(rules);
        let res = forward(&kb, ["f1"], Some("f3")).unwrap();
        assert!(res.success);
        assert_eq!(res.trace, ["r1", "r2"]);
        assert_eq!(res.rounds, 2);
    }

    #[test]
    fn same_round_rules_all_fire() {
        let rules = vec![
            Rule::new("r1", "Log -> Plank", ["f1"], ["f2"]),
            Rule::new("r4", "Log -> Stick", ["f1"], ["f3"]),
        ];
        let kb = torch_kb(rules);
        let res = forward(&kb, ["f1"], None).unwrap();
        assert_eq!(res.trace, ["r1", "r4"]);
        assert_eq!(res.rounds, 2);
    }

    #[test]
    fn alternative_producer_does_not_refire() {
        let mut rules = torch_rules();
        rules.insert(2, Rule::new("r4", "Coal -> Stick", ["f5"], ["f3"]));
        let kb = torch_kb(rules);
        let res = forward(&kb, ["f1", "f5"], None).unwrap();
        // r4 produz o graveto na rodada 1, então r2 nunca dispara
        assert_eq!(res.trace, ["r1", "r4", "r3"]);
        let unique: HashSet<&RuleId> = res.trace.iter().collect();
        assert_eq!(unique.len(), res.trace.len());
    }

    #[test]
    fn target_already_in_inventory() {
        let kb = torch_kb(torch_rules());
        let res = forward(&kb, ["f4"], Some("f4")).unwrap();
        assert!(res.success);
        assert!(res.trace.is_empty());
    }

    #[test]
    fn repeated_runs_are_identical() {
        let kb = torch_kb(torch_rules());
        let first = forward(&kb, ["f5", "f1"], None).unwrap();
        for _ in 0..5 {
            assert_eq!(forward(&kb, ["f1", "f5"], None).unwrap(), first);
        }
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let kb = torch_kb(torch_rules());
        assert_eq!(
            forward(&kb, ["f1", "zz"], None).err(),
            Some(EngineError::UnknownFact("zz".into()))
        );
        assert_eq!(
            forward(&kb, ["f1"], Some("zz")).err(),
            Some(EngineError::UnknownFact("zz".into()))
        );
    }

    #[test]
    fn ids_sharing_a_description_are_one_item() {
        // f6 é outro Log: deve habilitar r1, que cita f1
        let kb = KnowledgeBase::build(
            vec![
                Fact::new("f1", "Log"),
                Fact::new("f6", "Log"),
                Fact::new("f2", "Plank"),
            ],
            vec![Rule::new("r1", "Log -> Plank", ["f1"], ["f2"])],
        )
        .unwrap();
        let res = forward(&kb, ["f6"], Some("f2")).unwrap();
        assert!(res.success);
        assert_eq!(res.trace, ["r1"]);

        let res = forward(&kb, ["f6"], Some("f1")).unwrap();
        assert!(res.success);
        assert_eq!(res.rounds, 0);
    }

    #[test]
    fn cyclic_rules_terminate() {
        let kb = KnowledgeBase::build(
            vec![Fact::new("fX", "X"), Fact::new("fY", "Y")],
            vec![
                Rule::new("rA", "Y -> X", ["fY"], ["fX"]),
                Rule::new("rB", "X -> Y", ["fX"], ["fY"]),
            ],
        )
        .unwrap();
        let empty: [&str; 0] = [];
        let res = forward(&kb, empty, Some("fX")).unwrap();
        assert!(!res.success);
        let res = forward(&kb, ["fY"], Some("fX")).unwrap();
        assert_eq!(res.trace, ["rA"]);
    }
}

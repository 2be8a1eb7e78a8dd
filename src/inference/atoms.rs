//! Classificação de matérias-primas.
//!
//! Um fato é **atômico** se nenhuma regra o tem no lado direito, ou seja,
//! se o índice de produtores não tem entradas para ele. Roda uma vez, dentro
//! de [`KnowledgeBase::build`](crate::core::KnowledgeBase::build).

use crate::core::KnowledgeBase;

/// Marca `atomic` em cada fato da KB.
///
/// Determinística e idempotente: rodar de novo produz as mesmas flags.
pub fn classify_atoms(kb: &mut KnowledgeBase) {
    let atomic: Vec<bool> = kb
        .facts()
        .iter()
        .map(|fact| kb.producers(&fact.id).is_empty())
        .collect();
    for (fact, atomic) in kb.facts.iter_mut().zip(atomic) {
        fact.atomic = atomic;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fact, Rule};

    #[test]
    fn only_unproduced_facts_are_atomic() {
        let kb = KnowledgeBase::build(
            vec![
                Fact::new("f1", "Log"),
                Fact::new("f2", "Plank"),
                Fact::new("f3", "Sand"),
            ],
            vec![Rule::new("r1", "Log -> Plank", ["f1"], ["f2"])],
        )
        .unwrap();
        assert!(kb.fact("f1").unwrap().is_atomic());
        assert!(!kb.fact("f2").unwrap().is_atomic());
        // fato que nenhuma regra cita também é matéria-prima
        assert!(kb.fact("f3").unwrap().is_atomic());
    }

    #[test]
    fn self_producing_cycle_has_no_atoms() {
        let mut kb = KnowledgeBase::build(
            vec![Fact::new("fX", "X"), Fact::new("fY", "Y")],
            vec![
                Rule::new("rA", "Y -> X", ["fY"], ["fX"]),
                Rule::new("rB", "X -> Y", ["fX"], ["fY"]),
            ],
        )
        .unwrap();
        assert!(kb.raw_materials().is_empty());

        classify_atoms(&mut kb);
        assert!(kb.raw_materials().is_empty());
    }
}

//! # KnowledgeBase — Fatos, Regras e o Índice de Produtores
//!
//! A [`KnowledgeBase`] guarda todos os fatos e regras carregados dos
//! arquivos de texto. Depois de construída ela é **somente leitura**:
//! os encadeadores recebem `&KnowledgeBase` e devolvem resultados novos
//! sem tocar em estado compartilhado.
//!
//! ## Armazenamento
//!
//! - **Fatos**: `Vec<Fact>` ordenado por descrição (ordem de exibição)
//! - **Regras**: `Vec<Rule>` na ordem do arquivo — o encadeamento para
//!   frente depende dessa ordem para ser determinístico
//! - **Índice de produtores**: `HashMap<FactId, Vec<usize>>` — "quais regras
//!   produzem este fato?", na ordem das regras
//! - **Representante canônico**: fatos com a mesma descrição são o mesmo
//!   item; o primeiro deles em `facts` responde por todos
//!
//! | Produtores | Significado |
//! |------------|-------------|
//! | 0 | Fato atômico (matéria-prima) |
//! | 1 | Uma única receita (nó AND) |
//! | 2+ | Receitas alternativas (nó OR) |
//!
//! ## Validação
//!
//! [`KnowledgeBase::build`] recusa a KB inteira se alguma regra citar um fato
//! desconhecido, não tiver ingredientes, ou não produzir exatamente um fato.
//! Todas as falhas estruturais aparecem aqui, antes de qualquer raciocínio.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use crate::core::{Fact, KnowledgeBase, Rule};
//!
//! let kb = KnowledgeBase::build(
//!     vec![Fact::new("f1", "Log"), Fact::new("f2", "Plank")],
//!     vec![Rule::new("r1", "Log -> Plank", ["f1"], ["f2"])],
//! )?;
//! assert!(kb.fact("f1").is_some_and(|f| f.is_atomic()));
//! assert_eq!(kb.producers("f2").len(), 1);
//! ```

use std::collections::{HashMap, HashSet};

use super::error::{EngineError, KbError};
use super::fact::{Fact, FactId};
use super::rule::{Rule, RuleId};

/// Base de conhecimento imutável com índices derivados.
pub struct KnowledgeBase {
    /// Fatos ordenados por descrição.
    pub(crate) facts: Vec<Fact>,
    /// Regras na ordem de carregamento.
    rules: Vec<Rule>,
    /// id do fato → posição em `facts`.
    fact_index: HashMap<FactId, usize>,
    /// id da regra → posição em `rules`.
    rule_index: HashMap<RuleId, usize>,
    /// Posição do representante canônico de cada fato, paralelo a `facts`.
    canonical: Vec<usize>,
    /// id canônico → posições (em `rules`) das regras que o produzem.
    producers: HashMap<FactId, Vec<usize>>,
}

impl KnowledgeBase {
    /// Valida fatos e regras, monta os índices e classifica os átomos.
    ///
    /// # Erros
    ///
    /// - [`KbError::DuplicateFactId`] / [`KbError::DuplicateRuleId`]
    /// - [`KbError::EmptyIngredients`] — regra sem lado esquerdo
    /// - [`KbError::InvariantViolation`] — lado direito com ≠ 1 fato
    /// - [`KbError::UnknownFactReference`] — id ausente da tabela de fatos
    pub fn build(mut facts: Vec<Fact>, rules: Vec<Rule>) -> Result<Self, KbError> {
        facts.sort_by(|a, b| a.description.cmp(&b.description));

        let mut fact_index = HashMap::with_capacity(facts.len());
        for (pos, fact) in facts.iter().enumerate() {
            if fact_index.insert(fact.id.clone(), pos).is_some() {
                return Err(KbError::DuplicateFactId(fact.id.clone()));
            }
        }

        // ordenados por descrição: repetições são vizinhas
        let mut canonical: Vec<usize> = Vec::with_capacity(facts.len());
        for pos in 0..facts.len() {
            match pos.checked_sub(1) {
                Some(prev) if facts[prev] == facts[pos] => canonical.push(canonical[prev]),
                _ => canonical.push(pos),
            }
        }

        let mut rule_index = HashMap::with_capacity(rules.len());
        let mut producers: HashMap<FactId, Vec<usize>> = HashMap::new();
        for (pos, rule) in rules.iter().enumerate() {
            if rule_index.insert(rule.id.clone(), pos).is_some() {
                return Err(KbError::DuplicateRuleId(rule.id.clone()));
            }
            if rule.lhs.is_empty() {
                return Err(KbError::EmptyIngredients {
                    rule: rule.id.clone(),
                });
            }
            if rule.rhs.len() != 1 {
                return Err(KbError::InvariantViolation {
                    rule: rule.id.clone(),
                    count: rule.rhs.len(),
                });
            }
            if let Some(unknown) = rule
                .lhs
                .iter()
                .chain(&rule.rhs)
                .find(|id| !fact_index.contains_key(*id))
            {
                return Err(KbError::UnknownFactReference {
                    rule: rule.id.clone(),
                    fact: unknown.clone(),
                });
            }
            for out in &rule.rhs {
                let owner = &facts[canonical[fact_index[out]]].id;
                producers.entry(owner.clone()).or_default().push(pos);
            }
        }

        let mut kb = Self {
            facts,
            rules,
            fact_index,
            rule_index,
            canonical,
            producers,
        };
        crate::inference::classify_atoms(&mut kb);

        for (description, ids) in kb.duplicate_descriptions() {
            tracing::warn!(%description, ids = ?ids, "KB: fatos com a mesma descrição");
        }
        tracing::debug!(
            facts = kb.facts.len(),
            rules = kb.rules.len(),
            atoms = kb.raw_materials().len(),
            "KB: construída"
        );
        Ok(kb)
    }

    /// Fatos ordenados por descrição.
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Regras na ordem do arquivo.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fact(&self, id: &str) -> Option<&Fact> {
        self.fact_index.get(id).map(|&pos| &self.facts[pos])
    }

    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.rule_index.get(id).map(|&pos| &self.rules[pos])
    }

    /// Id do primeiro fato com a mesma descrição de `id`.
    ///
    /// `None` para ids desconhecidos.
    pub fn canonical_id(&self, id: &str) -> Option<&str> {
        self.fact_index
            .get(id)
            .map(|&pos| self.facts[self.canonical[pos]].id.as_str())
    }

    /// Regras que produzem o item `id`, na ordem do arquivo.
    ///
    /// Ids com a mesma descrição compartilham produtores. Vazio para fatos
    /// atômicos e para ids desconhecidos.
    pub fn producers(&self, id: &str) -> Vec<&Rule> {
        let Some(owner) = self.canonical_id(id) else {
            return Vec::new();
        };
        self.producers
            .get(owner)
            .map(|positions| positions.iter().map(|&pos| &self.rules[pos]).collect())
            .unwrap_or_default()
    }

    /// Todas as matérias-primas, na ordem de exibição.
    pub fn raw_materials(&self) -> Vec<&Fact> {
        self.facts.iter().filter(|f| f.is_atomic()).collect()
    }

    /// Descrições que aparecem sob mais de um id.
    ///
    /// Não é erro: pela igualdade por descrição esses fatos já são o mesmo
    /// item. Serve para apontar arquivos de fatos que precisam de limpeza.
    pub fn duplicate_descriptions(&self) -> Vec<(String, Vec<FactId>)> {
        // os fatos estão ordenados por descrição, então repetições são vizinhas
        let mut out: Vec<(String, Vec<FactId>)> = Vec::new();
        for pair in self.facts.windows(2) {
            if pair[0] != pair[1] {
                continue;
            }
            match out.last_mut() {
                Some((desc, ids)) if *desc == pair[1].description => ids.push(pair[1].id.clone()),
                _ => out.push((
                    pair[0].description.clone(),
                    vec![pair[0].id.clone(), pair[1].id.clone()],
                )),
            }
        }
        out
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Resolve um conjunto de ids para um [`Inventory`].
    pub fn inventory<I, S>(&self, ids: I) -> Result<Inventory<'_>, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut items = HashSet::new();
        for id in ids {
            let id = id.as_ref();
            let fact = self
                .fact(id)
                .ok_or_else(|| EngineError::UnknownFact(id.to_string()))?;
            items.insert(fact);
        }
        Ok(Inventory { items })
    }
}

/// Itens disponíveis ao jogador, comparados por descrição.
///
/// Dois ids com a mesma descrição contam como o mesmo item.
#[derive(Clone, Debug, Default)]
pub struct Inventory<'kb> {
    items: HashSet<&'kb Fact>,
}

impl<'kb> Inventory<'kb> {
    pub fn contains(&self, fact: &Fact) -> bool {
        self.items.contains(fact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn torch_facts() -> Vec<Fact> {
        vec![
            Fact::new("f1", "Log"),
            Fact::new("f2", "Plank"),
            Fact::new("f3", "Stick"),
            Fact::new("f4", "Torch"),
            Fact::new("f5", "Coal"),
        ]
    }

    fn torch_rules() -> Vec<Rule> {
        vec![
            Rule::new("r1", "Log -> Plank", ["f1"], ["f2"]),
            Rule::new("r2", "Plank -> Stick", ["f2"], ["f3"]),
            Rule::new("r3", "Stick, Coal -> Torch", ["f3", "f5"], ["f4"]),
        ]
    }

    #[test]
    fn facts_sorted_by_description_rules_keep_file_order() {
        let kb = KnowledgeBase::build(torch_facts(), torch_rules()).unwrap();
        let names: Vec<&str> = kb.facts().iter().map(|f| f.description.as_str()).collect();
        assert_eq!(names, ["Coal", "Log", "Plank", "Stick", "Torch"]);
        let ids: Vec<&str> = kb.rules().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["r1", "r2", "r3"]);
    }

    #[test]
    fn atomicity_matches_producer_index() {
        let kb = KnowledgeBase::build(torch_facts(), torch_rules()).unwrap();
        for fact in kb.facts() {
            let produced = kb.rules().iter().any(|r| r.rhs.contains(&fact.id));
            assert_eq!(fact.is_atomic(), !produced, "fact {}", fact.id);
        }
        let raw: Vec<&str> = kb.raw_materials().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(raw, ["f5", "f1"]);
    }

    #[test]
    fn producers_follow_rule_order() {
        let mut rules = torch_rules();
        rules.push(Rule::new("r4", "Coal -> Stick", ["f5"], ["f3"]));
        let kb = KnowledgeBase::build(torch_facts(), rules).unwrap();
        let ids: Vec<&str> = kb.producers("f3").iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["r2", "r4"]);
        assert!(kb.producers("f1").is_empty());
        assert!(kb.producers("nope").is_empty());
    }

    #[test]
    fn rejects_unknown_fact_reference() {
        let mut rules = torch_rules();
        rules.push(Rule::new("r9", "Ghost -> Torch", ["f99"], ["f4"]));
        let err = KnowledgeBase::build(torch_facts(), rules).err().unwrap();
        assert_eq!(
            err,
            KbError::UnknownFactReference {
                rule: "r9".into(),
                fact: "f99".into()
            }
        );
    }

    #[test]
    fn rejects_unknown_output() {
        let rules = vec![Rule::new("r1", "Log -> ?", ["f1"], ["f42"])];
        let err = KnowledgeBase::build(torch_facts(), rules).err().unwrap();
        assert!(matches!(err, KbError::UnknownFactReference { fact, .. } if fact == "f42"));
    }

    #[test]
    fn rejects_multi_output_rule() {
        let rules = vec![Rule::new("r1", "Log -> Plank, Stick", ["f1"], ["f2", "f3"])];
        let err = KnowledgeBase::build(torch_facts(), rules).err().unwrap();
        assert_eq!(
            err,
            KbError::InvariantViolation {
                rule: "r1".into(),
                count: 2
            }
        );
    }

    #[test]
    fn rejects_empty_lhs_and_rhs() {
        let empty: [&str; 0] = [];
        let no_lhs = vec![Rule::new("r1", "-> Plank", empty, ["f2"])];
        assert!(matches!(
            KnowledgeBase::build(torch_facts(), no_lhs),
            Err(KbError::EmptyIngredients { .. })
        ));
        let no_rhs = vec![Rule::new("r1", "Log ->", ["f1"], empty)];
        assert!(matches!(
            KnowledgeBase::build(torch_facts(), no_rhs),
            Err(KbError::InvariantViolation { count: 0, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut facts = torch_facts();
        facts.push(Fact::new("f1", "Other Log"));
        assert_eq!(
            KnowledgeBase::build(facts, torch_rules()).err(),
            Some(KbError::DuplicateFactId("f1".into()))
        );

        let mut rules = torch_rules();
        rules.push(Rule::new("r1", "Coal -> Stick", ["f5"], ["f3"]));
        assert_eq!(
            KnowledgeBase::build(torch_facts(), rules).err(),
            Some(KbError::DuplicateRuleId("r1".into()))
        );
    }

    #[test]
    fn duplicate_descriptions_are_reported_not_rejected() {
        let mut facts = torch_facts();
        facts.push(Fact::new("f6", "Plank"));
        facts.push(Fact::new("f7", "Plank"));
        let kb = KnowledgeBase::build(facts, torch_rules()).unwrap();
        let dups = kb.duplicate_descriptions();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].0, "Plank");
        assert_eq!(dups[0].1.len(), 3);
    }

    #[test]
    fn same_description_shares_canonical_id_and_producers() {
        let mut facts = torch_facts();
        facts.push(Fact::new("f6", "Plank"));
        let kb = KnowledgeBase::build(facts, torch_rules()).unwrap();

        assert_eq!(kb.canonical_id("f6"), Some("f2"));
        assert_eq!(kb.canonical_id("f2"), Some("f2"));
        assert_eq!(kb.canonical_id("nope"), None);
        // r1 produz f2, e portanto também o f6
        let ids: Vec<&str> = kb.producers("f6").iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["r1"]);
        assert!(!kb.fact("f6").unwrap().is_atomic());
    }

    #[test]
    fn inventory_merges_by_description_and_rejects_unknown_ids() {
        let mut facts = torch_facts();
        facts.push(Fact::new("f6", "Log"));
        let kb = KnowledgeBase::build(facts, torch_rules()).unwrap();

        let inv = kb.inventory(["f6", "f5"]).unwrap();
        assert!(inv.contains(kb.fact("f1").unwrap()));
        assert!(inv.contains(kb.fact("f5").unwrap()));
        assert!(!inv.contains(kb.fact("f2").unwrap()));

        assert_eq!(
            kb.inventory(["f1", "f77"]).err(),
            Some(EngineError::UnknownFact("f77".into()))
        );
    }
}

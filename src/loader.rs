//! # Loader — Leitura dos Arquivos de Fatos e Regras
//!
//! Converte os dois arquivos de texto em registros [`Fact`] e [`Rule`] e
//! monta a [`KnowledgeBase`].
//!
//! ## Formato
//!
//! ```text
//! facts.txt:  f1; Log;
//!             f2; Plank;
//!
//! rules.txt:  r1; f1; f2; 1; Log -> Plank
//!             r3; f3, f5; f4; 1; Stick, Coal -> Torch
//! ```
//!
//! - Fato: exatamente 3 campos separados por `;` (o terceiro é reservado)
//! - Regra: exatamente 5 campos — id, ingredientes (separados por vírgula),
//!   produto, peso (sempre `1`, ignorado), descrição
//! - Linhas em branco são ignoradas; os campos passam por `trim`
//!
//! Uma linha malformada aborta a carga inteira com [`LoadError`].

use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::config::Config;
use crate::core::{Fact, KnowledgeBase, Rule};

/// Linha que não segue o formato. `line` começa em 1.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("line {line}: invalid fact: {content}")]
    MalformedFact { line: usize, content: String },

    #[error("line {line}: invalid rule: {content}")]
    MalformedRule { line: usize, content: String },
}

/// Lê os dois arquivos e constrói a KB.
///
/// # Erros
///
/// Falha de leitura, [`LoadError`] ou [`KbError`](crate::core::error::KbError),
/// sempre com o caminho do arquivo no contexto.
pub fn load_kb(config: &Config) -> Result<KnowledgeBase> {
    let facts = read(&config.facts_path, parse_facts)?;
    let rules = read(&config.rules_path, parse_rules)?;
    tracing::info!(
        facts = facts.len(),
        rules = rules.len(),
        facts_path = %config.facts_path.display(),
        rules_path = %config.rules_path.display(),
        "Arquivos carregados"
    );
    let kb = KnowledgeBase::build(facts, rules).context("Knowledge base rejected")?;
    Ok(kb)
}

fn read<T>(
    path: &Path,
    parse: impl Fn(&str) -> std::result::Result<Vec<T>, LoadError>,
) -> Result<Vec<T>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Interpreta o conteúdo de um arquivo de fatos.
pub fn parse_facts(text: &str) -> std::result::Result<Vec<Fact>, LoadError> {
    lines(text)
        .map(|(line, content)| match fields(content).as_slice() {
            [id, desc, _] if !id.is_empty() && !desc.is_empty() => Ok(Fact::new(*id, *desc)),
            _ => Err(LoadError::MalformedFact {
                line,
                content: content.to_string(),
            }),
        })
        .collect()
}

/// Interpreta o conteúdo de um arquivo de regras.
pub fn parse_rules(text: &str) -> std::result::Result<Vec<Rule>, LoadError> {
    lines(text)
        .map(|(line, content)| match fields(content).as_slice() {
            [id, lhs, rhs, _weight, desc] if !id.is_empty() => Ok(Rule::new(
                *id,
                *desc,
                ids(lhs),
                ids(rhs),
            )),
            _ => Err(LoadError::MalformedRule {
                line,
                content: content.to_string(),
            }),
        })
        .collect()
}

/// Linhas não vazias com número (1-based).
fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| (i + 1, l))
}

fn fields(line: &str) -> Vec<&str> {
    line.split(';').map(str::trim).collect()
}

fn ids(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_facts_skipping_blank_lines() {
        let facts = parse_facts("f1; Log;\n\n  \nf2;  Oak Plank ;\n").unwrap();
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[1].id, "f2");
        assert_eq!(facts[1].description, "Oak Plank");
    }

    #[test]
    fn fact_with_wrong_field_count_reports_line() {
        let err = parse_facts("f1; Log;\nf2; Plank\n").unwrap_err();
        assert_eq!(
            err,
            LoadError::MalformedFact {
                line: 2,
                content: "f2; Plank".into()
            }
        );
        assert!(parse_facts("f1; Log; x; y\n").is_err());
    }

    #[test]
    fn parses_rule_fields() {
        let rules = parse_rules("r3; f3, f5; f4; 1; Stick, Coal -> Torch\n").unwrap();
        let rule = &rules[0];
        assert_eq!(rule.id, "r3");
        assert_eq!(rule.lhs, ["f3", "f5"]);
        assert_eq!(rule.rhs, ["f4"]);
        assert_eq!(rule.description, "Stick, Coal -> Torch");
    }

    #[test]
    fn multi_output_rule_parses_but_kb_rejects_it() {
        let rules = parse_rules("r1; f1; f2, f3; 1; Log -> Plank, Stick\n").unwrap();
        assert_eq!(rules[0].rhs.len(), 2);
        let facts = parse_facts("f1; Log;\nf2; Plank;\nf3; Stick;\n").unwrap();
        assert!(KnowledgeBase::build(facts, rules).is_err());
    }

    #[test]
    fn rule_with_wrong_field_count_is_rejected() {
        let err = parse_rules("r1; f1; f2; 1; ok\nr2; f2; f3; oops\n").unwrap_err();
        assert!(matches!(err, LoadError::MalformedRule { line: 2, .. }));
    }

    #[test]
    fn load_kb_reports_missing_file() {
        let config = Config {
            facts_path: "does/not/exist/facts.txt".into(),
            ..Config::default()
        };
        let err = load_kb(&config).err().unwrap();
        assert!(format!("{err:#}").contains("does/not/exist/facts.txt"));
    }

    #[test]
    fn bundled_knowledge_base_loads() {
        let facts = parse_facts(include_str!("../data/facts.txt")).unwrap();
        let rules = parse_rules(include_str!("../data/rules.txt")).unwrap();
        let kb = KnowledgeBase::build(facts, rules).unwrap();
        assert!(kb.fact_count() > 0);
        assert!(kb.duplicate_descriptions().is_empty());
    }
}

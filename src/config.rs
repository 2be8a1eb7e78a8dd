//! Configuração por variáveis de ambiente.
//!
//! | Variável | Padrão |
//! |----------|--------|
//! | `CRAFTSYS_FACTS` | `data/facts.txt` |
//! | `CRAFTSYS_RULES` | `data/rules.txt` |
//! | `CRAFTSYS_ADDR` | `0.0.0.0:3000` |
//!
//! O nível de log segue `RUST_LOG` (ver `main`).

use std::path::PathBuf;

const DEFAULT_FACTS: &str = "data/facts.txt";
const DEFAULT_RULES: &str = "data/rules.txt";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Arquivo de fatos (`id; descrição;`).
    pub facts_path: PathBuf,
    /// Arquivo de regras (`id; ingredientes; produto; peso; descrição`).
    pub rules_path: PathBuf,
    /// Endereço do servidor web.
    pub addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            facts_path: PathBuf::from(DEFAULT_FACTS),
            rules_path: PathBuf::from(DEFAULT_RULES),
            addr: DEFAULT_ADDR.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de consulta; valores
    /// vazios contam como ausentes.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            facts_path: get("CRAFTSYS_FACTS").map(PathBuf::from).unwrap_or(defaults.facts_path),
            rules_path: get("CRAFTSYS_RULES").map(PathBuf::from).unwrap_or(defaults.rules_path),
            addr: get("CRAFTSYS_ADDR").unwrap_or(defaults.addr),
        }
    }
}

//! # Módulo Core — O Modelo de Conhecimento
//!
//! Os tipos sobre os quais todo o motor raciocina:
//!
//! - [`Fact`] — um item (matéria-prima ou fabricado)
//! - [`Rule`] — uma receita: ingredientes → produto
//! - [`KnowledgeBase`] — fatos + regras + índice de produtores, imutável após a carga
//! - [`Inventory`] — os itens que o jogador já tem
//! - [`KbError`](error::KbError) / [`EngineError`] — falhas estruturais e de consulta
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
//! let inventory = kb.inventory(["f1"])?;
//! ```

pub mod error;
pub mod fact;
pub mod knowledge_base;
pub mod rule;

pub use error::EngineError;
pub use fact::{Fact, FactId};
pub use knowledge_base::{Inventory, KnowledgeBase};
pub use rule::{Rule, RuleId};

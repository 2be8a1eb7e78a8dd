//! # Fact — Um Item do Mundo de Fabricação
//!
//! Um [`Fact`] é qualquer item que pode estar no inventário do jogador:
//! "Tronco", "Tábua", "Tocha". Ele nasce no carregamento do arquivo de fatos
//! e não muda mais, exceto pela flag `atomic`, calculada uma única vez por
//! [`classify_atoms`](crate::inference::classify_atoms).
//!
//! ## Identidade pela Descrição
//!
//! Dois fatos com a **mesma descrição** são o mesmo fato, mesmo com ids
//! diferentes. `PartialEq` e `Hash` olham apenas para `description`:
//!
//! ```text
//! f7; Tábua;   ≡   f12; Tábua;
//! ```
//!
//! Isso mantém coerentes as checagens de pertinência no inventário e a
//! deduplicação de arquivos de fatos mal numerados.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// Alias de tipo para o identificador estável de um [Fact] (ex: `"f12"`).
pub type FactId = String;

/// Item da base de conhecimento.
#[derive(Clone, Debug, Serialize)]
pub struct Fact {
    /// Identificador estável vindo do arquivo (`f1`, `f2`, ...).
    pub id: FactId,
    /// Nome legível, usado também como identidade para igualdade.
    pub description: String,
    /// `true` se nenhuma regra produz este fato (matéria-prima).
    pub(crate) atomic: bool,
}

impl Fact {
    /// Cria um fato ainda não classificado (`atomic == false`).
    pub fn new(id: impl Into<FactId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            atomic: false,
        }
    }

    /// Matéria-prima? Só é confiável depois da construção da KB.
    pub fn is_atomic(&self) -> bool {
        self.atomic
    }
}

impl PartialEq for Fact {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
    }
}

impl Eq for Fact {}

impl Hash for Fact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.description.hash(state);
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

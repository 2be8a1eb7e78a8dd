//! # Módulo Inference — O Motor de Fabricação
//!
//! Responde à pergunta "consigo fabricar X com o que tenho?" de dois jeitos
//! complementares:
//!
//! | Modo | Direção | Entrada | Saída |
//! |------|---------|---------|-------|
//! | [`forward`] | itens → alvo | inventário + alvo opcional | [`ForwardResult`](forward::ForwardResult) |
//! | [`build_proof`] + [`evaluate_proof`] | alvo → itens | alvo + inventário | [`BackwardResult`](evaluate::BackwardResult) |
//!
//! Tudo aqui é computação pura sobre uma `&KnowledgeBase`: nenhuma I/O,
//! nenhum estado compartilhado. A única mutação da KB é
//! [`classify_atoms`], feita uma vez durante a construção.
//!
//! ## Exemplo
//!
//! ```text
//! Fatos:  f1 Log (atômico), f5 Coal (atômico), f2 Plank, f3 Stick, f4 Torch
//! Regras: r1 {f1}→f2   r2 {f2}→f3   r3 {f3,f5}→f4
//!
//! forward({f1,f5}, f4)            → sucesso, [r1, r2, r3]
//! evaluate(build(f4), {f1,f5})    → sucesso, [r1, r2, r3]
//! forward({f5}, f4)               → falha
//! ```

pub mod atoms;
pub mod evaluate;
pub mod forward;
pub mod proof;

pub use atoms::classify_atoms;
pub use evaluate::evaluate_proof;
pub use forward::forward;
pub use proof::build_proof;

//! ECS Components для бойцов арены
//!
//! Организация по доменам:
//! - actor: базовые характеристики (role, health, spawn anchor, capabilities)
//!
//! Combat-, AI- и match-компоненты живут в своих модулях (combat, ai, director).

pub mod actor;

// Re-exports для удобного импорта
pub use actor::*;

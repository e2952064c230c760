//! Errors raised while building a world. The per-tick path never returns
//! these; it logs and carries on instead.

use thiserror::Error;

use crate::enums::TemplateKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkirmishError {
    #[error("unknown template `{0}`")]
    UnknownTemplate(String),
    #[error("template `{name}` is a {actual} template, expected {expected}")]
    WrongTemplateKind {
        name: String,
        expected: TemplateKind,
        actual: TemplateKind,
    },
    #[error("tank template `{0}` has no tank statistics")]
    MissingTankStats(String),
    #[error("template `{0}` is already registered")]
    DuplicateTemplate(String),
}

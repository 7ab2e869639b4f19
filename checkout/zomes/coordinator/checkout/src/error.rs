use hdk::prelude::*;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectorError {
    // The picker only offers addresses drawn from the candidate set
    #[error("Address '{street}' is not one of the offered candidates")]
    NotACandidate { street: String },
}

impl From<SelectorError> for WasmError {
    fn from(e: SelectorError) -> Self {
        wasm_error!(WasmErrorInner::Guest(e.to_string()))
    }
}

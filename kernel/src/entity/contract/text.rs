use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ContractText(String);

impl ContractText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

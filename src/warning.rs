//! Soft diagnostics about documentation quality. Never fatal.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocWarning {
    #[error("no docstring found for {unit}")]
    MissingDocstring { unit: String },

    #[error("argument `{name}` of {unit} is not documented")]
    UndocumentedArgument { unit: String, name: String },

    #[error("return value of {unit} is not documented")]
    UndocumentedReturn { unit: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let w = DocWarning::UndocumentedArgument {
            unit: "mod.add".to_string(),
            name: "b".to_string(),
        };
        assert_eq!(w.to_string(), "argument `b` of mod.add is not documented");
        let w = DocWarning::MissingDocstring {
            unit: "mod.helper".to_string(),
        };
        assert_eq!(w.to_string(), "no docstring found for mod.helper");
    }
}

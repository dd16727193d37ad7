//! Command-line method argument.

use std::fmt;
use std::str::FromStr;

use routefinder_lib::Strategy;

/// A method name as typed by the user together with the strategy it resolves to.
///
/// The label is kept so output echoes the alias the user chose (`CUS1`
/// rather than `UCS`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodArg {
    pub label: String,
    pub strategy: Strategy,
}

impl MethodArg {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            label: strategy.code().to_string(),
            strategy,
        }
    }
}

impl fmt::Display for MethodArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Value parser for `clap`: resolves aliases case-insensitively.
///
/// The error message lists every accepted name so it doubles as usage help.
pub fn parse_method(value: &str) -> Result<MethodArg, String> {
    match Strategy::from_str(value) {
        Ok(strategy) => Ok(MethodArg {
            label: value.trim().to_uppercase(),
            strategy,
        }),
        Err(err) => Err(format!("{err}\n\n{}", accepted_methods())),
    }
}

/// Multi-line listing of methods and their aliases.
pub fn accepted_methods() -> String {
    let mut listing = String::from("Available methods:");
    for strategy in Strategy::ALL {
        let names: Vec<&str> = strategy.aliases().collect();
        listing.push_str(&format!(
            "\n  {:<24} {}",
            names.join(", "),
            strategy.description()
        ));
    }
    listing
}

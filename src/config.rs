//! Translation settings.

use std::path::Path;

/// Suffix appended to an output name to form its storage wire.
pub const DEFAULT_WIRE_SUFFIX: &str = "wire";

/// Module name used when none can be derived.
pub const DEFAULT_MODULE_NAME: &str = "netlist";

/// Timescale directive written at the top of every module.
pub const DEFAULT_TIMESCALE: &str = "1ns / 1ps";

/// Configuration for one translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateConfig {
    /// Name of the generated Verilog module.
    pub module_name: String,
    /// Suffix for synthesized storage wires.
    pub wire_suffix: String,
    /// Argument of the `` `timescale`` directive.
    pub timescale: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            module_name: DEFAULT_MODULE_NAME.to_string(),
            wire_suffix: DEFAULT_WIRE_SUFFIX.to_string(),
            timescale: DEFAULT_TIMESCALE.to_string(),
        }
    }
}

impl TranslateConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration whose module is named after the output file.
    pub fn for_output(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::default().with_module_name(module_name_from(&stem))
    }

    /// Set the module name.
    pub fn with_module_name(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = module_name.into();
        self
    }

    /// Set the storage-wire suffix.
    pub fn with_wire_suffix(mut self, wire_suffix: impl Into<String>) -> Self {
        self.wire_suffix = wire_suffix.into();
        self
    }

    /// Set the timescale directive argument.
    pub fn with_timescale(mut self, timescale: impl Into<String>) -> Self {
        self.timescale = timescale.into();
        self
    }
}

/// Turn arbitrary text into a legal Verilog identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_`, and a leading digit gets a
/// `_` prefix. Empty input maps to [`DEFAULT_MODULE_NAME`].
pub fn module_name_from(text: &str) -> String {
    let mut name: String = text
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.is_empty() {
        return DEFAULT_MODULE_NAME.to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

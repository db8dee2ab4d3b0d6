//! WASM bindings for Dpgen Core.
//!
//! This module exposes the translator to JavaScript so netlists can be
//! converted in the browser.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { translate_netlist } from 'dpgen_core';
//!
//! await init();
//!
//! const netlist = `
//!   input Int8 a, b
//!   output Int8 c
//!   c = a + b
//! `;
//!
//! const verilog = translate_netlist(netlist, "adder");
//! ```

use wasm_bindgen::prelude::*;

use crate::config::TranslateConfig;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Translate a netlist into a Verilog module named `module_name`.
///
/// Errors are returned as strings naming the failure class.
#[wasm_bindgen]
pub fn translate_netlist(netlist: &str, module_name: &str) -> Result<String, JsValue> {
    let config = TranslateConfig::new().with_module_name(module_name);
    crate::translate(netlist, &config)
        .map_err(|e| JsValue::from_str(&format!("{}: {}", e.class(), e)))
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

use wasm_bindgen::prelude::*;

// Binding for console.log so diagnostics land in the browser console
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    pub fn warn(s: &str);
}

// Note: the console_log!/console_warn! macros live in lib.rs

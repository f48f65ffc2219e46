use std::fmt;

use wasm_bindgen::prelude::*;


pub type JsResult<T> = Result<T, JsValue>;

// Optimization potential: Remove or shrink the panic hook when the client is stable.
pub fn set_panic_hook() {
    use std::panic;
    use std::sync::Once;
    static SET_HOOK: Once = Once::new();
    SET_HOOK.call_once(|| {
        // Log to the browser developer console. For more details see
        // https://github.com/rustwasm/console_error_panic_hook#readme
        panic::set_hook(Box::new(console_error_panic_hook::hook));
    });
}

#[wasm_bindgen(getter_with_clone)]
pub struct RustError {
    pub message: String,
}

#[macro_export]
macro_rules! rust_error {
    ($($arg:tt)*) => {
        wasm_bindgen::JsValue::from(
            $crate::web_error_handling::RustError{ message: format!($($arg)*) }
        )
    };
}

// Callbacks invoked by the widget or the socket have nobody to return an error to.
pub fn log_js_error(context: impl fmt::Display, result: JsResult<()>) {
    if let Err(err) = result {
        log::error!("{}: {:?}", context, err);
    }
}

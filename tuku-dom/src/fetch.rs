use tuku::error::Error;
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::JsFuture;

use crate::js_error_message;

/// Fetch a text resource, aborting after `timeout_ms` .
pub(crate) async fn fetch_text(
    window: web_sys::Window,
    url: String,
    timeout_ms: u32,
) -> Result<String, Error> {
    let load_error = |msg: String| Error::ResourceLoad {
        url: url.clone(),
        msg,
    };
    let controller =
        web_sys::AbortController::new().map_err(|err| load_error(js_error_message(&err)))?;
    let init = web_sys::RequestInit::new();
    init.set_signal(Some(&controller.signal()));
    let abort = Closure::once_into_js(move || controller.abort());
    let timer = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            abort.unchecked_ref(),
            timeout_ms.min(i32::MAX as u32) as i32,
        )
        .map_err(|err| load_error(js_error_message(&err)))?;
    let ret = async {
        let response: web_sys::Response =
            JsFuture::from(window.fetch_with_str_and_init(&url, &init))
                .await
                .map_err(|err| load_error(js_error_message(&err)))?
                .dyn_into()
                .map_err(|_| load_error("not a response".into()))?;
        if !response.ok() {
            return Err(load_error(format!("HTTP error! status: {}", response.status())));
        }
        let text = response
            .text()
            .map_err(|err| load_error(js_error_message(&err)))?;
        let text = JsFuture::from(text)
            .await
            .map_err(|err| load_error(js_error_message(&err)))?;
        text.as_string()
            .ok_or_else(|| load_error("response body is not text".into()))
    }
    .await;
    // the timeout also covers reading the body
    window.clear_timeout_with_handle(timer);
    ret
}

//! PixiJS implementation of the graphics capability.

use js_sys::{Object, Reflect};
use stage_core::{ApplicationOptions, BackendError, DestroyOptions, GraphicsBackend, ResizeTarget};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

#[wasm_bindgen(module = "pixi.js")]
extern "C" {
    /// A `PIXI.Application` living on the JS side.
    #[wasm_bindgen(js_name = Application)]
    #[derive(Debug, Clone)]
    pub type PixiApplication;

    #[wasm_bindgen(constructor, catch, js_class = "Application")]
    fn new(options: &Object) -> Result<PixiApplication, JsValue>;

    #[wasm_bindgen(method, js_class = "Application")]
    fn destroy(this: &PixiApplication, remove_view: bool, release_context: bool);
}

/// Creates `PIXI.Application`s bound to an `HtmlCanvasElement`.
#[derive(Debug, Default)]
pub struct PixiBackend;

impl GraphicsBackend for PixiBackend {
    type Canvas = HtmlCanvasElement;
    type Application = PixiApplication;

    fn create(
        &mut self,
        options: &ApplicationOptions<'_, HtmlCanvasElement>,
    ) -> Result<PixiApplication, BackendError> {
        let js_options = to_js_options(options)?;
        PixiApplication::new(&js_options).map_err(js_error)
    }

    fn destroy(&mut self, application: PixiApplication, options: DestroyOptions) {
        application.destroy(options.remove_view, options.release_context);
    }
}

fn to_js_options(options: &ApplicationOptions<'_, HtmlCanvasElement>) -> Result<Object, BackendError> {
    let obj = Object::new();
    let resize_to: JsValue = match options.resize_to {
        ResizeTarget::Window => web_sys::window()
            .map(JsValue::from)
            .ok_or_else(|| BackendError::new("no window to resize to"))?,
    };
    let fields: [(&str, JsValue); 5] = [
        ("view", JsValue::from(options.view.clone())),
        ("autoStart", options.auto_start.into()),
        ("backgroundAlpha", options.background_alpha.into()),
        ("antialias", options.antialias.into()),
        ("resizeTo", resize_to),
    ];
    for (key, value) in fields {
        Reflect::set(&obj, &JsValue::from_str(key), &value).map_err(js_error)?;
    }
    Ok(obj)
}

fn js_error(err: JsValue) -> BackendError {
    let message = err
        .as_string()
        .or_else(|| {
            Reflect::get(&err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{err:?}"));
    BackendError::new(message)
}

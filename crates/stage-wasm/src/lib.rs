//! WASM bridge for Stage — exposes the shared surface and the character
//! render table to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The owning room component
//! calls `setCanvas` + `initApp` on mount and `destroyApp` on unmount;
//! character components read `getSharedApp` and `characterRenderConfig`.

mod console;
mod local;
mod pixi;

pub use local::{FlagListener, LocalStage};
pub use pixi::{PixiApplication, PixiBackend};

use js_sys::Function;
use stage_core::{CharacterRenderConfig, SubscriptionId};
use std::collections::BTreeMap;
use std::error::Error;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

// The wasm host is single-threaded, so this thread's stage is the one
// process-wide surface.
thread_local! {
    static STAGE: LocalStage<PixiBackend, Function> = LocalStage::new(PixiBackend);
}

// ─── Surface lifecycle ───────────────────────────────────────────────────

/// Store the `<canvas>` the shared application should draw into.
#[wasm_bindgen(js_name = setCanvas)]
pub fn set_canvas(canvas: HtmlCanvasElement) {
    console::setup();
    STAGE.with(|s| s.set_canvas(canvas));
}

/// Forget the stored canvas (e.g. when its element unmounts).
#[wasm_bindgen(js_name = clearCanvas)]
pub fn clear_canvas() {
    STAGE.with(|s| s.clear_canvas());
}

/// Create the shared application. Returns `true` only if this call created it;
/// repeated calls and calls before `setCanvas` are no-ops.
#[wasm_bindgen(js_name = initApp)]
pub fn init_app() -> bool {
    console::setup();
    STAGE.with(|s| s.init())
}

/// Destroy the shared application. Safe to call any number of times.
#[wasm_bindgen(js_name = destroyApp)]
pub fn destroy_app() -> bool {
    STAGE.with(|s| s.destroy())
}

#[wasm_bindgen(js_name = isAppInitialized)]
pub fn is_app_initialized() -> bool {
    STAGE.with(|s| s.is_initialized())
}

/// The live `PIXI.Application`, or `undefined` before `initApp`.
#[wasm_bindgen(js_name = getSharedApp)]
pub fn get_shared_app() -> Option<PixiApplication> {
    STAGE.with(|s| s.shared_application())
}

/// Call `listener(initialized)` whenever the flag flips. Returns a handle
/// for `offAppInitializedChange`.
#[wasm_bindgen(js_name = onAppInitializedChange)]
pub fn on_app_initialized_change(listener: Function) -> u32 {
    STAGE.with(|s| s.subscribe(listener)).as_u32()
}

#[wasm_bindgen(js_name = offAppInitializedChange)]
pub fn off_app_initialized_change(handle: u32) -> bool {
    STAGE.with(|s| s.unsubscribe(SubscriptionId::from_raw(handle)))
}

// ─── Render configuration ────────────────────────────────────────────────

/// Render entry for `id` as JSON:
/// `{"anchor":{"x":..,"y":..},"position":{..},"scale":{..},"mouthParam":".."}`.
/// Throws for unknown characters.
#[wasm_bindgen(js_name = characterRenderConfig)]
pub fn character_render_config(id: &str) -> Result<String, JsError> {
    render_config_json(CharacterRenderConfig::builtin(), id).map_err(|e| JsError::new(&e.to_string()))
}

/// The whole table as a JSON object keyed by character id.
#[wasm_bindgen(js_name = characterRenderConfigs)]
pub fn character_render_configs() -> Result<String, JsError> {
    render_table_json(CharacterRenderConfig::builtin()).map_err(|e| JsError::new(&e.to_string()))
}

#[wasm_bindgen(js_name = characterIds)]
pub fn character_ids() -> Vec<String> {
    CharacterRenderConfig::builtin()
        .ids()
        .map(|id| id.as_str().to_string())
        .collect()
}

// ─── Logging ─────────────────────────────────────────────────────────────

/// Set the console log level (`"off"`, `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`).
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsError> {
    console::setup();
    let filter = console::parse_level(level)
        .ok_or_else(|| JsError::new(&format!("unknown log level '{level}'")))?;
    log::set_max_level(filter);
    Ok(())
}

fn render_config_json(config: &CharacterRenderConfig, id: &str) -> Result<String, Box<dyn Error>> {
    let entry = config.lookup(id)?;
    Ok(serde_json::to_string(entry)?)
}

fn render_table_json(config: &CharacterRenderConfig) -> Result<String, Box<dyn Error>> {
    let table: BTreeMap<&str, _> = config.iter().map(|(id, entry)| (id.as_str(), entry)).collect();
    Ok(serde_json::to_string(&table)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    #[test]
    fn aria_json_shape() {
        let json = render_config_json(CharacterRenderConfig::builtin(), "aria").unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            json!({
                "anchor": {"x": 0.86, "y": 0.43},
                "position": {"x": 1.5, "y": 1.2},
                "scale": {"x": 0.54, "y": 0.54},
                "mouthParam": "ParamMouthOpenY",
            })
        );
    }

    #[test]
    fn unknown_character_is_an_error() {
        let err = render_config_json(CharacterRenderConfig::builtin(), "nonexistent").unwrap_err();
        assert_eq!(
            err.to_string(),
            "no render configuration for character 'nonexistent'"
        );
    }

    #[test]
    fn table_json_is_keyed_by_id() {
        let json = render_table_json(CharacterRenderConfig::builtin()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["aria", "eidon", "sera"]);
        assert_eq!(value["eidon"]["mouthParam"], "ParamMouthOpen");
    }

    #[test]
    fn ids_are_sorted() {
        assert_eq!(character_ids(), vec!["aria", "eidon", "sera"]);
    }
}

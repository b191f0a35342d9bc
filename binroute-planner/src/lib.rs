pub mod comparison;
pub mod form;
pub mod planner;
pub mod views;

use serde::{Deserialize, Serialize};

/// Parameters of the most recent submit.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RouteParams {
    pub bins: u32,
    pub threshold: f64,
}

#[cfg(feature = "browser")]
mod exports {
    use crate::{comparison::Tab, planner::Planner};
    use binroute_structs::config::ClientConfig;
    use once_cell::sync::OnceCell;
    use wasm_bindgen::prelude::*;

    static PLANNER: OnceCell<Planner> = OnceCell::new();

    fn planner() -> Result<&'static Planner, JsValue> {
        PLANNER
            .get()
            .ok_or_else(|| JsValue::from_str("planner is not set up, call setup() first"))
    }

    fn log_status(status: &str) {
        log::info!("{}", status);
        web_sys::console::log_1(&status.into());
    }

    #[wasm_bindgen]
    pub fn setup(api_url: String) {
        console_error_panic_hook::set_once();
        if PLANNER
            .set(Planner::new(&ClientConfig::with_api_url(api_url.clone())))
            .is_ok()
        {
            log_status(&format!("Planner ready against {}", api_url));
        }
    }

    #[wasm_bindgen]
    pub async fn state() -> Result<JsValue, JsValue> {
        let state = planner()?.snapshot().await;
        serde_wasm_bindgen::to_value(&state).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub async fn submit(bins: u32, threshold: f64) -> Result<bool, JsValue> {
        log_status(&format!("Optimizing route for {} bins at {}", bins, threshold));
        Ok(planner()?.submit(bins, threshold).await)
    }

    #[wasm_bindgen]
    pub async fn toggle_comparison() -> Result<bool, JsValue> {
        Ok(planner()?.toggle_comparison().await)
    }

    #[wasm_bindgen]
    pub async fn select_tab(tab: String) -> Result<(), JsValue> {
        let tab = tab.parse::<Tab>().map_err(|e| JsValue::from_str(&e))?;
        planner()?.select_tab(tab).await;
        Ok(())
    }

    #[wasm_bindgen]
    pub async fn open_visualization() -> Result<bool, JsValue> {
        Ok(planner()?.open_visualization().await)
    }

    #[wasm_bindgen]
    pub async fn close_visualization() -> Result<(), JsValue> {
        planner()?.close_visualization().await;
        Ok(())
    }

    #[wasm_bindgen]
    pub async fn dismiss_error() -> Result<(), JsValue> {
        planner()?.dismiss_error().await;
        Ok(())
    }
}

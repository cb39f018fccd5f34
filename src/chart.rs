//! JavaScript interop for Chart.js visualization.
//! Provides Rust bindings to chart helper functions defined in chart_helpers.js.

use ekklesia::api::{DailySales, DashboardSummary};
use log::warn;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/chart_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = renderCheckpointChart)]
    fn render_checkpoint_chart(canvas_id: &str, labels: JsValue, values: JsValue);

    #[wasm_bindgen(js_name = renderSalesChart)]
    fn render_sales_chart(canvas_id: &str, points: JsValue);

    #[wasm_bindgen(js_name = destroyChart)]
    pub fn destroy_chart(canvas_id: &str);
}

/// Bar chart of check-ins per checkpoint, busiest first.
pub fn show_checkpoints(canvas_id: &str, summary: &DashboardSummary) {
    let (labels, values) = summary.checkpoint_series();
    match (
        serde_wasm_bindgen::to_value(&labels),
        serde_wasm_bindgen::to_value(&values),
    ) {
        (Ok(labels), Ok(values)) => render_checkpoint_chart(canvas_id, labels, values),
        _ => warn!("Could not convert checkpoint series for the chart"),
    }
}

/// Line chart of daily sales totals.
pub fn show_sales(canvas_id: &str, sales: &[DailySales]) {
    match serde_wasm_bindgen::to_value(sales) {
        Ok(points) => render_sales_chart(canvas_id, points),
        Err(e) => warn!("Could not convert sales series for the chart: {}", e),
    }
}

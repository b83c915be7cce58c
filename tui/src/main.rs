use anyhow::{Context, Result};

mod app;
mod ui;

const MODEL_PATH: &str = "data/matrix-filler.json";

fn main() -> Result<()> {
    env_logger::init();

    // Load before touching the terminal: a missing or corrupt artifact is
    // fatal and must be reported without opening the form.
    let network = regressor::load(MODEL_PATH)
        .with_context(|| format!("failed to load model from '{MODEL_PATH}'"))?;
    log::info!(
        "model loaded from '{MODEL_PATH}' ({} inputs)",
        network.input_dim()
    );

    app::run::run(network)
}

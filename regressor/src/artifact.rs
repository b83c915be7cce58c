use ndarray::{Array1, Array2};

use crate::{Activation, DenseLayer, Network, RegressorError};

/// Loads the serialized regression network from a JSON artifact.
///
/// Expected shape:
///
/// ```json
/// {
///   "inputs": 12,
///   "layers": [
///     { "n": 12, "m": 8, "weights": [/* n*m */], "biases": [/* m */],
///       "act_fn": "relu" }
///   ]
/// }
/// ```
///
/// `weights` is flat, row-major with `m` rows of `n` values. `act_fn` is
/// `"relu"`, `"sigmoid"` or `null`.
///
/// # Errors
/// Returns `RegressorError::Io` if the file cannot be read and
/// `RegressorError::Artifact` for any structural problem, with a message
/// naming the offending field.
pub fn load(path: &str) -> Result<Network, RegressorError> {
    let content = std::fs::read_to_string(path).map_err(|e| RegressorError::Io {
        path: path.to_string(),
        source: e,
    })?;

    let val: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| RegressorError::Artifact(format!("invalid JSON: {e}")))?;

    let inputs = val["inputs"]
        .as_u64()
        .ok_or_else(|| RegressorError::Artifact("missing inputs".into()))?
        as usize;

    let layers = val["layers"]
        .as_array()
        .ok_or_else(|| RegressorError::Artifact("missing layers array".into()))?
        .iter()
        .enumerate()
        .map(|(i, l)| parse_layer(l, i))
        .collect::<Result<Vec<_>, _>>()?;

    let network = Network::new(layers)?;

    if network.input_dim() != inputs {
        return Err(RegressorError::Artifact(format!(
            "declared inputs: {inputs}, first layer expects {}",
            network.input_dim()
        )));
    }

    Ok(network)
}

fn parse_layer(l: &serde_json::Value, idx: usize) -> Result<DenseLayer, RegressorError> {
    let ctx = |f: &str| RegressorError::Artifact(format!("layer {idx}: {f}"));

    let n = l["n"].as_u64().ok_or_else(|| ctx("missing n"))? as usize;
    let m = l["m"].as_u64().ok_or_else(|| ctx("missing m"))? as usize;
    if n == 0 || m == 0 {
        return Err(ctx("n and m must be positive"));
    }

    let weights = f32_array(&l["weights"]).ok_or_else(|| ctx("missing weights"))?;
    if weights.len() != n * m {
        return Err(ctx(&format!(
            "expected {} weights (n={n} * m={m}), got {}",
            n * m,
            weights.len()
        )));
    }

    let biases = f32_array(&l["biases"]).ok_or_else(|| ctx("missing biases"))?;
    if biases.len() != m {
        return Err(ctx(&format!("expected {m} biases, got {}", biases.len())));
    }

    let act_fn = match l["act_fn"].as_str() {
        Some("relu") => Activation::Relu,
        Some("sigmoid") => Activation::Sigmoid,
        Some(other) => return Err(ctx(&format!("unknown act_fn: {other}"))),
        None => Activation::Linear,
    };

    let weights = Array2::from_shape_vec((m, n), weights)
        .map_err(|e| ctx(&format!("bad weight shape: {e}")))?;

    DenseLayer::new(weights, Array1::from_vec(biases), act_fn)
}

fn f32_array(val: &serde_json::Value) -> Option<Vec<f32>> {
    val.as_array()?
        .iter()
        .map(|v| v.as_f64().map(|f| f as f32))
        .collect()
}

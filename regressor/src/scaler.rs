use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

use crate::RegressorError;

/// Per-column standardizer: zero mean, unit variance.
///
/// Fitted on whatever sample set the caller provides. The form fits it to a
/// single submitted row, which makes every column's standard deviation zero;
/// zero-variance columns get a scale of 1, so transforming the fitted row
/// yields an all-zero vector.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f32>,
    scale: Array1<f32>,
}

impl StandardScaler {
    /// Fits mean and scale to the given samples, one row per sample.
    ///
    /// # Errors
    /// Returns `RegressorError::InvalidInput` if there are no rows or no
    /// columns.
    pub fn fit(samples: ArrayView2<f32>) -> Result<Self, RegressorError> {
        let (rows, cols) = samples.dim();
        if rows == 0 {
            return Err(RegressorError::InvalidInput("no samples to fit"));
        }
        if cols == 0 {
            return Err(RegressorError::InvalidInput("samples have no features"));
        }

        let mean = samples.mean_axis(Axis(0)).ok_or(RegressorError::InvalidInput(
            "no samples to fit",
        ))?;

        // Population standard deviation (ddof = 0).
        let mut scale = Array1::<f32>::zeros(cols);
        for (j, col) in samples.axis_iter(Axis(1)).enumerate() {
            let m = mean[j];
            let var = col.iter().map(|v| (v - m) * (v - m)).sum::<f32>() / rows as f32;
            let std = var.sqrt();
            scale[j] = if std == 0.0 { 1.0 } else { std };
        }

        Ok(Self { mean, scale })
    }

    /// Standardizes one sample with the fitted mean and scale.
    ///
    /// # Errors
    /// Returns `RegressorError::ShapeMismatch` if `x` does not have one
    /// value per fitted column.
    pub fn transform(&self, x: ArrayView1<f32>) -> Result<Array1<f32>, RegressorError> {
        if x.len() != self.mean.len() {
            return Err(RegressorError::ShapeMismatch {
                what: "sample",
                got: x.len(),
                expected: self.mean.len(),
            });
        }
        Ok((&x - &self.mean) / &self.scale)
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::error::SeerError;
use serde::{Deserialize, Serialize};

/// Multivariate normal belief with a row-major dense covariance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MvNormal {
    pub location: Vec<f64>,
    pub covariance: Vec<f64>,
}

impl MvNormal {
    pub fn new(location: Vec<f64>, covariance: Vec<f64>) -> Result<Self, SeerError> {
        let belief = Self {
            location,
            covariance,
        };
        belief.validate()?;
        Ok(belief)
    }

    pub fn dim(&self) -> usize {
        self.location.len()
    }

    pub fn validate(&self) -> Result<(), SeerError> {
        let n = self.location.len();
        if n == 0 {
            return Err(SeerError::dimension_mismatch(
                "location must have length 1 or greater",
            ));
        }
        if self.covariance.len() != n * n {
            return Err(SeerError::dimension_mismatch(format!(
                "covariance length ({}) must equal squared location length ({})",
                self.covariance.len(),
                n * n
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MvNormal;

    #[test]
    fn covariance_must_be_square_of_location() {
        let belief = MvNormal::new(vec![0.0, 1.0], vec![1.0, 0.0, 0.0, 1.0])
            .expect("2-d belief should be valid");
        assert_eq!(belief.dim(), 2);

        let err = MvNormal::new(vec![0.0, 1.0], vec![1.0, 0.0, 0.0])
            .expect_err("short covariance must fail");
        assert!(err.to_string().contains("covariance length (3)"));
        MvNormal::new(Vec::new(), Vec::new()).expect_err("empty belief must fail");
    }
}

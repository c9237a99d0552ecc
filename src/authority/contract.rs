//! The agreement between local predictions and confirmed state.

use crate::error::{BetaError, Result};
use crate::types::Move;

/// Check a local prediction against the authority's confirmed list.
///
/// Every field must match except `is_start`, which only the authority
/// computes and the prediction is allowed to leave stale for one round trip.
/// Returns [`BetaError::PredictionDiverged`] naming the first mismatch.
pub fn check_prediction(predicted: &[Move], confirmed: &[Move]) -> Result<()> {
    if predicted.len() != confirmed.len() {
        return Err(BetaError::PredictionDiverged(format!(
            "predicted {} moves, confirmed {}",
            predicted.len(),
            confirmed.len()
        )));
    }

    for (local, remote) in predicted.iter().zip(confirmed) {
        let field = if local.id != remote.id {
            "id"
        } else if local.order != remote.order {
            "order"
        } else if local.body_part != remote.body_part {
            "body_part"
        } else if local.anchor != remote.anchor {
            "anchor"
        } else if local.annotation != remote.annotation {
            "annotation"
        } else {
            continue;
        };

        return Err(BetaError::PredictionDiverged(format!(
            "{} differs at order {} (predicted {}, confirmed {})",
            field, remote.order, local.id, remote.id
        )));
    }

    Ok(())
}

//! Rendering of prediction results for the terminal session

use crate::attribution::Direction;
use crate::models::inference::PredictionOutcome;
use std::io::{self, Write};

/// Write the prediction block and, when present, the attribution table.
pub fn render<W: Write>(out: &mut W, outcome: &PredictionOutcome) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Prediction: {}", outcome.prediction.label)?;
    writeln!(
        out,
        "Churn probability: {}",
        outcome.prediction.probability_percent()
    )?;

    if let Some(rows) = &outcome.attributions {
        writeln!(out)?;
        writeln!(out, "Top contributing features:")?;
        writeln!(out, "  {:<22} {:>8}  {}", "feature", "score", "direction")?;
        for row in rows {
            writeln!(
                out,
                "  {:<22} {:>8.2}  {}",
                row.feature,
                row.rounded,
                direction_marker(row.direction)
            )?;
        }
    }

    Ok(())
}

fn direction_marker(direction: Direction) -> String {
    match direction {
        Direction::TowardsChurn => format!("^ {}", direction),
        Direction::AwayFromChurn => format!("v {}", direction),
    }
}

use crate::model::{ExtractionResult, TargetRange};
use crate::{Error, Result};

/// Reject result sets with the wrong size, an empty id or a blank title.
pub fn validate(results: &[ExtractionResult], range: &TargetRange) -> Result<()> {
    if results.len() != range.width() {
        return Err(Error::Validation(format!(
            "expected {} posts for range {}, got {}",
            range.width(),
            range,
            results.len()
        )));
    }
    if let Some(r) = results.iter().find(|r| r.id.is_empty()) {
        return Err(Error::Validation(format!("post #{} has an empty id", r.position)));
    }
    if let Some(r) = results.iter().find(|r| r.title.trim().is_empty()) {
        return Err(Error::Validation(format!(
            "post #{} ({}) has an empty title",
            r.position, r.id
        )));
    }
    Ok(())
}

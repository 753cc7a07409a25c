use crate::errors::StageFailure;

/// Retries a failed pipeline stage this many times before giving up.
pub const STAGE_RETRIES: u32 = 1;

/// Runs `op`, re-running it up to `retries` more times while it fails.
///
/// Retries are immediate: every stage is in-memory work, so there is nothing
/// to back off from. Intermediate failures are only logged at debug level;
/// the caller sees the final outcome.
pub fn attempt<T, F>(stage: &str, retries: u32, mut op: F) -> Result<T, StageFailure>
where
    F: FnMut() -> Result<T, StageFailure>,
{
    let mut tries = 0;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(failure) if tries < retries => {
                tries += 1;
                tracing::debug!("{} failed ({}), retry {}/{}", stage, failure, tries, retries);
            }
            Err(failure) => {
                tracing::warn!("{} failed after {} attempt(s): {}", stage, tries + 1, failure);
                return Err(failure);
            }
        }
    }
}

//! Control flow for the block executor.

#[derive(Debug)]
pub(crate) enum Flow {
    /// Continue normal execution
    Continue,
    /// Break out of the innermost loop
    Break,
    /// Skip to the next iteration of the innermost loop
    ContinueLoop,
    /// The shared iteration budget ran out; unwind the whole run
    CapHit,
}

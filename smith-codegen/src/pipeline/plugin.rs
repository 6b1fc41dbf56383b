//! Pipeline plugin trait.

use std::sync::Arc;

use eyre::Result;

use super::RoundContext;

/// A plugin that hooks into every phase of every round.
///
/// # Example
///
/// ```ignore
/// struct CountingPlugin(AtomicUsize);
///
/// impl Plugin for CountingPlugin {
///     fn name(&self) -> &'static str { "counting" }
///
///     fn on_after_phase(&self, _phase: &str, _ctx: &mut RoundContext<'_>) -> Result<()> {
///         self.0.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a phase runs. Return an error to abort the round.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut RoundContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes. Return an error to abort the round.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut RoundContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// Lets a caller keep a handle on a plugin it gave to a pipeline.
impl<P: Plugin> Plugin for Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn on_before_phase(&self, phase: &str, ctx: &mut RoundContext<'_>) -> Result<()> {
        (**self).on_before_phase(phase, ctx)
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut RoundContext<'_>) -> Result<()> {
        (**self).on_after_phase(phase, ctx)
    }
}

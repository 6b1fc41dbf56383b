//! Pipeline orchestrator.

use eyre::Result;

use super::{
    Phase, PhaseInfo, Plugin, RoundContext,
    phases::{DiscoverPhase, EmitPhase, ExtractPhase, RecordPhase, ResolvePhase},
};
use crate::{emit::EmitOptions, session::Worklist, symbols::SymbolTable};

/// The round pipeline orchestrator.
///
/// Runs the built-in phases (discover, resolve, extract, emit, record)
/// followed by any user phases, calling plugin hooks before and after each.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new(EmitOptions::default())
///     .plugin(MyPlugin::new())
///     .phase(MyCustomPhase);
///
/// let ctx = pipeline.run(1, &table, &worklist)?;
/// ```
pub struct Pipeline {
    builtin: Vec<Box<dyn Phase>>,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a pipeline whose emit phase renders with `options`.
    pub fn new(options: EmitOptions) -> Self {
        Self {
            builtin: vec![
                Box::new(DiscoverPhase),
                Box::new(ResolvePhase::new()),
                Box::new(ExtractPhase),
                Box::new(EmitPhase::new(options)),
                Box::new(RecordPhase),
            ],
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Every phase in execution order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        self.builtin
            .iter()
            .chain(self.phases.iter())
            .map(|p| p.info())
            .collect()
    }

    /// Run one round over `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase or plugin fails fatally.
    pub fn run<'a>(
        &self,
        round: usize,
        table: &'a SymbolTable,
        worklist: &'a Worklist,
    ) -> Result<RoundContext<'a>> {
        let mut ctx = RoundContext::new(round, table, worklist);

        for phase in self.builtin.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut RoundContext<'_>) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;
        tracing::debug!(
            round = ctx.round,
            phase = phase_name,
            diagnostics = ctx.diagnostics.len(),
            "phase complete"
        );

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(EmitOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use buildsmith_ir::QualifiedName;

    use super::*;
    use crate::{
        pipeline::Diagnostic,
        symbols::{Declaration, DeclaredProperty},
    };

    #[derive(Default)]
    struct CountingPlugin {
        before: AtomicUsize,
        after: AtomicUsize,
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut RoundContext<'_>) -> Result<()> {
            self.before.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut RoundContext<'_>) -> Result<()> {
            self.after.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct CountArtifacts;

    impl Phase for CountArtifacts {
        fn name(&self) -> &'static str {
            "count"
        }

        fn description(&self) -> &'static str {
            "Report the number of artifacts"
        }

        fn run(&self, ctx: &mut RoundContext<'_>) -> Result<()> {
            let message = format!("{} artifact(s)", ctx.artifacts.len());
            ctx.diagnostics.push(Diagnostic::info("count", message));
            Ok(())
        }
    }

    fn person_table() -> SymbolTable {
        SymbolTable::new().with(
            Declaration::new(
                QualifiedName::parse("model::Person").unwrap(),
                "src/model.rs".into(),
            )
            .directive()
            .property(DeclaredProperty::new("name", "String"))
            .property(DeclaredProperty::new("age", "u32")),
        )
    }

    #[test]
    fn test_pipeline_runs_all_phases() {
        let table = person_table();
        let worklist = Worklist::default();

        let ctx = Pipeline::default().run(1, &table, &worklist).unwrap();

        assert_eq!(ctx.candidates.len(), 1);
        assert_eq!(ctx.ready.len(), 1);
        assert_eq!(ctx.contracts.len(), 1);
        assert_eq!(ctx.artifacts.len(), 1);
        assert_eq!(ctx.artifacts[0].output.to_string(), "model::PersonBuilder");
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let table = person_table();
        let worklist = Worklist::default();
        let plugin = Arc::new(CountingPlugin::default());

        let pipeline = Pipeline::default().plugin(plugin.clone());
        pipeline.run(1, &table, &worklist).unwrap();

        assert_eq!(plugin.before.load(Ordering::SeqCst), 5);
        assert_eq!(plugin.after.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_custom_phase_runs_last() {
        let table = person_table();
        let worklist = Worklist::default();
        let pipeline = Pipeline::default().phase(CountArtifacts);

        let names: Vec<_> = pipeline.phase_info().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["discover", "resolve", "extract", "emit", "record", "count"]);

        let ctx = pipeline.run(1, &table, &worklist).unwrap();
        assert_eq!(ctx.diagnostics.last().unwrap().message, "1 artifact(s)");
    }
}

/// Optional side-effect hooks the host registers on a component instance.
///
/// `effects` runs after the first render and after every committed write;
/// `cleanup_effects` runs before each repeat `effects` invocation; `init`
/// runs once, at connect time. Hooks the host never registered are simply
/// skipped.
type Hook = Box<dyn FnMut() + Send>;

#[derive(Default)]
pub struct Lifecycle {
    init: Option<Hook>,
    effects: Option<Hook>,
    cleanup_effects: Option<Hook>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_init(&mut self, hook: impl FnMut() + Send + 'static) {
        self.init = Some(Box::new(hook));
    }

    pub fn on_effects(&mut self, hook: impl FnMut() + Send + 'static) {
        self.effects = Some(Box::new(hook));
    }

    pub fn on_cleanup_effects(&mut self, hook: impl FnMut() + Send + 'static) {
        self.cleanup_effects = Some(Box::new(hook));
    }

    pub(crate) fn run_init(&mut self) {
        if let Some(hook) = &mut self.init {
            hook();
        }
    }

    /// Connect-time effects: no cleanup has anything to undo yet.
    pub(crate) fn run_effects(&mut self) {
        if let Some(hook) = &mut self.effects {
            hook();
        }
    }

    /// Write-time effect cycle: cleanup for the previous invocation first,
    /// then the new one. Cleanup only runs when effects exist at all.
    pub(crate) fn rerun_effects(&mut self) {
        if self.effects.is_none() {
            return;
        }
        if let Some(cleanup) = &mut self.cleanup_effects {
            cleanup();
        }
        if let Some(hook) = &mut self.effects {
            hook();
        }
    }
}

impl core::fmt::Debug for Lifecycle {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        formatter
            .debug_struct("Lifecycle")
            .field("init", &self.init.is_some())
            .field("effects", &self.effects.is_some())
            .field("cleanup_effects", &self.cleanup_effects.is_some())
            .finish()
    }
}

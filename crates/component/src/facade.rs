use anyhow::Error;
use fragment::{DependencyMap, FragmentTree};
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use template::Template;

use crate::lifecycle::Lifecycle;
use crate::state::ReactiveState;
use crate::styles::{shared_stylesheets, Stylesheet};

/// Produces the instance's template from its current state. Supplied by the
/// host at registration time; invoked on every render pass.
pub type TemplateFn = Box<dyn Fn(&ReactiveState) -> Template + Send>;

/// The per-instance facade: owns the live tree, the dependency map, the
/// state record, the lifecycle hooks, and the adopted stylesheets.
///
/// The fragment is created lazily, on the first property write or an
/// explicit [`connect`](Component::connect), and mutated in place on every
/// write after that. Teardown is the host's concern.
pub struct Component {
    tree: FragmentTree,
    template: TemplateFn,
    state: ReactiveState,
    map: DependencyMap,
    mounted: bool,
    lifecycle: Lifecycle,
    adopted: Vec<Stylesheet>,
}

impl Component {
    pub fn new(template: impl Fn(&ReactiveState) -> Template + Send + 'static) -> Self {
        Self {
            tree: FragmentTree::new(),
            template: Box::new(template),
            state: ReactiveState::new(),
            map: DependencyMap::new(),
            mounted: false,
            lifecycle: Lifecycle::new(),
            adopted: Vec::new(),
        }
    }

    pub fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    pub fn tree(&self) -> &FragmentTree {
        &self.tree
    }

    pub fn map(&self) -> &DependencyMap {
        &self.map
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Markup rendering of the live tree, for hosts and assertions.
    pub fn markup(&self) -> String {
        self.tree.to_markup(self.tree.root())
    }

    /// The host's connected callback: first render, then effects, then init.
    pub fn connect(&mut self) -> Result<(), Error> {
        self.render(None)?;
        self.lifecycle.run_effects();
        self.lifecycle.run_init();
        Ok(())
    }

    /// Reads pass through to the state record.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.state.get(name)
    }

    /// A property write drives the full cycle: hash any list items, commit,
    /// render scoped to the property name, then run the effect cycle. A
    /// digest failure aborts before any tree mutation; the write itself
    /// rejects nothing.
    pub async fn set(&mut self, name: &str, value: Value) -> Result<(), Error> {
        self.state.write(name, value).await?;
        self.render(Some(name))?;
        self.lifecycle.rerun_effects();
        Ok(())
    }

    /// Typed-record convenience write.
    pub async fn set_serialized<T: Serialize>(&mut self, name: &str, value: &T) -> Result<(), Error> {
        self.set(name, serde_json::to_value(value)?).await
    }

    /// The host's attribute-change notification: the raw string value is
    /// written under the attribute's name.
    pub async fn set_attr(&mut self, name: &str, value: &str) -> Result<(), Error> {
        self.set(name, Value::String(value.to_string())).await
    }

    /// First call compiles the template and mounts the fragment under the
    /// live root; no reconciliation runs. Every later call compiles a fresh
    /// fragment and reconciles it scoped to the changed property, keeping
    /// the merged map.
    pub fn render(&mut self, changed: Option<&str>) -> Result<(), Error> {
        let current = (self.template)(&self.state);
        if !self.mounted {
            let (container, map) = template::compile(&mut self.tree, &current)?;
            let root = self.tree.root();
            self.tree.mount(root, container)?;
            self.map = map;
            self.mounted = true;
            debug!("mounted initial fragment: {} dependency names", self.map.len());
            return Ok(());
        }

        let Some(name) = changed else {
            warn!("re-render without a changed property is a no-op");
            return Ok(());
        };
        let (_, new_map) = template::compile(&mut self.tree, &current)?;
        let replaced = reconcile::reconcile(&mut self.tree, &mut self.map, &new_map, name)?;
        debug!("re-rendered {name}: replaced={replaced}");
        Ok(())
    }

    /// Extend the shared stylesheet list with the instance sheet. The
    /// snapshot is taken at adoption time; later registrations need a
    /// fresh adoption to become visible.
    pub fn adopt_styles(&mut self, own: Stylesheet) {
        let mut adopted = shared_stylesheets();
        adopted.push(own);
        self.adopted = adopted;
    }

    pub fn adopted_styles(&self) -> &[Stylesheet] {
        &self.adopted
    }
}

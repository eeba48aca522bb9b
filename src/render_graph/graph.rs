//! Ordered pass list and its per-frame lifecycle

use super::builder::RenderGraphBuilder;
use super::pass::*;
use super::resource::ResourceAccess;
use crate::command_list::CommandList;

/// Unique identifier for a pass within one graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PassId(pub(crate) u32);

impl PassId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Where a pass is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassState {
    /// Added, setup not run yet
    Declared,
    /// Setup succeeded, waiting for execute
    Ready,
    /// Setup declined to run this frame
    Skipped,
    Executed,
    DeInit,
}

struct PassNode {
    pass: Box<dyn Pass>,
    state: PassState,
    usage: Vec<ResourceAccess>,
}

/// Passes in declaration order.
///
/// Execution order is declaration order; nothing is reordered by the
/// declared resource usage.
#[derive(Default)]
pub struct RenderGraph {
    passes: Vec<PassNode>,
}

impl RenderGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pass to the end of the graph
    pub fn add_pass<P: Pass + 'static>(&mut self, pass: P) -> PassId {
        let id = PassId(self.passes.len() as u32);
        self.passes.push(PassNode {
            pass: Box::new(pass),
            state: PassState::Declared,
            usage: Vec::new(),
        });
        id
    }

    /// Build a [`RenderPass`] from a payload and callbacks and add it
    pub fn add_render_pass<D: 'static>(
        &mut self,
        name: &str,
        data: D,
        on_setup: impl FnMut(&mut D, &mut RenderGraphBuilder) -> bool + 'static,
        on_execute: impl FnMut(&mut D, &mut CommandList) + 'static,
    ) -> PassId {
        self.add_pass(RenderPass::new(name, data, on_setup, on_execute))
    }

    /// Run setup of every declared pass
    ///
    /// # Panics
    ///
    /// Panics if the graph has already been deinitialized.
    pub fn setup(&mut self) {
        assert!(
            self.passes.iter().all(|node| node.state != PassState::DeInit),
            "render graph set up again after deinit; build a new graph per frame"
        );
        for node in self.passes.iter_mut() {
            if node.state != PassState::Declared {
                continue;
            }

            let mut builder = RenderGraphBuilder::new();
            if node.pass.setup(&mut builder) {
                node.state = PassState::Ready;
            } else {
                log::debug!("Pass '{}' skipped this frame", node.pass.name());
                node.state = PassState::Skipped;
            }
            node.usage = builder.into_accesses();
        }
    }

    /// Record every ready pass into `list`, in declaration order
    ///
    /// # Panics
    ///
    /// Panics if a pass has not been set up.
    pub fn execute(&mut self, list: &mut CommandList) {
        for node in self.passes.iter_mut() {
            match node.state {
                PassState::Ready => {
                    node.pass.execute(list);
                    node.state = PassState::Executed;
                }
                PassState::Declared => {
                    panic!("pass '{}' executed before setup", node.pass.name())
                }
                PassState::Skipped | PassState::Executed | PassState::DeInit => {}
            }
        }
    }

    /// Release the callbacks of every pass. Safe to call more than once.
    pub fn deinit(&mut self) {
        for node in self.passes.iter_mut() {
            node.pass.deinit();
            node.state = PassState::DeInit;
        }
    }

    pub fn pass_state(&self, id: PassId) -> PassState {
        self.passes[id.index()].state
    }

    /// Resources the pass declared in its last setup
    pub fn pass_usage(&self, id: PassId) -> &[ResourceAccess] {
        &self.passes[id.index()].usage
    }

    pub fn pass_name(&self, id: PassId) -> &str {
        self.passes[id.index()].pass.name()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl std::fmt::Debug for RenderGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(
                self.passes
                    .iter()
                    .map(|node| (node.pass.name(), node.state)),
            )
            .finish()
    }
}

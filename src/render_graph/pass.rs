//! Render pass definitions for the render graph

use super::builder::RenderGraphBuilder;
use crate::backend::PASS_MARKER_COLOR;
use crate::command_list::{CommandList, DebugName};

/// A two-phase unit of recording work, driven by [`RenderGraph`](super::RenderGraph)
pub trait Pass {
    /// Name shown in debug markers
    fn name(&self) -> &str;

    /// Declare resource usage. Returning `false` skips the pass this frame.
    fn setup(&mut self, builder: &mut RenderGraphBuilder) -> bool;

    /// Record the pass's commands
    fn execute(&mut self, list: &mut CommandList);

    /// Release everything the pass captured. Must be idempotent.
    fn deinit(&mut self);
}

pub type SetupFn<D> = Box<dyn FnMut(&mut D, &mut RenderGraphBuilder) -> bool>;
pub type ExecuteFn<D> = Box<dyn FnMut(&mut D, &mut CommandList)>;

/// A pass made of a typed payload and two callbacks.
///
/// Execution is wrapped in a marker scope named after the pass. The scope is
/// owned by the pass, so the recorded stream stays balanced no matter what
/// the callback pushes.
pub struct RenderPass<D> {
    name: DebugName,
    data: D,
    on_setup: Option<SetupFn<D>>,
    on_execute: Option<ExecuteFn<D>>,
}

impl<D> RenderPass<D> {
    /// # Panics
    ///
    /// Panics if `name` does not fit a [`DebugName`].
    pub fn new(
        name: &str,
        data: D,
        on_setup: impl FnMut(&mut D, &mut RenderGraphBuilder) -> bool + 'static,
        on_execute: impl FnMut(&mut D, &mut CommandList) + 'static,
    ) -> Self {
        Self {
            name: DebugName::new(name),
            data,
            on_setup: Some(Box::new(on_setup)),
            on_execute: Some(Box::new(on_execute)),
        }
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    pub fn is_deinit(&self) -> bool {
        self.on_setup.is_none() && self.on_execute.is_none()
    }
}

impl<D> Pass for RenderPass<D> {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn setup(&mut self, builder: &mut RenderGraphBuilder) -> bool {
        match self.on_setup.as_mut() {
            Some(on_setup) => on_setup(&mut self.data, builder),
            None => panic!("setup of deinitialized pass '{}'", self.name),
        }
    }

    fn execute(&mut self, list: &mut CommandList) {
        let Some(on_execute) = self.on_execute.as_mut() else {
            panic!("execute of deinitialized pass '{}'", self.name);
        };

        let depth = list.marker_depth();
        list.push_marker(self.name.as_str(), PASS_MARKER_COLOR);
        on_execute(&mut self.data, list);

        let left_open = list.marker_depth().saturating_sub(depth + 1);
        if left_open > 0 {
            log::warn!("Pass '{}' left {} marker(s) open", self.name, left_open);
            for _ in 0..left_open {
                list.pop_marker();
            }
        }
        list.pop_marker();
    }

    fn deinit(&mut self) {
        self.on_setup = None;
        self.on_execute = None;
    }
}

impl<D: std::fmt::Debug> std::fmt::Debug for RenderPass<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPass")
            .field("name", &self.name)
            .field("data", &self.data)
            .field("deinit", &self.is_deinit())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_list::Command;

    fn counting_pass() -> RenderPass<u32> {
        RenderPass::new(
            "Count",
            0,
            |_, _| true,
            |count, list| {
                *count += 1;
                list.dispatch(1, 1, 1);
            },
        )
    }

    #[test]
    fn test_execute_wraps_callback_in_marker() {
        let mut pass = counting_pass();
        let mut list = CommandList::new();
        pass.execute(&mut list);

        assert_eq!(*pass.data(), 1);
        let kinds: Vec<_> = list.commands().iter().map(Command::name).collect();
        assert_eq!(kinds, ["PushMarker", "Dispatch", "PopMarker"]);
        assert_eq!(list.marker_depth(), 0);
    }

    #[test]
    fn test_unbalanced_callback_is_closed() {
        let mut pass = RenderPass::new("Leaky", (), |_, _| true, |_, list| {
            list.push_marker("Inner", glam::Vec3::ONE);
        });
        let mut list = CommandList::new();
        pass.execute(&mut list);
        assert_eq!(list.marker_depth(), 0);
    }

    #[test]
    fn test_deinit_is_idempotent() {
        let mut pass = counting_pass();
        pass.deinit();
        pass.deinit();
        assert!(pass.is_deinit());
    }

    #[test]
    #[should_panic(expected = "the maximum is 15")]
    fn test_long_name_is_rejected() {
        RenderPass::new("ThisNameIsTooLong", (), |_, _| true, |_, _| {});
    }
}

//! Declaration side of a pass's setup

use super::resource::*;

/// Collects the resources one pass reads and writes during setup
#[derive(Debug, Default)]
pub struct RenderGraphBuilder {
    accesses: Vec<ResourceAccess>,
}

impl RenderGraphBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Declare that this pass reads from a resource
    ///
    /// # Panics
    ///
    /// Panics if `resource` is an invalid handle.
    pub fn read(&mut self, resource: impl Into<GraphResource>) {
        self.declare(resource.into(), Access::Read);
    }

    /// Declare that this pass writes to a resource
    ///
    /// # Panics
    ///
    /// Panics if `resource` is an invalid handle.
    pub fn write(&mut self, resource: impl Into<GraphResource>) {
        self.declare(resource.into(), Access::Write);
    }

    pub fn accesses(&self) -> &[ResourceAccess] {
        &self.accesses
    }

    pub fn reads(&self) -> impl Iterator<Item = GraphResource> + '_ {
        self.filter(Access::Read)
    }

    pub fn writes(&self) -> impl Iterator<Item = GraphResource> + '_ {
        self.filter(Access::Write)
    }

    pub(crate) fn into_accesses(self) -> Vec<ResourceAccess> {
        self.accesses
    }

    fn filter(&self, access: Access) -> impl Iterator<Item = GraphResource> + '_ {
        self.accesses
            .iter()
            .filter(move |a| a.access == access)
            .map(|a| a.resource)
    }

    fn declare(&mut self, resource: GraphResource, access: Access) {
        assert!(
            resource.is_valid(),
            "pass declared {access:?} access to an invalid handle {resource:?}"
        );
        let entry = ResourceAccess { resource, access };
        if !self.accesses.contains(&entry) {
            self.accesses.push(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::*;

    #[test]
    fn test_reads_and_writes_are_split() {
        let mut builder = RenderGraphBuilder::new();
        builder.read(TextureHandle::from_index(1));
        builder.write(ImageHandle::from_index(0));
        builder.read(TextureHandle::from_index(1));

        assert_eq!(builder.accesses().len(), 2);
        assert_eq!(
            builder.reads().collect::<Vec<_>>(),
            vec![GraphResource::Texture(TextureHandle::from_index(1))]
        );
        assert_eq!(
            builder.writes().collect::<Vec<_>>(),
            vec![GraphResource::Image(ImageHandle::from_index(0))]
        );
    }

    #[test]
    #[should_panic(expected = "invalid handle")]
    fn test_invalid_handle_is_rejected() {
        RenderGraphBuilder::new().write(ImageHandle::INVALID);
    }
}

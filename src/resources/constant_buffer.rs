//! Typed per-frame constant buffers

use super::*;
use bytemuck::Pod;

/// A CPU-side value mirrored into one GPU buffer per frame in flight.
///
/// Edit [`value`](Self::value) freely, then [`apply`](Self::apply) it to the
/// buffer of the frame being recorded. Frames still in flight keep reading
/// their own copy.
pub struct ConstantBuffer<T: Pod> {
    pub value: T,
    buffers: Vec<BufferHandle>,
}

impl<T: Pod> ConstantBuffer<T> {
    /// Size of one frame's buffer in bytes
    pub const SIZE: u64 = std::mem::size_of::<T>() as u64;

    pub fn frames(&self) -> usize {
        self.buffers.len()
    }

    /// Buffer to bind while recording `frame`
    pub fn handle(&self, frame: usize) -> BufferHandle {
        self.buffers[frame % self.buffers.len()]
    }

    /// Upload the current value to the buffer of `frame`
    pub fn apply<B: Backend>(&self, resources: &GpuResources<B>, backend: &mut B, frame: usize) {
        resources.write_buffer(backend, self.handle(frame), 0, bytemuck::bytes_of(&self.value));
    }

    /// Upload the current value to every frame's buffer
    pub fn apply_all<B: Backend>(&self, resources: &GpuResources<B>, backend: &mut B) {
        for frame in 0..self.buffers.len() {
            self.apply(resources, backend, frame);
        }
    }
}

impl<T: Pod + std::fmt::Debug> std::fmt::Debug for ConstantBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstantBuffer")
            .field("value", &self.value)
            .field("buffers", &self.buffers)
            .finish()
    }
}

impl<B: Backend> GpuResources<B> {
    /// Create a constant buffer with `frames_in_flight` backing buffers,
    /// each initialized with `value`.
    ///
    /// # Panics
    ///
    /// Panics if `frames_in_flight` is zero or `T` is zero-sized.
    pub fn create_constant_buffer<T: Pod>(
        &mut self,
        backend: &mut B,
        debug_name: &str,
        frames_in_flight: usize,
        value: T,
    ) -> ResourceResult<ConstantBuffer<T>> {
        assert!(
            frames_in_flight > 0,
            "constant buffer '{debug_name}' needs at least one frame in flight"
        );

        let mut buffers = Vec::with_capacity(frames_in_flight);
        for frame in 0..frames_in_flight {
            buffers.push(self.create_buffer(
                backend,
                &BufferDesc {
                    debug_name: format!("{debug_name}[{frame}]"),
                    size: ConstantBuffer::<T>::SIZE,
                    kind: BufferKind::Constant,
                },
            )?);
        }

        let buffer = ConstantBuffer { value, buffers };
        buffer.apply_all(self, backend);
        Ok(buffer)
    }
}

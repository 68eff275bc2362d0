//! GPU buffer ownership seam
//!
//! Scene nodes hold [`GeometryHandle`]s; the buffers themselves live in a
//! [`GeometryBuffers`] implementation and are freed only through
//! [`GeometryBuffers::release`].

use crate::gfx::rendering::vertex::Vertex3D;

/// Opaque id of an uploaded vertex/index buffer pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryHandle(u64);

impl GeometryHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Storage for uploaded geometry
pub trait GeometryBuffers {
    fn upload(&mut self, label: &str, vertices: &[Vertex3D], indices: &[u32]) -> GeometryHandle;

    /// Frees the buffers behind `handle`; unknown handles are ignored
    fn release(&mut self, handle: GeometryHandle);

    /// Number of uploads not yet released
    fn live_count(&self) -> usize;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::BTreeMap;

    use super::{GeometryBuffers, GeometryHandle};
    use crate::gfx::rendering::vertex::Vertex3D;

    #[derive(Debug, Clone, PartialEq)]
    pub enum BufferEvent {
        Upload(GeometryHandle, usize, usize),
        Release(GeometryHandle),
    }

    /// Buffer pool that keeps counts instead of GPU memory
    #[derive(Debug, Default)]
    pub struct CountingBuffers {
        next_id: u64,
        live: BTreeMap<GeometryHandle, (usize, usize)>,
        pub log: Vec<BufferEvent>,
    }

    impl CountingBuffers {
        pub fn is_live(&self, handle: GeometryHandle) -> bool {
            self.live.contains_key(&handle)
        }

        pub fn releases(&self) -> Vec<GeometryHandle> {
            self.log
                .iter()
                .filter_map(|event| match event {
                    BufferEvent::Release(handle) => Some(*handle),
                    BufferEvent::Upload(..) => None,
                })
                .collect()
        }
    }

    impl GeometryBuffers for CountingBuffers {
        fn upload(&mut self, _label: &str, vertices: &[Vertex3D], indices: &[u32]) -> GeometryHandle {
            let handle = GeometryHandle::new(self.next_id);
            self.next_id += 1;
            self.live.insert(handle, (vertices.len(), indices.len()));
            self.log
                .push(BufferEvent::Upload(handle, vertices.len(), indices.len()));
            handle
        }

        fn release(&mut self, handle: GeometryHandle) {
            if self.live.remove(&handle).is_some() {
                self.log.push(BufferEvent::Release(handle));
            }
        }

        fn live_count(&self) -> usize {
            self.live.len()
        }
    }
}

//! # Buffer State Module
//!
//! GPU-side storage for chunk meshes. Each chunk owns one vertex buffer and
//! one index buffer; re-uploading a chunk releases its previous pair before
//! the replacement is installed, so a chunk never holds more than one live
//! pair of handles.
//!
//! ## Analytics
//!
//! Allocated bytes and write counts are tracked across all chunks so leaks
//! show up as a steadily growing total.

use std::collections::HashMap;

use log::{debug, info};
use wgpu::{util::DeviceExt, Buffer, Device, Queue};

use super::{ChunkMesh, MeshUploader};
use crate::error::{VoxelError, VoxelResult};

/// Memory and write accounting across every chunk buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BufferAnalytics {
    /// Bytes currently held by live buffers
    pub allocated_memory: u64,
    /// Number of buffer creations or in-place writes
    pub times_written: u64,
    /// Number of buffers destroyed
    pub times_released: u64,
}

/// The live GPU buffers of one chunk.
#[derive(Debug)]
pub struct ChunkBuffers {
    /// Vertex data, `Vertex` layout
    pub vertex_buffer: Buffer,
    /// Two triangles per quad
    pub index_buffer: Buffer,
    /// Number of indices to draw
    pub index_count: u32,
}

impl ChunkBuffers {
    fn byte_size(&self) -> u64 {
        self.vertex_buffer.size() + self.index_buffer.size()
    }

    fn destroy(self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}

/// Uploads chunk meshes into wgpu buffers.
///
/// # Examples
///
/// ```no_run
/// use voxel_world::engine_state::rendering::{buffer_state::GpuMeshUploader, ChunkMesh, MeshUploader};
///
/// let mut uploader = pollster::block_on(GpuMeshUploader::headless()).unwrap();
/// uploader.upload(0, &ChunkMesh::default());
/// assert_eq!(uploader.analytics().allocated_memory, 0);
/// ```
pub struct GpuMeshUploader {
    device: Device,
    queue: Queue,
    chunk_buffers: HashMap<usize, ChunkBuffers>,
    analytics: BufferAnalytics,
}

impl GpuMeshUploader {
    /// Wraps an existing device and queue.
    pub fn new(device: Device, queue: Queue) -> Self {
        GpuMeshUploader {
            device,
            queue,
            chunk_buffers: HashMap::new(),
            analytics: BufferAnalytics::default(),
        }
    }

    /// Acquires an adapter and device without any presentation surface.
    ///
    /// # Errors
    /// `Gpu` when no adapter is available or the device request fails.
    pub async fn headless() -> VoxelResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            flags: wgpu::InstanceFlags::empty(),
            backend_options: wgpu::BackendOptions::from_env_or_default(),
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|err| VoxelError::Gpu(err.to_string()))?;
        info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                label: Some("Chunk Mesh Device"),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|err| VoxelError::Gpu(err.to_string()))?;

        Ok(Self::new(device, queue))
    }

    /// Buffers currently installed for a chunk.
    pub fn chunk_buffers(&self, chunk_index: usize) -> Option<&ChunkBuffers> {
        self.chunk_buffers.get(&chunk_index)
    }

    /// Number of chunks with live buffers.
    pub fn live_chunk_count(&self) -> usize {
        self.chunk_buffers.len()
    }

    /// Memory and write accounting.
    pub fn analytics(&self) -> BufferAnalytics {
        self.analytics
    }

    /// Destroys a chunk's buffers, if it has any.
    pub fn release(&mut self, chunk_index: usize) {
        if let Some(buffers) = self.chunk_buffers.remove(&chunk_index) {
            self.analytics.allocated_memory -= buffers.byte_size();
            self.analytics.times_released += 2;
            buffers.destroy();
        }
    }

    fn create_buffers(&mut self, chunk_index: usize, mesh: &ChunkMesh) -> ChunkBuffers {
        let indices = mesh.indices();
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Chunk {chunk_index} Vertex Buffer")),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Chunk {chunk_index} Index Buffer")),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        ChunkBuffers {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

impl MeshUploader for GpuMeshUploader {
    fn upload(&mut self, chunk_index: usize, mesh: &ChunkMesh) {
        let bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);

        // Same vertex count means the index list is unchanged too.
        if let Some(existing) = self.chunk_buffers.get(&chunk_index) {
            if !bytes.is_empty() && existing.vertex_buffer.size() == bytes.len() as u64 {
                self.queue.write_buffer(&existing.vertex_buffer, 0, bytes);
                self.analytics.times_written += 1;
                return;
            }
        }

        self.release(chunk_index);
        if mesh.is_empty() {
            return;
        }

        let buffers = self.create_buffers(chunk_index, mesh);
        self.analytics.allocated_memory += buffers.byte_size();
        self.analytics.times_written += 2;
        debug!(
            "chunk {chunk_index}: {} vertices in {} bytes",
            mesh.vertex_count(),
            buffers.byte_size()
        );
        self.chunk_buffers.insert(chunk_index, buffers);
    }
}

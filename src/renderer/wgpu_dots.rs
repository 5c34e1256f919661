use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::renderer::placeholder::TextureFactory;

/// Creates placeholder textures as 1×1 `Rgba8Unorm` textures on a wgpu device.
pub struct WgpuDotTextureFactory {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl WgpuDotTextureFactory {
    #[must_use]
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }
}

impl TextureFactory<Arc<wgpu::TextureView>> for WgpuDotTextureFactory {
    fn create_dot_texture(&self, label: &str, rgba: [u8; 4]) -> Arc<wgpu::TextureView> {
        let texture = self.device.create_texture_with_data(
            &self.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: 1,
                    height: 1,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &rgba,
        );

        Arc::new(texture.create_view(&wgpu::TextureViewDescriptor::default()))
    }
}

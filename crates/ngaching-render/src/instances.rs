use crate::{sprite_style, static_color};
use ngaching_core::{PopulationKind, SceneFrame};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub pos: [f32; 3],
    pub scale: f32,
    pub rotation: [f32; 4],
    pub color: [f32; 4],
    pub params: [f32; 4],
}

impl InstanceData {
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x3,
        2 => Float32,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Flatten every population of `frame` into `out`, foliage first.
pub fn pack_instances(frame: &SceneFrame<'_>, out: &mut Vec<InstanceData>) {
    out.clear();
    for (pop, transforms) in frame.batches() {
        let (size, billboard, round) = sprite_style(pop.kind);
        out.extend(transforms.iter().enumerate().map(|(i, t)| {
            let [r, g, b] = match pop.kind {
                PopulationKind::Foliage => frame
                    .blend
                    .foliage_shade
                    .get(i)
                    .copied()
                    .unwrap_or_else(|| static_color(pop, i)),
                _ => static_color(pop, i),
            };
            InstanceData {
                pos: t.position.to_array(),
                scale: t.scale * size,
                rotation: t.rotation.to_array(),
                color: [r, g, b, 1.0],
                params: [billboard, round, 0.0, 0.0],
            }
        }));
    }
}

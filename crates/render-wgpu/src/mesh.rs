use bytemuck::{Pod, Zeroable};
use std::f32::consts::PI;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// CPU-side mesh before upload.
#[derive(Debug, Clone, Default)]
pub(crate) struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Append a quad given corners counter-clockwise from bottom-left.
    fn push_quad(&mut self, corners: [[f32; 3]; 4], normal: [f32; 3]) {
        // Image rows run top to bottom, so v grows downward.
        const UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
        let base = self.vertices.len() as u16;
        for (position, uv) in corners.into_iter().zip(UVS) {
            self.vertices.push(Vertex {
                position,
                normal,
                uv,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
}

/// Unit quad in the XY plane facing +Z.
pub(crate) fn quad_mesh() -> MeshData {
    let mut mesh = MeshData::default();
    let p = 0.5;
    mesh.push_quad(
        [[-p, -p, 0.0], [p, -p, 0.0], [p, p, 0.0], [-p, p, 0.0]],
        [0.0, 0.0, 1.0],
    );
    mesh
}

/// Unit cube centred on the origin, each face textured with the full image.
pub(crate) fn cube_mesh() -> MeshData {
    let mut mesh = MeshData::default();
    let p = 0.5;
    #[rustfmt::skip]
    let faces: [([[f32; 3]; 4], [f32; 3]); 6] = [
        ([[-p, -p,  p], [ p, -p,  p], [ p,  p,  p], [-p,  p,  p]], [ 0.0,  0.0,  1.0]),
        ([[ p, -p, -p], [-p, -p, -p], [-p,  p, -p], [ p,  p, -p]], [ 0.0,  0.0, -1.0]),
        ([[ p, -p,  p], [ p, -p, -p], [ p,  p, -p], [ p,  p,  p]], [ 1.0,  0.0,  0.0]),
        ([[-p, -p, -p], [-p, -p,  p], [-p,  p,  p], [-p,  p, -p]], [-1.0,  0.0,  0.0]),
        ([[-p,  p,  p], [ p,  p,  p], [ p,  p, -p], [-p,  p, -p]], [ 0.0,  1.0,  0.0]),
        ([[-p, -p, -p], [ p, -p, -p], [ p, -p,  p], [-p, -p,  p]], [ 0.0, -1.0,  0.0]),
    ];
    for (corners, normal) in faces {
        mesh.push_quad(corners, normal);
    }
    mesh
}

/// Radius-1 UV sphere with equirectangular texture coordinates.
pub(crate) fn sphere_mesh(stacks: u16, slices: u16) -> MeshData {
    let stacks = stacks.max(2);
    let slices = slices.max(3);
    let mut mesh = MeshData::default();
    for i in 0..=stacks {
        let v = i as f32 / stacks as f32;
        let theta = v * PI;
        for j in 0..=slices {
            let u = j as f32 / slices as f32;
            let phi = u * 2.0 * PI;
            let n = [theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()];
            mesh.vertices.push(Vertex {
                position: n,
                normal: n,
                uv: [u, v],
            });
        }
    }
    let row = slices + 1;
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * row + j;
            let b = a + row;
            mesh.indices
                .extend_from_slice(&[a, a + 1, b, b, a + 1, b + 1]);
        }
    }
    mesh
}

/// WGSL shader for every shop surface.
///
/// Each instance carries its model matrix, a colour multiplied with the
/// sampled texel, and `params.x` marking unlit surfaces (the sky). Solid
/// surfaces bind a 1×1 white texture.
pub const SURFACE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var surface_texture: texture_2d<f32>;
@group(1) @binding(1)
var surface_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct InstanceInput {
    @location(3) model_0: vec4<f32>,
    @location(4) model_1: vec4<f32>,
    @location(5) model_2: vec4<f32>,
    @location(6) model_3: vec4<f32>,
    @location(7) color: vec4<f32>,
    @location(8) params: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) color: vec4<f32>,
    @location(3) unlit: f32,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_normal = normalize(world_normal);
    out.uv = vertex.uv;
    out.color = instance.color;
    out.unlit = instance.params.x;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(surface_texture, surface_sampler, in.uv);
    let base = texel * in.color;
    let light_dir = normalize(vec3<f32>(0.3, 1.0, 0.5));
    // Walls are seen from both sides, so light either face alike.
    let diffuse = abs(dot(in.world_normal, light_dir));
    let lighting = select(0.6 + diffuse * 0.4, 1.0, in.unlit > 0.5);
    return vec4<f32>(base.rgb * lighting, base.a);
}
"#;

/// WGSL shader for the colored triangle. Positions are already in clip
/// space; the view-projection is not applied.
pub const TRIANGLE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    aux: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

/// WGSL shader for the ground grid. Color is a checker pattern derived
/// from the world-space position, so no color buffer is bound.
pub const GRID_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    aux: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct GridVertex {
    @location(0) position: vec3<f32>,
};

struct GridOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
};

@vertex
fn vs_main(vertex: GridVertex) -> GridOutput {
    var out: GridOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.world_position = vertex.position;
    return out;
}

@fragment
fn fs_main(in: GridOutput) -> @location(0) vec4<f32> {
    let cell = floor((in.world_position.xz + 1.0) * 8.0);
    let checker = abs(cell.x + cell.y) % 2.0;
    let base = mix(vec3<f32>(0.25, 0.45, 0.3), vec3<f32>(0.35, 0.6, 0.4), checker);
    let falloff = 1.0 - 0.35 * length(in.world_position.xz);
    return vec4<f32>(base * falloff, 1.0);
}
"#;

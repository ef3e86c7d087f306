//! Embedded shader sources.
//!
//! The viewer treats these as opaque programs with a known uniform and
//! attribute interface; the slot table in `pyre-render` resolves whichever
//! of the known names each program actually declares.

/// Vertex stage of the fireball: radially displaces the sphere surface with
/// time-varying noise.
pub const FIREBALL_VERT: &str = r#"#version 300 es
precision highp float;

uniform mat4 u_Model;
uniform mat4 u_ModelInvTr;
uniform mat4 u_ViewProj;
uniform float u_Tick;
uniform float u_radialBias;
uniform float u_radialGain;

in vec4 vs_Pos;
in vec4 vs_Nor;

out vec4 fs_Nor;
out vec4 fs_Pos;
out float fs_Displacement;

float hash(vec3 p) {
    return fract(sin(dot(p, vec3(127.1, 311.7, 74.7))) * 43758.5453);
}

float noise(vec3 p) {
    vec3 i = floor(p);
    vec3 f = fract(p);
    vec3 u = f * f * (3.0 - 2.0 * f);
    float n000 = hash(i);
    float n100 = hash(i + vec3(1.0, 0.0, 0.0));
    float n010 = hash(i + vec3(0.0, 1.0, 0.0));
    float n110 = hash(i + vec3(1.0, 1.0, 0.0));
    float n001 = hash(i + vec3(0.0, 0.0, 1.0));
    float n101 = hash(i + vec3(1.0, 0.0, 1.0));
    float n011 = hash(i + vec3(0.0, 1.0, 1.0));
    float n111 = hash(i + vec3(1.0, 1.0, 1.0));
    return mix(mix(mix(n000, n100, u.x), mix(n010, n110, u.x), u.y),
               mix(mix(n001, n101, u.x), mix(n011, n111, u.x), u.y), u.z);
}

float fbm(vec3 p) {
    float value = 0.0;
    float amplitude = 0.5;
    for (int i = 0; i < 5; i++) {
        value += amplitude * noise(p);
        p *= 2.0;
        amplitude *= 0.5;
    }
    return value;
}

float bias(float b, float t) {
    return pow(t, log(b) / log(0.5));
}

float gain(float g, float t) {
    return t < 0.5 ? bias(1.0 - g, 2.0 * t) / 2.0
                   : 1.0 - bias(1.0 - g, 2.0 - 2.0 * t) / 2.0;
}

void main() {
    fs_Nor = vec4(mat3(u_ModelInvTr) * vs_Nor.xyz, 0.0);

    float t = u_Tick * 0.01;
    vec3 dir = normalize(vs_Pos.xyz);
    float low = sin(t + dir.y * 3.0) * 0.15;
    float turbulence = fbm(dir * 2.5 + vec3(0.0, -t * 1.5, 0.0));
    float displacement = gain(u_radialGain, bias(u_radialBias, turbulence)) + low;
    fs_Displacement = displacement;

    vec4 displaced = vec4(vs_Pos.xyz + dir * displacement, 1.0);
    fs_Pos = u_Model * displaced;
    gl_Position = u_ViewProj * fs_Pos;
}
"#;

/// Fragment stage of the fireball: blends the inner and outer colors by
/// displacement, shaped by the color bias/gain controls.
pub const FIREBALL_FRAG: &str = r#"#version 300 es
precision highp float;

uniform vec4 u_innerColor;
uniform vec4 u_outerColor;
uniform float u_colorBias;
uniform float u_colorGain;

in vec4 fs_Nor;
in vec4 fs_Pos;
in float fs_Displacement;

out vec4 out_Col;

float bias(float b, float t) {
    return pow(t, log(b) / log(0.5));
}

float gain(float g, float t) {
    return t < 0.5 ? bias(1.0 - g, 2.0 * t) / 2.0
                   : 1.0 - bias(1.0 - g, 2.0 - 2.0 * t) / 2.0;
}

void main() {
    float heat = clamp(fs_Displacement * 1.6, 0.0, 1.0);
    float shaped = gain(u_colorGain, bias(u_colorBias, heat));
    vec3 color = mix(u_innerColor.rgb, u_outerColor.rgb, shaped);
    out_Col = vec4(color, 1.0);
}
"#;

/// Vertex stage of the background: passes the quad through in clip space,
/// no matrices involved.
pub const BACKGROUND_VERT: &str = r#"#version 300 es
precision highp float;

in vec4 vs_Pos;

out vec2 fs_UV;

void main() {
    fs_UV = vs_Pos.xy;
    gl_Position = vec4(vs_Pos.xy, 0.999, 1.0);
}
"#;

/// Fragment stage of the background: a radial glow tinted by the current
/// palette so the backdrop follows color changes.
pub const BACKGROUND_FRAG: &str = r#"#version 300 es
precision highp float;

uniform vec4 u_innerColor;
uniform vec4 u_outerColor;

in vec2 fs_UV;

out vec4 out_Col;

void main() {
    float glow = 1.0 - smoothstep(0.0, 1.4, length(fs_UV));
    vec3 halo = mix(u_outerColor.rgb, u_innerColor.rgb, glow);
    out_Col = vec4(halo * glow * 0.25, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fireball_declares_animation_interface() {
        assert!(FIREBALL_VERT.contains("u_Tick"));
        assert!(FIREBALL_VERT.contains("u_radialBias"));
        assert!(FIREBALL_VERT.contains("u_radialGain"));
        assert!(FIREBALL_FRAG.contains("u_colorBias"));
        assert!(FIREBALL_FRAG.contains("u_colorGain"));
    }

    #[test]
    fn test_both_programs_declare_the_palette() {
        assert!(FIREBALL_FRAG.contains("u_innerColor"));
        assert!(FIREBALL_FRAG.contains("u_outerColor"));
        assert!(BACKGROUND_FRAG.contains("u_innerColor"));
        assert!(BACKGROUND_FRAG.contains("u_outerColor"));
    }

    #[test]
    fn test_background_has_no_tick_or_matrices() {
        assert!(!BACKGROUND_VERT.contains("u_Tick"));
        assert!(!BACKGROUND_VERT.contains("u_ViewProj"));
        assert!(!BACKGROUND_FRAG.contains("u_Tick"));
    }
}

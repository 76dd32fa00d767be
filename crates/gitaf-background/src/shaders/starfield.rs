/// Starfield and nebula fragment stage
///
/// Sparse hashed stars over two slow nebula bands, radial vignette and a
/// fixed color grade. The constants are part of the page's look and must
/// not be tuned.
pub const SHADER_STARFIELD: &str = r#"
precision highp float;

uniform float uTime;
uniform vec2 uResolution;

float hash(float n) {
    return fract(sin(n) * 43758.5453123);
}

void main() {
    vec2 uv = (gl_FragCoord.xy - 0.5 * uResolution) / min(uResolution.x, uResolution.y);

    vec3 rd = normalize(vec3(uv, -1.0));

    // Stars: only the top 2% of hash values light up
    float stars = 0.0;
    vec3 p = rd * 100.0;
    float h = hash(dot(p, vec3(12.9898, 78.233, 54.53)));
    if (h > 0.98) stars = pow(h - 0.98, 10.0) * 20.0;

    // Nebula bands along the view direction
    vec3 nebula = vec3(0.0);
    nebula += vec3(0.3, 0.15, 0.5) * pow(max(0.0, sin(rd.x * 2.0 + uTime * 0.1)), 3.0) * 0.2;
    nebula += vec3(0.15, 0.3, 0.6) * pow(max(0.0, sin(rd.y * 2.5 + uTime * 0.05)), 3.0) * 0.2;

    vec3 color = stars + nebula;

    float vignette = 1.0 - length(uv) * 0.4;
    vignette = smoothstep(0.3, 1.0, vignette);
    color *= vignette;

    // Grade
    color *= vec3(0.96, 0.99, 1.06);
    color = pow(color, vec3(0.88));
    color *= 1.12;

    gl_FragColor = vec4(color, 1.0);
}
"#;

/// Pass-through vertex stage for the clip-space quad
pub const SHADER_VERTEX: &str = r#"
attribute vec2 position;

void main() {
    gl_Position = vec4(position, 0.0, 1.0);
}
"#;

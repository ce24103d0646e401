pub mod adverse;
pub mod chart_spec;
pub mod renderer;
pub mod scale;
pub mod svg;
pub mod timeline;

pub mod stage0_segment;
pub mod stage1_tone;
pub mod stage2_merge;
pub mod stage3_quirks;
pub mod stage4_render;

pub use stage0_segment::*;
pub use stage1_tone::*;
pub use stage2_merge::*;
pub use stage3_quirks::*;
pub use stage4_render::*;

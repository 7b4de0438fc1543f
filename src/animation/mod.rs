mod easing;
mod sequence;
mod step;

pub use easing::Easing;
pub use sequence::AnimationSequence;
pub use step::{AnimationStep, Direction};

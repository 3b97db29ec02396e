//! panekit tween - frame-driven inline style animation
//!
//! Two entry points, `Tweener::to` and `Tweener::from`, animate numeric
//! style properties of a node over a duration. Tweens advance on the host
//! document's animation frames.

mod easing;
mod tweener;
mod value;

pub use easing::Easing;
pub use tweener::{OnComplete, TweenId, Tweener};
pub use value::TweenValue;

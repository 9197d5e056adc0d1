//! Animator module - Strategies that evolve the cube between frames.
//!
//! An [`Animator`] is set up once for the cube size, produces the first frame
//! in [`Animator::start`], mutates the grid in [`Animator::update`], and ends
//! the sequence through [`Animator::stop`].
//!
//! | Animator            | Frames for width `w` | Stop condition             |
//! |---------------------|----------------------|----------------------------|
//! | [`PlaneSweep`]      | `w`                  | frame == `w - 1`           |
//! | [`RgbSweep`]        | `w`                  | frame == `w - 1`           |
//! | [`RotatingImage`]   | 16                   | 16 updates                 |
//! | [`StaticProjection`]| 2                    | frame > 0                  |

mod projection;
mod reference;
mod sweep;
mod traits;

pub use projection::*;
pub use reference::*;
pub use sweep::*;
pub use traits::*;

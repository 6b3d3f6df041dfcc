//! Animation sequencing for card transfers.
//!
//! ## Key Types
//!
//! - `CubicBezier`, `Keyframe`, `Timing`, `AnimationEffect`: the effect
//!   vocabulary shared with `Surface`
//! - `Transfer`: one card's move/flip/settle chain as an explicit step list
//! - `TransferPhase`: observable state of a transfer
//! - `Sequencer`: resumes suspended transfers when their effects finish
//!
//! ## Phases
//!
//! ```text
//! direct-flip   Idle -> MovingToTarget -> Flipping -> Settled
//! center-flip   Idle -> MovingToCenter -> Flipping -> MovingToTarget -> Settled
//! back to deck  Idle -> MovingToDeck -> FlippingBack -> ReturnedToDeck
//! ```

pub mod easing;
pub mod effect;
pub mod transfer;
pub mod sequencer;

pub use easing::CubicBezier;
pub use effect::{AnimationEffect, Fill, Keyframe, Timing};
pub use transfer::{StepContext, Transfer, TransferKind, TransferPhase};
pub use sequencer::{Sequencer, TransferOutcome};

#![cfg_attr(not(test), no_std)]

mod macros;

pub mod capability;
pub mod melodies;
pub mod note;
pub mod pitch;
pub mod sequencer;
pub mod square_wave;

pub use capability::{Clock, ToneOutput};
pub use note::{Melody, Note};
pub use sequencer::Sequencer;

pub mod channel;

pub use channel::{Channel, export_grayscale, mix_single_channel, mix_three};

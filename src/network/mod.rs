pub mod forward;
pub mod network;

pub use forward::ForwardPass;
pub use network::{Network, add_bias_unit, max_index};

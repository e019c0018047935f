// This binary crate is intentionally minimal.
// All network and training logic lives in the library (src/lib.rs and its
// modules). Run demos with:
//   cargo run --example xor
fn main() {
    println!("gradnet: a from-scratch feedforward neural network in Rust.");
    println!("Run `cargo run --example xor` or `cargo run --example digits`.");
}

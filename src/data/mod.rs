pub mod accumulator;
pub mod example;
pub mod image;

pub use accumulator::ExampleAccumulator;
pub use example::Example;

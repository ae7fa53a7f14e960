/// Command layer: the batch driver invoked from `main`.
pub mod clear;

pub use clear::run;

#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! nbclear — strip outputs and execution counts from Jupyter notebooks.
//!
//! The core entry point is [`notebook::clear_outputs`], which rewrites a notebook
//! only when one of its code cells still carries outputs or an execution count.

pub mod cli;
pub mod commands;
pub mod notebook;
pub mod types;

//! Input pipeline for panoptic segmentation datasets.
//!
//! Turns a newline-delimited list of example identifiers into decoded,
//! normalized and batched streams for training, evaluation and inference.

mod common;
pub mod config;
pub mod dataset;
pub mod processor;
pub mod stream;

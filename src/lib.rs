//! ffargs - ffmpeg argument builder
//!
//! Turns probed stream metadata into ordered ffmpeg argument fragments:
//! scale/pad filter graphs, rotation from explicit angles or `rotate` tags,
//! frame size, frame rate and audio resampling. No process is spawned here;
//! callers hand the tokens to whatever runs the transcoder.

pub mod cli;
pub mod config;
pub mod error;
pub mod filters;
pub mod format;
pub mod geometry;
pub mod media;
pub mod stream;

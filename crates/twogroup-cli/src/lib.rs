//! Library side of the `twogroup` binary: logging setup, command-line
//! overrides and input loading.

pub mod logging;
pub mod overrides;
pub mod pipeline;

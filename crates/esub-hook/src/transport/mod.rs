//! Process-boundary transport: stdin payload in, one reply out.

pub mod codec;

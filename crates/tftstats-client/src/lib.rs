#![doc = include_str!("../README.md")]

mod client;
mod error;
mod hooks;
mod types;
mod wire;

pub use client::RemoteDataClient;
pub use error::ClientError;
pub use hooks::{ClientHooks, RequestInfo, ResponseInfo, TracingHooks};
pub use types::*;
pub use wire::{unwrap_dehydrated, BUNDLE_DATA_POINTER};

//! Application services — use-case orchestration on top of the ports.

pub mod device_service;

pub use device_service::{DeviceFilter, DeviceList, DeviceService};

//! device-registry: capacity-bounded registry of control devices
//!
//! Devices (fan drivers and future categories) are identified by a 4-digit
//! numeric ID and carry an operating range plus a safe sub-range. The registry
//! validates every insertion and refuses new devices once full.

mod error;
pub use error::{ErrorKind, RegistryError, Result};

mod types;
pub use types::*;

mod registry;
pub use registry::{DeviceRegistry, DEFAULT_CAPACITY};

mod loader;
pub use loader::{load_descriptor_file, load_descriptors_dir, load_descriptors_dir_into};

mod metrics;
pub use metrics::{DeviceMetrics, MetricsHub};

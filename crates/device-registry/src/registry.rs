use crate::error::{RegistryError, Result};
use crate::metrics::DeviceMetrics;
use crate::types::{Device, DeviceDescriptor, DeviceId, DeviceType, Thresholds};

/// Number of devices a registry holds unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 6;

/// Capacity-bounded, insertion-ordered collection of devices keyed by ID.
///
/// Validation failures are returned as [`RegistryError`]. A full registry is
/// not an error: `add_device` then yields `Ok(false)`.
#[derive(Debug)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
    capacity: usize,
    metrics: Option<DeviceMetrics>,
}

/// Clones start without metrics attached.
impl Clone for DeviceRegistry {
    fn clone(&self) -> Self {
        Self {
            devices: self.devices.clone(),
            capacity: self.capacity,
            metrics: None,
        }
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            devices: Vec::with_capacity(capacity),
            capacity,
            metrics: None,
        }
    }

    /// Record registry activity into `metrics`. The device gauge is synced
    /// immediately.
    pub fn with_metrics(mut self, metrics: DeviceMetrics) -> Self {
        metrics.devices_registered.set(self.devices.len() as i64);
        self.metrics = Some(metrics);
        self
    }

    /// Registers a device.
    ///
    /// Checks run in a fixed order: absent ID, ID format, duplicate ID,
    /// thresholds, capacity. Returns `Ok(false)` when the registry is full.
    pub fn add_device<'a>(
        &mut self,
        device_type: DeviceType,
        id: impl Into<Option<&'a str>>,
        operating_min: i32,
        operating_max: i32,
        safe_min: i32,
        safe_max: i32,
    ) -> Result<bool> {
        let id = id.into();
        let thresholds = Thresholds::new(operating_min, operating_max, safe_min, safe_max);
        match self.build_device(device_type, id, thresholds) {
            Ok(device) => Ok(self.insert(device)),
            Err(e) => {
                tracing::warn!(id = id.unwrap_or("<null>"), error = %e, "device rejected");
                if let Some(m) = &self.metrics {
                    m.adds_rejected.inc();
                }
                Err(e)
            }
        }
    }

    /// Registers a device read from configuration. Same checks as
    /// [`DeviceRegistry::add_device`].
    pub fn add_descriptor(&mut self, desc: &DeviceDescriptor) -> Result<bool> {
        let t = desc.thresholds();
        self.add_device(
            desc.device_type,
            desc.id.as_str(),
            t.operating_min,
            t.operating_max,
            t.safe_min,
            t.safe_max,
        )
    }

    fn build_device(
        &self,
        device_type: DeviceType,
        id: Option<&str>,
        thresholds: Thresholds,
    ) -> Result<Device> {
        let raw = id.ok_or(RegistryError::NullId)?;
        let id = DeviceId::parse(raw)?;
        if self.position(raw).is_some() {
            return Err(RegistryError::DuplicateId);
        }
        Device::new(id, device_type, thresholds)
    }

    fn insert(&mut self, device: Device) -> bool {
        if self.is_full() {
            tracing::info!(
                id = %device.id(),
                capacity = self.capacity,
                "registry full, device not added"
            );
            if let Some(m) = &self.metrics {
                m.adds_refused_full.inc();
            }
            return false;
        }
        tracing::debug!(id = %device.id(), device_type = %device.device_type(), "device added");
        self.devices.push(device);
        if let Some(m) = &self.metrics {
            m.adds.inc();
            m.devices_registered.set(self.devices.len() as i64);
        }
        true
    }

    /// Removes the device with `id`. Returns `Ok(false)` if no such device is
    /// registered; the ID's format is not checked.
    pub fn remove_device<'a>(&mut self, id: impl Into<Option<&'a str>>) -> Result<bool> {
        let id = id.into().ok_or(RegistryError::NullId)?;
        let Some(idx) = self.position(id) else {
            return Ok(false);
        };
        let removed = self.devices.remove(idx);
        tracing::debug!(id = %removed.id(), "device removed");
        if let Some(m) = &self.metrics {
            m.removals.inc();
            m.devices_registered.set(self.devices.len() as i64);
        }
        Ok(true)
    }

    pub fn is_device_in_list<'a>(&self, id: impl Into<Option<&'a str>>) -> bool {
        id.into().is_some_and(|id| self.position(id).is_some())
    }

    pub fn num_devices(&self) -> usize {
        self.devices.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.devices.len() >= self.capacity
    }

    pub fn get(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id() == id)
    }

    /// Devices in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &DeviceId> {
        self.devices.iter().map(Device::id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.devices.iter().position(|d| d.id() == id)
    }
}

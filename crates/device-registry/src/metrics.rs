use core::fmt;
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

#[derive(Clone)]
pub struct DeviceMetrics {
    pub devices_registered: IntGauge,
    pub adds: IntCounter,
    pub adds_rejected: IntCounter,
    pub adds_refused_full: IntCounter,
    pub removals: IntCounter,
}

impl fmt::Debug for DeviceMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceMetrics")
            .field("devices_registered", &self.devices_registered.get())
            .field("adds", &self.adds.get())
            .field("adds_rejected", &self.adds_rejected.get())
            .field("adds_refused_full", &self.adds_refused_full.get())
            .field("removals", &self.removals.get())
            .finish()
    }
}

#[derive(Clone)]
pub struct MetricsHub {
    pub registry: Registry,
    pub dev: DeviceMetrics,
}

impl MetricsHub {
    pub fn new() -> Result<Self, String> {
        let registry = Registry::new();
        let devices_registered =
            IntGauge::new("sr_devices_registered", "Number of devices currently registered")
                .map_err(|e| format!("metrics init error: {e}"))?;
        let adds = IntCounter::new("sr_device_add_total", "Devices successfully registered")
            .map_err(|e| format!("metrics init error: {e}"))?;
        let adds_rejected = IntCounter::new(
            "sr_device_add_rejected_total",
            "Device registrations rejected by validation",
        )
        .map_err(|e| format!("metrics init error: {e}"))?;
        let adds_refused_full = IntCounter::new(
            "sr_device_add_refused_full_total",
            "Device registrations refused because the registry was full",
        )
        .map_err(|e| format!("metrics init error: {e}"))?;
        let removals = IntCounter::new("sr_device_remove_total", "Devices removed")
            .map_err(|e| format!("metrics init error: {e}"))?;
        let dev = DeviceMetrics {
            devices_registered,
            adds,
            adds_rejected,
            adds_refused_full,
            removals,
        };
        registry
            .register(Box::new(dev.devices_registered.clone()))
            .map_err(|e| format!("metrics init error: {e}"))?;
        registry
            .register(Box::new(dev.adds.clone()))
            .map_err(|e| format!("metrics init error: {e}"))?;
        registry
            .register(Box::new(dev.adds_rejected.clone()))
            .map_err(|e| format!("metrics init error: {e}"))?;
        registry
            .register(Box::new(dev.adds_refused_full.clone()))
            .map_err(|e| format!("metrics init error: {e}"))?;
        registry
            .register(Box::new(dev.removals.clone()))
            .map_err(|e| format!("metrics init error: {e}"))?;
        Ok(Self { registry, dev })
    }

    pub fn encode_text(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            return format!("error encoding metrics: {e}");
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

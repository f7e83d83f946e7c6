use crate::registry::DeviceRegistry;
use crate::types::DeviceDescriptor;
use anyhow::Context;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub fn load_descriptor_file(path: impl AsRef<Path>) -> anyhow::Result<DeviceDescriptor> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading descriptor: {}", path.display()))?;
    let val: Value =
        serde_yaml::from_str(&raw).with_context(|| format!("parsing yaml: {}", path.display()))?;
    let desc: DeviceDescriptor = serde_yaml::from_value(val)
        .with_context(|| format!("decoding descriptor: {}", path.display()))?;
    Ok(desc)
}

/// Loads every `.yml`/`.yaml` descriptor in `dir` into a default registry.
pub fn load_descriptors_dir(dir: impl AsRef<Path>) -> anyhow::Result<DeviceRegistry> {
    let mut reg = DeviceRegistry::default();
    load_descriptors_dir_into(dir, &mut reg)?;
    Ok(reg)
}

/// Registers descriptors in `dir` into `reg`, in file-name order. Stops at the
/// first descriptor that fails validation or does not fit; devices registered
/// before that point stay in `reg`.
pub fn load_descriptors_dir_into(
    dir: impl AsRef<Path>,
    reg: &mut DeviceRegistry,
) -> anyhow::Result<()> {
    let dir = dir.as_ref();
    let mut entries: Vec<PathBuf> = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("reading directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if let Some(ext) = path.extension() {
            if ext == "yml" || ext == "yaml" {
                entries.push(path);
            }
        }
    }
    entries.sort();
    for p in entries {
        let desc = load_descriptor_file(&p)?;
        let added = reg
            .add_descriptor(&desc)
            .with_context(|| format!("registering {} from {}", desc.id, p.display()))?;
        if !added {
            anyhow::bail!(
                "registry is full ({} devices), cannot register {} from {}",
                reg.capacity(),
                desc.id,
                p.display()
            );
        }
    }
    tracing::info!(
        "Loaded {} device(s) from {}",
        reg.num_devices(),
        dir.display()
    );
    Ok(())
}

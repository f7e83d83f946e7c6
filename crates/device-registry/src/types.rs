use crate::error::{RegistryError, Result};
use core::fmt;
use core::ops::RangeInclusive;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Number of characters in a device ID.
pub const DEVICE_ID_LEN: usize = 4;

/// Category of a controlled device. Carried as a tag only; it takes no part
/// in validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DeviceType {
    FanDriver,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceType::FanDriver => write!(f, "fan_driver"),
        }
    }
}

/// 4-digit numeric device identifier, e.g. `"0042"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn parse(s: &str) -> Result<Self> {
        if is_valid_id(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(RegistryError::InvalidId)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_id(s: &str) -> bool {
    s.len() == DEVICE_ID_LEN && s.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for DeviceId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for DeviceId {
    type Error = RegistryError;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for DeviceId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operating range of a device and the safe sub-range inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub operating_min: i32,
    pub operating_max: i32,
    pub safe_min: i32,
    pub safe_max: i32,
}

impl Thresholds {
    pub fn new(operating_min: i32, operating_max: i32, safe_min: i32, safe_max: i32) -> Self {
        Self {
            operating_min,
            operating_max,
            safe_min,
            safe_max,
        }
    }

    /// Checks that both bounds are non-negative, both ranges are ordered and
    /// the safe range lies inside the operating range.
    pub fn validate(&self) -> Result<()> {
        let ok = self.operating_min >= 0
            && self.operating_max >= 0
            && self.operating_min <= self.operating_max
            && self.safe_min <= self.safe_max
            && self.safe_min >= self.operating_min
            && self.safe_max <= self.operating_max;
        if ok {
            Ok(())
        } else {
            Err(RegistryError::InvalidNumericParameters)
        }
    }

    pub fn operating_range(&self) -> RangeInclusive<i32> {
        self.operating_min..=self.operating_max
    }

    pub fn safe_range(&self) -> RangeInclusive<i32> {
        self.safe_min..=self.safe_max
    }

    pub fn is_operable(&self, value: i32) -> bool {
        self.operating_range().contains(&value)
    }

    pub fn is_safe(&self, value: i32) -> bool {
        self.safe_range().contains(&value)
    }
}

/// A validated device record. Only obtainable through [`Device::new`], so a
/// `Device` in hand always satisfies the threshold invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    id: DeviceId,
    device_type: DeviceType,
    thresholds: Thresholds,
}

impl Device {
    pub fn new(id: DeviceId, device_type: DeviceType, thresholds: Thresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self {
            id,
            device_type,
            thresholds,
        })
    }

    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }
}

/// On-disk form of a device, one per YAML file.
///
/// ```yaml
/// id: "0001"
/// type: fan_driver
/// operating: [0, 80]
/// safe: [10, 60]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct DeviceDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub operating: (i32, i32),
    pub safe: (i32, i32),
}

impl DeviceDescriptor {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.operating.0, self.operating.1, self.safe.0, self.safe.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_accepts_four_digits() {
        assert_eq!(DeviceId::parse("0001").unwrap().as_str(), "0001");
        assert!("9999".parse::<DeviceId>().is_ok());
    }

    #[test]
    fn id_rejects_bad_shapes() {
        for s in ["", " ", "3abc", "011", "01221", " 001", "00 1", "١٢٣٤", "+123"] {
            assert_eq!(DeviceId::parse(s), Err(RegistryError::InvalidId), "{s:?}");
        }
    }

    #[test]
    fn thresholds_accept_nested_ranges() {
        assert!(Thresholds::new(0, 80, 10, 60).validate().is_ok());
        assert!(Thresholds::new(4, 4, 4, 4).validate().is_ok());
        assert!(Thresholds::new(0, 0, 0, 0).validate().is_ok());
    }

    #[test]
    fn thresholds_reject_each_violation() {
        let cases = [
            (-1, 80, 10, 60),
            (0, -1, 0, 0),
            (41, 40, 10, 30),
            (1, 100, 41, 40),
            (10, 100, 9, 40),
            (20, 50, 10, 51),
            (10, 100, 9, 101),
        ];
        for (omin, omax, smin, smax) in cases {
            assert_eq!(
                Thresholds::new(omin, omax, smin, smax).validate(),
                Err(RegistryError::InvalidNumericParameters),
                "{omin} {omax} {smin} {smax}"
            );
        }
    }

    #[test]
    fn range_membership() {
        let t = Thresholds::new(0, 80, 10, 60);
        assert!(t.is_operable(0));
        assert!(t.is_operable(80));
        assert!(!t.is_operable(81));
        assert!(t.is_safe(10));
        assert!(!t.is_safe(61));
    }

    #[test]
    fn device_new_validates() {
        let id = DeviceId::parse("0001").unwrap();
        assert!(Device::new(id.clone(), DeviceType::FanDriver, Thresholds::new(0, 80, 10, 60)).is_ok());
        assert_eq!(
            Device::new(id, DeviceType::FanDriver, Thresholds::new(0, 80, 70, 90)),
            Err(RegistryError::InvalidNumericParameters)
        );
    }

    #[test]
    fn descriptor_from_yaml() {
        let raw = "id: \"0007\"\ntype: fan_driver\noperating: [0, 80]\nsafe: [10, 60]\n";
        let desc: DeviceDescriptor = serde_yaml::from_str(raw).unwrap();
        assert_eq!(desc.id, "0007");
        assert_eq!(desc.device_type, DeviceType::FanDriver);
        assert_eq!(desc.thresholds(), Thresholds::new(0, 80, 10, 60));
    }
}

//! MAC address value object.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A 48-bit IEEE 802 MAC address.
///
/// The identity key for Wi-Fi access points and Bluetooth beacons. Two
/// `MacAddr` values are equal when their bytes match.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Create a `MacAddr` from a byte slice.
    ///
    /// Returns an error if the slice is not exactly 6 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ModelError> {
        let arr: [u8; 6] = bytes
            .try_into()
            .map_err(|_| ModelError::InvalidMac { len: bytes.len() })?;
        Ok(Self(arr))
    }

    /// Parse a `MacAddr` from a colon-separated hex string such as
    /// `"aa:bb:cc:dd:ee:ff"`.
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        let mut bytes = [0u8; 6];
        let mut parts = s.split(':');
        for byte in bytes.iter_mut() {
            let part = parts.next().ok_or_else(|| ModelError::MacParseFailed {
                input: s.to_owned(),
            })?;
            *byte = u8::from_str_radix(part, 16).map_err(|_| ModelError::MacParseFailed {
                input: s.to_owned(),
            })?;
        }
        if parts.next().is_some() {
            return Err(ModelError::MacParseFailed {
                input: s.to_owned(),
            });
        }
        Ok(Self(bytes))
    }

    /// Return the raw 6-byte address.
    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl fmt::Debug for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddr({self})")
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_roundtrip() {
        let mac = MacAddr([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        assert_eq!(mac.to_string(), "aa:bb:cc:dd:ee:ff");
        assert_eq!(MacAddr::parse("aa:bb:cc:dd:ee:ff").unwrap(), mac);
    }

    #[test]
    fn mac_parse_errors() {
        assert!(MacAddr::parse("aa:bb:cc").is_err());
        assert!(MacAddr::parse("aa:bb:cc:dd:ee:ff:00").is_err());
        assert!(MacAddr::parse("zz:bb:cc:dd:ee:ff").is_err());
        assert!(MacAddr::parse("").is_err());
    }

    #[test]
    fn mac_from_bytes() {
        let mac = MacAddr::from_bytes(&[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(mac.0, [1, 2, 3, 4, 5, 6]);

        assert_eq!(
            MacAddr::from_bytes(&[1, 2]),
            Err(ModelError::InvalidMac { len: 2 })
        );
    }
}

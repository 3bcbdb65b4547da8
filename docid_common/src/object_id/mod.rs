//! # Object ID
//!
//! Document-database primary-key identifiers.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use thiserror::Error;
use time::{Duration, OffsetDateTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Unexpected};

/// Object ID generation utilities.
pub mod generator;

/// A 12-byte document-database primary-key identifier.
///
/// Packs a big-endian unix-seconds timestamp, a process-random part and a
/// big-endian counter. The canonical textual form is the 24-character
/// lowercase hexadecimal encoding of the bytes, e.g.
/// `5d08078b1f7eb051eafe2390`, as used in URL path segments and JSON
/// request bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; SIZE]);

/// Errors that can occur when handling object IDs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObjectIdError {
    /// The string has the wrong length for a hex-encoded object ID.
    #[error("expected {expected} hexadecimal characters, but got {got}")]
    InvalidLength { expected: usize, got: usize },
    /// The string contains a non-hexadecimal character.
    #[error("invalid hexadecimal character `{character}` at index {index}")]
    InvalidCharacter { character: char, index: usize },
    /// The value is not an object ID.
    #[error("value is not an object id")]
    InvalidIdentifier,
}

const TIMESTAMP_BYTES: usize = 4;
const PROCESS_BYTES: usize = 5;
const COUNTER_BYTES: usize = 3;
const SIZE: usize = TIMESTAMP_BYTES + PROCESS_BYTES + COUNTER_BYTES;

pub(crate) const COUNTER_MASK: u32 = (1 << (COUNTER_BYTES * 8)) - 1;

impl ObjectId {
    /// Creates an object ID from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; SIZE]) -> Self {
        Self(bytes)
    }

    /// Generates a fresh random object ID.
    #[must_use]
    pub fn generate() -> Self {
        Self::from_parts(
            OffsetDateTime::now_utc(),
            rand::random(),
            rand::random::<u32>() & COUNTER_MASK,
        )
    }

    /// Generates multiple fresh object IDs.
    ///
    /// Generated IDs share their process part and have monotonically
    /// increasing counters.
    #[must_use]
    pub fn generate_multiple(count: usize) -> Vec<Self> {
        generator::ObjectIdGenerator::new().generate_multiple(count)
    }

    /// Creates an object ID from its timestamp, process and counter parts.
    ///
    /// # Panics
    ///
    /// Panics if the timestamp does not fit in 32 bits or the counter does
    /// not fit in 24 bits.
    #[must_use]
    pub fn from_parts(time: OffsetDateTime, process: [u8; PROCESS_BYTES], counter: u32) -> Self {
        let timestamp = time.unix_timestamp();

        assert!(timestamp >= 0 && timestamp < (1 << (TIMESTAMP_BYTES * 8)));
        assert!(counter <= COUNTER_MASK);

        let mut bytes = [0; SIZE];
        bytes[..TIMESTAMP_BYTES].copy_from_slice(&(timestamp as u32).to_be_bytes());
        bytes[TIMESTAMP_BYTES..TIMESTAMP_BYTES + PROCESS_BYTES].copy_from_slice(&process);
        bytes[TIMESTAMP_BYTES + PROCESS_BYTES..]
            .copy_from_slice(&counter.to_be_bytes()[1..]);

        Self(bytes)
    }

    /// Decodes the ID into its timestamp, process and counter parts.
    #[must_use]
    pub fn decode_parts(self) -> (OffsetDateTime, [u8; PROCESS_BYTES], u32) {
        let seconds = u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        let timestamp = OffsetDateTime::UNIX_EPOCH + Duration::seconds(i64::from(seconds));

        let mut process = [0; PROCESS_BYTES];
        process.copy_from_slice(&self.0[TIMESTAMP_BYTES..TIMESTAMP_BYTES + PROCESS_BYTES]);

        let counter = u32::from_be_bytes([0, self.0[9], self.0[10], self.0[11]]);

        (timestamp, process, counter)
    }

    /// The creation time embedded in the ID, at second precision.
    #[must_use]
    pub fn timestamp(self) -> OffsetDateTime {
        self.decode_parts().0
    }

    /// The raw bytes of the ID.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SIZE] {
        &self.0
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 * SIZE {
            return Err(ObjectIdError::InvalidLength {
                expected: 2 * SIZE,
                got: s.len(),
            });
        }
        let mut bytes = [0; SIZE];
        hex::decode_to_slice(s, &mut bytes).map_err(|err| match err {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                ObjectIdError::InvalidCharacter {
                    character: c,
                    index,
                }
            }
            _ => ObjectIdError::InvalidLength {
                expected: 2 * SIZE,
                got: s.len(),
            },
        })?;
        Ok(Self(bytes))
    }
}

impl From<[u8; SIZE]> for ObjectId {
    fn from(bytes: [u8; SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<ObjectId> for [u8; SIZE] {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

#[cfg(feature = "serde")]
impl Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let value = String::deserialize(deserializer)?;
        value.parse::<Self>().map_err(|_| {
            <D as Deserializer<'de>>::Error::invalid_value(
                Unexpected::Str(value.as_str()),
                &"ObjectId",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_random() {
        use std::collections::HashMap;
        const N: usize = 10;

        let mut ids = HashMap::new();
        for _ in 0..N {
            let id = ObjectId::generate();
            ids.insert(id.to_string(), id);
        }
        assert_eq!(ids.len(), N);

        ids = ObjectId::generate_multiple(N)
            .into_iter()
            .map(|id| (id.to_string(), id))
            .collect();
        assert_eq!(ids.len(), N);

        for (id_str, id) in ids {
            let decoded: ObjectId = id_str.parse().unwrap();
            assert_eq!(decoded, id);
        }
    }

    #[test]
    fn parts() {
        let ts = OffsetDateTime::from_unix_timestamp(0x5d08_078b).unwrap();

        let id = ObjectId::from_parts(ts, [0x1f, 0x7e, 0xb0, 0x51, 0xea], 0x00fe_2390);
        assert_eq!(id.to_string(), "5d08078b1f7eb051eafe2390");

        let (timestamp, process, counter) = id.decode_parts();
        assert_eq!(timestamp, ts);
        assert_eq!(process, [0x1f, 0x7e, 0xb0, 0x51, 0xea]);
        assert_eq!(counter, 0x00fe_2390);

        assert_eq!(id.timestamp(), ts);
    }

    #[test]
    fn parse() {
        let id: ObjectId = "5d08078b1f7eb051eafe2390".parse().unwrap();
        assert_eq!(
            id,
            ObjectId::new([
                0x5d, 0x08, 0x07, 0x8b, 0x1f, 0x7e, 0xb0, 0x51, 0xea, 0xfe, 0x23, 0x90,
            ])
        );

        assert_eq!(
            "tooshort".parse::<ObjectId>().unwrap_err(),
            ObjectIdError::InvalidLength {
                expected: 24,
                got: 8,
            }
        );
        assert_eq!(
            "5d08078b1f7eb051eafe239z".parse::<ObjectId>().unwrap_err(),
            ObjectIdError::InvalidCharacter {
                character: 'z',
                index: 23,
            }
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialize() {
        let id: ObjectId = "5d08078b1f7eb051eafe2390".parse().unwrap();
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            r#""5d08078b1f7eb051eafe2390""#
        );

        let decoded: ObjectId =
            serde_json::from_str(r#""5d08078b1f7eb051eafe2390""#).unwrap();
        assert_eq!(decoded, id);

        assert!(serde_json::from_str::<ObjectId>(r#""tooshort""#).is_err());
    }
}

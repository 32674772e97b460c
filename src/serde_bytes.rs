//! Serde helpers for byte arrays
//!
//! Keys, hashes and hints are rendered as lowercase hex in JSON so that the
//! FFI and CLI output stays readable.

use serde::{Deserialize, Deserializer, Serializer};

/// Serialize/deserialize [u8; N] as hex string
pub mod hex_array {
    use super::*;

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom(format!("expected {} bytes", N)))
    }
}

/// Serialize/deserialize Option<Vec<u8>> as an optional hex string
pub mod hex_opt {
    use super::*;

    pub fn serialize<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match bytes {
            Some(bytes) => serializer.serialize_some(&hex::encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        s.map(|s| hex::decode(s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "super::hex_array")]
        hint: [u8; 4],
        #[serde(with = "super::hex_opt")]
        value: Option<Vec<u8>>,
    }

    #[test]
    fn test_hex_fields_roundtrip() {
        let sample = Sample {
            hint: [0xde, 0xad, 0xbe, 0xef],
            value: Some(vec![1, 2]),
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"hint":"deadbeef","value":"0102"}"#);
        assert_eq!(serde_json::from_str::<Sample>(&json).unwrap(), sample);
    }

    #[test]
    fn test_hex_array_wrong_length() {
        let result = serde_json::from_str::<Sample>(r#"{"hint":"dead","value":null}"#);
        assert!(result.is_err());
    }
}

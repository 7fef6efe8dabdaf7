use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::dynamic_bits::DynamicBits;

impl<const WORDS: usize> Serialize for DynamicBits<WORDS> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, const WORDS: usize> Deserialize<'de> for DynamicBits<WORDS> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        string.parse().map_err(de::Error::custom)
    }
}

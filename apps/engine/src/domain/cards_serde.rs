//! Serialization and deserialization for card types

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{CardFace, Color};

// Color serde
impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            Color::Red => "RED",
            Color::Yellow => "YELLOW",
            Color::Green => "GREEN",
            Color::Blue => "BLUE",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "RED" => Ok(Color::Red),
            "YELLOW" => Ok(Color::Yellow),
            "GREEN" => Ok(Color::Green),
            "BLUE" => Ok(Color::Blue),
            _ => Err(serde::de::Error::custom(format!("Invalid color: {s}"))),
        }
    }
}

// CardFace serde as compact token ("R5", "W+4:G")
impl Serialize for CardFace {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CardFace {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<CardFace>()
            .map_err(|e| serde::de::Error::custom(format!("Invalid card token: {e}")))
    }
}

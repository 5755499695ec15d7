//! Serde adapters for the JSON wire shapes.
//!
//! The wire format carries public keys as their canonical string encoding,
//! signatures as hex (or null before signing), and transaction payloads as
//! embedded JSON text. These adapters keep the in-memory types strongly
//! typed while the derives produce exactly that shape.

/// Public key <-> canonical `modulus|exponent` string.
pub mod pubkey {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::identity::PublicKey;

    pub fn serialize<S: Serializer>(key: &PublicKey, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&key.encode())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<PublicKey, D::Error> {
        let text = String::deserialize(de)?;
        PublicKey::decode(&text).map_err(D::Error::custom)
    }
}

/// Optional public key <-> canonical string or null.
pub mod pubkey_opt {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::identity::PublicKey;

    pub fn serialize<S: Serializer>(key: &Option<PublicKey>, ser: S) -> Result<S::Ok, S::Error> {
        match key {
            Some(key) => ser.serialize_some(&key.encode()),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<PublicKey>, D::Error> {
        match Option::<String>::deserialize(de)? {
            Some(text) => PublicKey::decode(&text).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}

/// Optional signature <-> hex string or null.
pub mod sig_hex {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::identity::Signature;

    pub fn serialize<S: Serializer>(sig: &Option<Signature>, ser: S) -> Result<S::Ok, S::Error> {
        match sig {
            Some(sig) => ser.serialize_some(&sig.to_hex()),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Signature>, D::Error> {
        match Option::<String>::deserialize(de)? {
            Some(text) => hex::decode(&text)
                .map(|bytes| Some(Signature(bytes)))
                .map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}

/// Payload <-> embedded JSON text.
pub mod payload_text {
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::Payload;

    pub fn serialize<S: Serializer>(payload: &Payload, ser: S) -> Result<S::Ok, S::Error> {
        let text = serde_json::to_string(&payload.0).map_err(S::Error::custom)?;
        ser.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Payload, D::Error> {
        let text = String::deserialize(de)?;
        let map = serde_json::from_str(&text).map_err(D::Error::custom)?;
        Ok(Payload(map))
    }
}

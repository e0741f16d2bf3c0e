// In: src/bridge/serde_flags.rs

//! `serde` adapter that writes a flags value as its name list, as one opaque
//! string value.
//!
//! ```
//! # use bytemuck::{Pod, Zeroable};
//! # use flagtext::{FlagEnum, FlagWidth};
//! # #[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
//! # #[repr(transparent)]
//! # struct Access(u8);
//! # impl FlagEnum for Access {
//! #     type Repr = u8;
//! #     const WIDTH: FlagWidth = FlagWidth::UInt8;
//! #     const MEMBERS: &'static [(&'static str, Self)] =
//! #         &[("Read", Access(1)), ("Write", Access(2))];
//! # }
//! #[derive(serde::Serialize, serde::Deserialize)]
//! struct Grant {
//!     #[serde(with = "flagtext::serde_flags")]
//!     access: Access,
//! }
//!
//! let json = serde_json::to_string(&Grant { access: Access(3) }).unwrap();
//! assert_eq!(json, r#"{"access":"Write, Read"}"#);
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Visitor};
use serde::ser::{self, Serializer};
use serde::Deserializer;

use crate::bridge::registry::shared_codec;
use crate::traits::FlagEnum;

pub fn serialize<E, S>(value: &E, serializer: S) -> Result<S::Ok, S::Error>
where
    E: FlagEnum,
    S: Serializer,
{
    let codec = shared_codec::<E>().map_err(<S::Error as ser::Error>::custom)?;
    codec
        .encode_with(*value, |bytes| match std::str::from_utf8(bytes) {
            Ok(text) => serializer.serialize_str(text),
            Err(e) => Err(<S::Error as ser::Error>::custom(e)),
        })
        .map_err(<S::Error as ser::Error>::custom)?
}

pub fn deserialize<'de, E, D>(deserializer: D) -> Result<E, D::Error>
where
    E: FlagEnum,
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(FlagsVisitor(PhantomData))
}

struct FlagsVisitor<E>(PhantomData<fn() -> E>);

impl<'de, E: FlagEnum> Visitor<'de> for FlagsVisitor<E> {
    type Value = E;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a delimited list of {} member names", E::type_name())
    }

    fn visit_str<DeErr: de::Error>(self, text: &str) -> Result<E, DeErr> {
        self.visit_bytes(text.as_bytes())
    }

    fn visit_bytes<DeErr: de::Error>(self, bytes: &[u8]) -> Result<E, DeErr> {
        let codec = shared_codec::<E>().map_err(DeErr::custom)?;
        codec.decode(bytes).map_err(DeErr::custom)
    }
}

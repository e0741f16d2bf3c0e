use super::*;
use crate::buffer_pool::BufferPool;
use crate::config::CodecConfig;
use crate::error::FlagsError;
use crate::naming::NamingPolicy;
use crate::traits::FlagEnum;
use crate::types::FlagWidth;
use bytemuck::{Pod, Zeroable};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread;

//==================================================================================
// Fixtures
//==================================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
struct Letters(u8);

impl Letters {
    const A: Self = Self(1);
    const B: Self = Self(2);
    const C: Self = Self(4);
    const D: Self = Self(8);
    const AB: Self = Self(3);
}

impl FlagEnum for Letters {
    type Repr = u8;
    const WIDTH: FlagWidth = FlagWidth::UInt8;
    const MEMBERS: &'static [(&'static str, Self)] = &[
        ("A", Self::A),
        ("B", Self::B),
        ("C", Self::C),
        ("D", Self::D),
        ("AB", Self::AB),
    ];
}

/// Same bits as `Letters`, plus a dedicated zero member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
struct Options(u8);

impl FlagEnum for Options {
    type Repr = u8;
    const WIDTH: FlagWidth = FlagWidth::UInt8;
    const MEMBERS: &'static [(&'static str, Self)] = &[
        ("None", Options(0)),
        ("A", Options(1)),
        ("B", Options(2)),
        ("C", Options(4)),
        ("D", Options(8)),
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
struct FilePermissions(u32);

impl FlagEnum for FilePermissions {
    type Repr = u32;
    const WIDTH: FlagWidth = FlagWidth::UInt32;
    const MEMBERS: &'static [(&'static str, Self)] = &[
        ("OwnerRead", FilePermissions(0o400)),
        ("OwnerWrite", FilePermissions(0o200)),
        ("OwnerExecute", FilePermissions(0o100)),
        ("GroupRead", FilePermissions(0o040)),
        ("GroupWrite", FilePermissions(0o020)),
        ("GroupExecute", FilePermissions(0o010)),
        ("OtherRead", FilePermissions(0o004)),
        ("OtherWrite", FilePermissions(0o002)),
        ("OtherExecute", FilePermissions(0o001)),
        ("OwnerAll", FilePermissions(0o700)),
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
struct Lonely(u8);

impl FlagEnum for Lonely {
    type Repr = u8;
    const WIDTH: FlagWidth = FlagWidth::UInt8;
    const MEMBERS: &'static [(&'static str, Self)] = &[("Only", Lonely(1))];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
struct WrongWidth(u16);

impl FlagEnum for WrongWidth {
    type Repr = u16;
    const WIDTH: FlagWidth = FlagWidth::UInt32;
    const MEMBERS: &'static [(&'static str, Self)] = &[("X", WrongWidth(1)), ("Y", WrongWidth(2))];
}

fn letters() -> FlagsCodec<Letters> {
    FlagsCodec::new(&CodecConfig::default()).unwrap()
}

fn text(codec: &FlagsCodec<Letters>, value: u8) -> Result<String, FlagsError> {
    codec.encode_to_string(Letters(value))
}

//==================================================================================
// Encoding
//==================================================================================

#[test]
fn test_roundtrip_all_sixteen_combinations() {
    let codec = letters();
    for bits in 0u8..16 {
        let encoded = codec.encode_to_vec(Letters(bits)).unwrap();
        assert_eq!(codec.decode(&encoded).unwrap(), Letters(bits), "bits {}", bits);
    }
}

#[test]
fn test_canonical_descending_order() {
    let codec = letters();
    assert_eq!(text(&codec, 5).unwrap(), "C, A");
    assert_eq!(text(&codec, Letters::A.0 | Letters::C.0).unwrap(), "C, A");
    assert_eq!(text(&codec, Letters::C.0 | Letters::A.0).unwrap(), "C, A");
    assert_eq!(text(&codec, Letters::B.0 | Letters::D.0).unwrap(), "D, B");
}

#[test]
fn test_exact_alias_fast_path() {
    let codec = letters();
    assert_eq!(text(&codec, 3).unwrap(), "AB");
}

#[test]
fn test_zero_handling() {
    assert_eq!(text(&letters(), 0).unwrap(), "");

    let options = FlagsCodec::<Options>::new(&CodecConfig::default()).unwrap();
    assert_eq!(options.encode_to_string(Options(0)).unwrap(), "None");
    assert_eq!(options.decode(b"None").unwrap(), Options(0));
    assert_eq!(options.decode(b"").unwrap(), Options(0));
}

#[test]
fn test_unmapped_rejection() {
    let codec = letters();
    assert!(matches!(
        text(&codec, 16),
        Err(FlagsError::UnmappedValue { .. })
    ));
    assert!(matches!(
        text(&codec, 1 | 16),
        Err(FlagsError::UnmappedBitValue { .. })
    ));
}

#[test]
fn test_error_messages_name_the_type() {
    let err = text(&letters(), 1 | 16).unwrap_err().to_string();
    assert!(err.contains("16"), "{}", err);
    assert!(err.contains("Letters"), "{}", err);
}

#[test]
fn test_encode_to_writer() {
    let codec = letters();
    let mut out = Vec::new();
    codec.encode_to(Letters(12), &mut out).unwrap();
    out.extend_from_slice(b";");
    codec.encode_to(Letters(1), &mut out).unwrap();
    assert_eq!(out, b"D, C;A");
}

#[test]
fn test_encode_to_full_writer_is_io_error() {
    let codec = letters();
    let mut storage = [0u8; 2];
    let mut writer: &mut [u8] = &mut storage;
    let result = codec.encode_to(Letters(12), &mut writer);
    assert!(matches!(result, Err(FlagsError::Io(_))));
}

//==================================================================================
// Decoding
//==================================================================================

#[test]
fn test_decode_fast_reject() {
    let codec = letters();
    assert!(matches!(
        codec.decode(b"ABCD"),
        Err(FlagsError::NameTooLong { max: 2, .. })
    ));
}

#[test]
fn test_decode_unknown_name() {
    let codec = letters();
    match codec.decode(b"C, Z") {
        Err(FlagsError::UnmappedValue { value, .. }) => assert_eq!(value, "Z"),
        other => panic!("Expected UnmappedValue, got {:?}", other),
    }
}

#[test]
fn test_chunked_equivalence() {
    let codec = letters();
    let contiguous = codec.decode(b"C, A").unwrap();
    assert_eq!(codec.decode_chunks(&[b"C, ", b"A"]).unwrap(), contiguous);
    assert_eq!(codec.decode_chunks(&[b"A", b"B"]).unwrap(), Letters::AB);
}

#[test]
fn test_chunked_unsupported_case() {
    let codec = letters();
    assert!(matches!(
        codec.decode_chunks(&[b"C,", b" A"]),
        Err(FlagsError::ChunkedSeparatorUnsupported { .. })
    ));
}

#[test]
fn test_chunked_matches_contiguous_at_every_split() {
    let codec = FlagsCodec::<FilePermissions>::new(&CodecConfig::default()).unwrap();
    let value = FilePermissions(0o754);
    let encoded = codec.encode_to_vec(value).unwrap();
    assert_eq!(encoded, b"OwnerAll, GroupRead, GroupExecute, OtherRead");

    for split in 0..=encoded.len() {
        let (head, tail) = encoded.split_at(split);
        match codec.decode_chunks(&[head, tail]) {
            Ok(decoded) => assert_eq!(decoded, value, "split at {}", split),
            // Only a cut between ',' and ' ' splits the separator itself.
            Err(FlagsError::ChunkedSeparatorUnsupported { .. }) => {
                assert_eq!(&encoded[split - 1..=split], b", ", "split at {}", split)
            }
            Err(other) => panic!("split at {}: {:?}", split, other),
        }
    }
}

//==================================================================================
// Configuration
//==================================================================================

#[test]
fn test_invalid_enum_declarations() {
    assert!(matches!(
        FlagsCodec::<Lonely>::new(&CodecConfig::default()),
        Err(FlagsError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        FlagsCodec::<WrongWidth>::new(&CodecConfig::default()),
        Err(FlagsError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_custom_separator_and_naming_policy() {
    let config = CodecConfig {
        separator: " | ".to_string(),
        hash_seed: 0x9e37_79b9,
        naming_policy: NamingPolicy::SnakeCaseLower,
    };
    let codec = FlagsCodec::<FilePermissions>::new(&config).unwrap();
    let encoded = codec.encode_to_string(FilePermissions(0o640)).unwrap();
    assert_eq!(encoded, "owner_read | owner_write | group_read");
    assert_eq!(codec.decode(encoded.as_bytes()).unwrap(), FilePermissions(0o640));
    assert!(codec.decode(b"OwnerRead").is_err());
}

#[test]
fn test_short_tables_do_not_touch_the_pool() {
    let pool = Arc::new(BufferPool::new(2));
    let codec = FlagsCodec::<FilePermissions>::with_pool(&CodecConfig::default(), pool.clone()).unwrap();
    // Every name written once still fits the stack scratch buffer.
    assert!(codec.table().max_length() < 256);
    codec.encode_to_vec(FilePermissions(0o777)).unwrap();
    assert_eq!(pool.available(), 0);
    assert_eq!(pool.outstanding(), 0);
}

//==================================================================================
// Shared codecs, stateless API and serde
//==================================================================================

#[test]
fn test_registry_builds_once_per_type() {
    let first = shared_codec::<Letters>().unwrap();
    let second = shared_codec::<Letters>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(shared_codec::<Lonely>().is_err());
}

#[test]
fn test_stateless_api() {
    assert_eq!(encode_flags(Letters(13)).unwrap(), b"D, C, A");
    assert_eq!(decode_flags::<Letters>(b"D, C, A").unwrap(), Letters(13));
    assert_eq!(decode_flag_chunks::<Letters>(&[b"D, ", b"C"]).unwrap(), Letters(12));
}

#[test]
fn test_concurrent_use_of_shared_codec() {
    let handles: Vec<_> = (0..4)
        .map(|t| {
            thread::spawn(move || {
                for bits in 0u8..16 {
                    let value = Letters(bits ^ (t as u8 & 0xF));
                    let encoded = encode_flags(value).unwrap();
                    assert_eq!(decode_flags::<Letters>(&encoded).unwrap(), value);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_random_permission_roundtrip() {
    let codec = FlagsCodec::<FilePermissions>::new(&CodecConfig::default()).unwrap();
    let mut rng = rand::rng();
    for _ in 0..500 {
        let value = FilePermissions(rng.random_range(0..=0o777));
        let encoded = codec.encode_to_vec(value).unwrap();
        assert_eq!(codec.decode(&encoded).unwrap(), value);
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Grant {
    user: String,
    #[serde(with = "crate::bridge::serde_flags")]
    letters: Letters,
}

#[test]
fn test_serde_adapter() {
    let grant = Grant {
        user: "ada".to_string(),
        letters: Letters(7),
    };
    let json = serde_json::to_string(&grant).unwrap();
    assert_eq!(json, r#"{"user":"ada","letters":"C, AB"}"#);
    assert_eq!(serde_json::from_str::<Grant>(&json).unwrap(), grant);
}

#[test]
fn test_serde_adapter_errors() {
    let unknown = serde_json::from_str::<Grant>(r#"{"user":"ada","letters":"C, Q"}"#);
    assert!(unknown.unwrap_err().to_string().contains("Q"));

    let unmapped = serde_json::to_string(&Grant {
        user: "ada".to_string(),
        letters: Letters(0x80),
    });
    assert!(unmapped.is_err());
}

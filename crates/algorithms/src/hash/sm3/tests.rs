use super::*;
use hex;

const ABC_DIGEST: &str = "66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0";
const EMPTY_DIGEST: &str = "1ab21d8355cfa17f8e61194831e81a8f22bec8c728fefb747ed035eb5082aa2b";

#[test]
fn test_sm3_abc() {
    let digest = Sm3::digest(b"abc").unwrap();
    assert_eq!(hex::encode(digest), ABC_DIGEST);
}

#[test]
fn test_sm3_one_block_sample() {
    // 64-byte sample message from GB/T 32905 appendix A.2
    let digest = Sm3::digest(&b"abcd".repeat(16)).unwrap();
    assert_eq!(
        hex::encode(digest),
        "debe9ff92275b8a138604889c18e5a4d6fdb70e5387e5765293dcba39c0c5732"
    );
}

#[test]
fn test_sm3_empty_input_is_standard_digest() {
    assert_eq!(hex::encode(Sm3::digest(b"").unwrap()), EMPTY_DIGEST);
    assert_eq!(hash_hex(b"").unwrap(), EMPTY_DIGEST);
    assert_eq!(hash_hex_with(b"", BlankInput::Standard).unwrap(), EMPTY_DIGEST);
}

#[test]
fn test_sm3_legacy_blank_input_mode() {
    assert_eq!(hash_hex_with(b"", BlankInput::LegacyEmpty).unwrap(), "");
    assert_eq!(hash_hex_with(b" \t\r\n", BlankInput::LegacyEmpty).unwrap(), "");
    // Non-blank input hashes normally in either mode
    assert_eq!(hash_hex_with(b"abc", BlankInput::LegacyEmpty).unwrap(), ABC_DIGEST);
    // Whitespace is part of the message in standard mode
    assert_ne!(hash_hex_with(b" ", BlankInput::Standard).unwrap(), "");
}

#[test]
fn test_sm3_legacy_blank_treats_lone_zero_as_blank() {
    assert_eq!(hash_hex_with(b"0", BlankInput::LegacyEmpty).unwrap(), "");
    assert_eq!(hash_hex_with(b" 0\n", BlankInput::LegacyEmpty).unwrap(), "");
    assert_eq!(hash_hex_with(b"\x000\x0b", BlankInput::LegacyEmpty).unwrap(), "");

    // Only a lone zero counts
    for msg in [&b"00"[..], b"0 0", b"1", b"0.0"] {
        assert_eq!(
            hash_hex_with(msg, BlankInput::LegacyEmpty).unwrap(),
            hash_hex(msg).unwrap()
        );
    }
    assert_eq!(hash_hex_with(b"0", BlankInput::Standard).unwrap(), hash_hex(b"0").unwrap());
    assert_ne!(hash_hex(b"0").unwrap(), "");
}

#[test]
fn test_sm3_streaming_matches_one_shot() {
    let data: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();
    let expected = Sm3::digest(&data).unwrap();

    for chunk in [1usize, 7, 55, 56, 63, 64, 65, 128, 999] {
        let mut h = Sm3::new();
        for piece in data.chunks(chunk) {
            h.update(piece).unwrap();
        }
        assert_eq!(h.finalize().unwrap(), expected, "chunk size {}", chunk);
    }
}

#[test]
fn test_sm3_padding_boundaries() {
    // Lengths around the 56-byte threshold need one or two padding blocks
    let mut seen = Vec::new();
    for len in 54..=66 {
        let msg = vec![0x61u8; len];
        let d = Sm3::digest(&msg).unwrap();
        assert!(!seen.contains(&d), "collision at length {}", len);
        seen.push(d);
    }
}

#[test]
fn test_sm3_finalize_resets_state() {
    let mut h = Sm3::new();
    h.update(b"abc").unwrap();
    let first = h.finalize().unwrap();
    h.update(b"abc").unwrap();
    let second = h.finalize().unwrap();
    assert_eq!(first, second);
    assert_eq!(h.finalize().unwrap().to_vec(), hex::decode(EMPTY_DIGEST).unwrap());
}

#[test]
fn test_sm3_determinism_and_distinctness() {
    let samples: [&[u8]; 6] = [b"a", b"b", b"ab", b"ba", b"abc ", b"\x00"];
    for s in samples.iter() {
        assert_eq!(Sm3::digest(s).unwrap(), Sm3::digest(s).unwrap());
    }
    for (i, a) in samples.iter().enumerate() {
        for b in samples.iter().skip(i + 1) {
            assert_ne!(Sm3::digest(a).unwrap(), Sm3::digest(b).unwrap());
        }
    }
}

#[test]
fn test_hash_parts() {
    let joined = hash_parts(&[b"ab", b"", b"c"]).unwrap();
    assert_eq!(hex::encode(joined), ABC_DIGEST);
}

#[test]
fn test_sm3_metadata() {
    assert_eq!(Sm3::output_size(), 32);
    assert_eq!(Sm3::block_size(), 64);
    assert_eq!(Sm3::name(), "SM3");
}

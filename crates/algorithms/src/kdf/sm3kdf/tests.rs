use super::*;
use hex;

#[test]
fn test_kdf_known_output() {
    let out = kdf(b"abc", 19).unwrap();
    assert_eq!(hex::encode(out.as_slice()), "fe1ea80dac6f100c33537bd24619ec7c72a1e8");
}

#[test]
fn test_kdf_multi_block() {
    let out = kdf(b"abc", 70).unwrap();
    assert_eq!(
        hex::encode(out.as_slice()),
        "fe1ea80dac6f100c33537bd24619ec7c72a1e8b1ffeaefb1eb52a37791fdaf61\
         9db16c0ac7bebb47238c6cc925ff66af7936e278e12d2664502bb38b03fd41cb\
         2975a660d33e"
    );
}

#[test]
fn test_kdf_first_block_is_hash_of_counter_one() {
    let out = kdf(b"abc", 32).unwrap();
    let expected = Sm3::digest(b"abc\x00\x00\x00\x01").unwrap();
    assert_eq!(out.as_slice(), expected.as_ref());
}

#[test]
fn test_kdf_prefix_property() {
    let long = kdf(b"shared", 100).unwrap();
    for len in [0usize, 1, 31, 32, 33, 64, 99] {
        let short = kdf(b"shared", len).unwrap();
        assert_eq!(short.as_slice(), &long.as_slice()[..len]);
    }
}

#[test]
fn test_kdf_zero_length() {
    assert!(kdf(b"anything", 0).unwrap().is_empty());
}

#[test]
fn test_kdf_trait_and_builder_agree() {
    let kdf_impl = Sm3Kdf::new();
    let direct = kdf_impl.derive_key(b"ikm", Some(b"info"), 40).unwrap();
    let built = kdf_impl
        .builder()
        .with_ikm(b"ikm")
        .with_info(b"info")
        .with_output_length(40)
        .derive()
        .unwrap();
    assert_eq!(direct, built);

    let arr: [u8; 16] = kdf_impl.builder().with_ikm(b"ikm").derive_array().unwrap();
    assert_eq!(&arr[..], &kdf(b"ikm", 16).unwrap().as_slice()[..]);

    // Shared info changes the output
    let plain = kdf_impl.derive_key(b"ikm", None, 40).unwrap();
    assert_ne!(plain, direct);
}

#[test]
fn test_kdf_name() {
    assert_eq!(Sm3KdfAlgorithm::name(), "SM3-KDF");
}

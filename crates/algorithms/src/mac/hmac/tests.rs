use super::*;
use hex;

#[test]
fn test_hmac_sm3_short_key() {
    let tag = HmacSm3::mac(&[0x0b; 20], b"Hi There").unwrap();
    assert_eq!(
        hex::encode(tag),
        "51b00d1fb49832bfb01c3ce27848e59f871d9ba938dc563b338ca964755cce70"
    );
}

#[test]
fn test_hmac_sm3_text_key() {
    let tag = HmacSm3::mac(b"key", b"The quick brown fox jumps over the lazy dog").unwrap();
    assert_eq!(
        hex::encode(tag),
        "bd4a34077888162b210645b8ebf74b9af357303789357a27c7fc457244ebd398"
    );
}

#[test]
fn test_hmac_sm3_long_key_is_hashed() {
    let tag = HmacSm3::mac(
        &[0xaa; 80],
        b"Test Using Larger Than Block-Size Key - Hash Key First",
    )
    .unwrap();
    assert_eq!(
        hex::encode(tag),
        "c794651f5455f80546855f744ff50146d5286e1cb677d5088c059cd8b03bb9ce"
    );
}

#[test]
fn test_hmac_streaming_matches_one_shot() {
    let mut mac = HmacSm3::new(b"key").unwrap();
    mac.update(b"The quick brown ").unwrap();
    mac.update(b"fox jumps over the lazy dog").unwrap();
    let tag = mac.finalize().unwrap();
    assert_eq!(
        tag,
        HmacSm3::mac(b"key", b"The quick brown fox jumps over the lazy dog").unwrap()
    );

    assert!(mac.update(b"more").is_err());
    assert!(mac.finalize().is_err());
}

#[test]
fn test_hmac_verify() {
    let tag = HmacSm3::mac(b"k", b"data").unwrap();
    assert!(HmacSm3::verify(b"k", b"data", &tag).unwrap());
    assert!(!HmacSm3::verify(b"k", b"datA", &tag).unwrap());
    assert!(!HmacSm3::verify(b"k", b"data", &tag[..31]).unwrap());

    let mut bad = tag.clone();
    bad[0] ^= 1;
    assert!(!HmacSm3::verify(b"k", b"data", &bad).unwrap());
}

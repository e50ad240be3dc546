//! Published test vectors
//!
//! SM3 values are from GB/T 32905 appendix A. The SM2 key, nonce and the
//! resulting signature and ciphertext are the sm2p256v1 examples of
//! GB/T 32918.5.

/// SM3("abc")
pub const SM3_ABC: &str = "66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0";

/// SM3("abcd" × 16)
pub const SM3_ABCD16: &str = "debe9ff92275b8a138604889c18e5a4d6fdb70e5387e5765293dcba39c0c5732";

/// SM3 of the empty string
pub const SM3_EMPTY: &str = "1ab21d8355cfa17f8e61194831e81a8f22bec8c728fefb747ed035eb5082aa2b";

pub const SM2_PRIVATE: &str = "3945208f7b2144b13f36e38ac6d39f95889393692860b51a42fb81ef4df7c5b8";

pub const SM2_PUBLIC: &str = "04\
    09f9df311e5421a150dd7d161e4bc5c672179fad1833fc076bb08ff356f35020\
    ccea490ce26775a52dc6ea718cc1aa600aed05fbf35e084a6632f6072da9ad13";

pub const SM2_NONCE: &str = "59276e27d506861a16680f3ad9c02dccef3cc1fa3cdbe4ce6d54b80deac1bc21";

/// Signature of "message digest" under the default identity
pub const SM2_SIGNATURE_DER: &str = "3046\
    022100f5a03b0648d2c4630eeac513e1bb81a15944da3827d5b74143ac7eaceee720b3\
    022100b1b6aa29df212fd8763182bc0d421ca1bb9038fd1f7f42d4840b69c485bbc1aa";

/// Encryption of "encryption standard", `C1 ∥ C3 ∥ C2`
pub const SM2_CIPHERTEXT_C1C3C2: &str = "04\
    04ebfc718e8d1798620432268e77feb6415e2ede0e073c0f4f640ecd2e149a73\
    e858f9d81e5430a57b36daab8f950a3c64e6ee6a63094d99283aff767e124df0\
    59983c18f809e262923c53aec295d30383b54e39d609d160afcb1908d0bd8766\
    21886ca989ca9c7d58087307ca93092d651efa";

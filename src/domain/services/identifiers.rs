use rand::{rngs::OsRng, Rng, RngCore};

pub const SLUG_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-";
pub const SLUG_MIN_LEN: usize = 3;
pub const SLUG_MAX_LEN: usize = 6;
pub const TOKEN_BYTES: usize = 32;

/// Short public identifier. Not guaranteed unique; callers check the store.
pub fn random_slug() -> String {
    let mut rng = OsRng;
    let len = rng.gen_range(SLUG_MIN_LEN..=SLUG_MAX_LEN);
    (0..len)
        .map(|_| SLUG_ALPHABET[rng.gen_range(0..SLUG_ALPHABET.len())] as char)
        .collect()
}

/// 256-bit secret, lowercase hex.
pub fn random_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

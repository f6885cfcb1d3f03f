use crate::core::types::SessionId;

use super::hash::Salt;

pub trait FromRandom {
    fn from_random() -> Self;
}

impl FromRandom for SessionId {
    fn from_random() -> Self {
        SessionId(random_string(64))
    }
}

impl FromRandom for Salt {
    fn from_random() -> Self {
        Salt(random_string(16))
    }
}

fn random_string(size: usize) -> String {
    use base64::Engine;
    use rand::Rng;

    let s: String = rand::thread_rng()
        .sample_iter(rand::distributions::Alphanumeric)
        .take(size)
        .map(char::from)
        .collect();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(s)
}

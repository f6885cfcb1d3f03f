use crate::core::types::{ClientSecret, HashedClientSecret};
use crate::provider::error::Error;

use super::random::FromRandom;

#[derive(Debug)]
pub struct Salt(pub String);

/// Argon2 hashing of client secrets, keyed with a server-side secret.
#[derive(Debug, Clone)]
pub struct HashingService {
    secret_key: String,
}

impl HashingService {
    pub fn with_secret_key(secret_key: String) -> Self {
        Self { secret_key }
    }

    fn get_config(&self) -> argon2::Config<'_> {
        let mut config = argon2::Config::default();
        config.secret = self.secret_key.as_bytes();
        config
    }

    pub fn hash(&self, secret: &ClientSecret) -> Result<HashedClientSecret, Error> {
        let salt = Salt::from_random();
        let hash = argon2::hash_encoded(
            secret.as_ref().as_bytes(),
            salt.0.as_bytes(),
            &self.get_config(),
        )?;

        Ok(hash.into())
    }

    pub fn verify(&self, secret: &ClientSecret, hashed: &HashedClientSecret) -> Result<bool, Error> {
        let result = argon2::verify_encoded_ext(
            hashed.as_ref(),
            secret.as_ref().as_bytes(),
            self.secret_key.as_bytes(),
            &[],
        )?;
        Ok(result)
    }

    /// Runs [`verify`](Self::verify) on the blocking pool so request
    /// handlers never hash on an executor thread.
    pub async fn verify_blocking(
        &self,
        secret: &ClientSecret,
        hashed: &HashedClientSecret,
    ) -> Result<bool, Error> {
        let hasher = self.clone();
        let secret = secret.clone();
        let hashed = hashed.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&secret, &hashed)).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> ClientSecret {
        ClientSecret(s.to_string())
    }

    #[test]
    fn verifies_own_hash() {
        let hasher = HashingService::with_secret_key("pepper".to_string());
        let hashed = hasher.hash(&secret("s3cret")).unwrap();

        assert_ne!(hashed.0, "s3cret");
        assert!(hasher.verify(&secret("s3cret"), &hashed).unwrap());
        assert!(!hasher.verify(&secret("other"), &hashed).unwrap());
    }

    #[test]
    fn secret_key_is_part_of_the_hash() {
        let hashed = HashingService::with_secret_key("pepper".to_string())
            .hash(&secret("s3cret"))
            .unwrap();
        let other = HashingService::with_secret_key("salt".to_string());

        assert!(!other.verify(&secret("s3cret"), &hashed).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let hasher = HashingService::with_secret_key("pepper".to_string());
        let result = hasher.verify(&secret("s3cret"), &HashedClientSecret("plain".to_string()));
        assert!(matches!(result, Err(Error::Hash(_))));
    }

    #[tokio::test]
    async fn blocking_verify_matches_inline_verify() {
        let hasher = HashingService::with_secret_key("pepper".to_string());
        let hashed = hasher.hash(&secret("s3cret")).unwrap();

        assert!(hasher.verify_blocking(&secret("s3cret"), &hashed).await.unwrap());
        assert!(!hasher.verify_blocking(&secret("other"), &hashed).await.unwrap());

        let result = hasher
            .verify_blocking(&secret("s3cret"), &HashedClientSecret("plain".to_string()))
            .await;
        assert!(matches!(result, Err(Error::Hash(_))));
    }
}

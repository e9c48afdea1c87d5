use crate::config::Argon2Config;
use crate::errors::{ClassroomError, Result};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// 凭据校验能力：哈希与校验密码
pub trait CredentialVerifier: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id 实现
pub struct Argon2Verifier {
    params: Params,
}

impl Argon2Verifier {
    pub fn new(config: &Argon2Config) -> Result<Self> {
        let params = Params::new(
            config.memory_cost,
            config.time_cost,
            config.parallelism,
            None,
        )
        .map_err(|e| ClassroomError::validation(format!("Argon2 参数错误: {e}")))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialVerifier for Argon2Verifier {
    /// 哈希密码
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ClassroomError::validation(format!("密码哈希失败: {e}")))?;
        Ok(hash.to_string())
    }

    /// 验证密码（参数取自哈希串本身）
    fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed_hash) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Argon2Verifier {
        Argon2Verifier::new(&Argon2Config {
            memory_cost: 8,
            time_cost: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let verifier = cheap();
        let hash = verifier.hash("correct horse 1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verifier.verify("correct horse 1", &hash));
        assert!(!verifier.verify("wrong horse 1", &hash));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!cheap().verify("anything", "not-a-hash"));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = Argon2Verifier::new(&Argon2Config {
            memory_cost: 0,
            time_cost: 0,
            parallelism: 0,
        });
        assert!(result.is_err());
    }
}

//! Cipher port - 対称暗号 + チェックサム
//!
//! 支払い系など外部のロジックが利用する境界。実装は `impls::AesGcmCipher`。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    Encrypt(String),

    #[error("decryption failed: {0}")]
    Decrypt(String),

    #[error("malformed token: {0}")]
    Decode(String),
}

pub trait Cipher: Send + Sync {
    /// plaintext を暗号化して文字列 token にする
    fn encrypt(&self, plaintext: &[u8]) -> Result<String, CipherError>;

    /// `encrypt` の逆
    fn decrypt(&self, token: &str) -> Result<Vec<u8>, CipherError>;

    /// 小文字 hex の digest
    fn checksum(&self, bytes: &[u8]) -> String;
}

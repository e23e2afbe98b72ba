//! AesGcmCipher - AES-256-GCM による Cipher 実装
//!
//! token 形式: URL-safe base64( nonce(12 bytes) || ciphertext+tag )
//! checksum: SHA-256 の小文字 hex

use std::collections::BTreeMap;

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ports::{Cipher, CipherError};

const NONCE_LEN: usize = 12;

#[derive(Clone)]
pub struct AesGcmCipher {
    cipher: Aes256Gcm,
}

impl AesGcmCipher {
    /// ランダムな鍵で作る（プロセス内でのみ有効）
    pub fn generate() -> Self {
        let key = Aes256Gcm::generate_key(OsRng);
        Self {
            cipher: Aes256Gcm::new(&key),
        }
    }

    /// passphrase + salt から PBKDF2-HMAC-SHA256 で鍵を導出
    pub fn from_passphrase(passphrase: &str, salt: &[u8]) -> Self {
        use pbkdf2::pbkdf2_hmac_array;

        // テストでは反復回数を減らして高速化
        #[cfg(test)]
        const ITERATIONS: u32 = 1_000;
        #[cfg(not(test))]
        const ITERATIONS: u32 = 100_000;

        let key_bytes: [u8; 32] =
            pbkdf2_hmac_array::<Sha256, 32>(passphrase.as_bytes(), salt, ITERATIONS);
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key_bytes)),
        }
    }

    /// 各フィールドを暗号化し、暗号化後のフィールド全体に checksum を付ける
    pub fn seal(&self, fields: &BTreeMap<String, String>) -> Result<SealedPayload, CipherError> {
        let mut encrypted = BTreeMap::new();
        for (k, v) in fields {
            encrypted.insert(k.clone(), self.encrypt(v.as_bytes())?);
        }
        let checksum = self.checksum(&canonical_bytes(&encrypted));
        Ok(SealedPayload {
            fields: encrypted,
            checksum,
        })
    }

    /// checksum が一致するか
    pub fn verify(&self, sealed: &SealedPayload) -> bool {
        self.checksum(&canonical_bytes(&sealed.fields)) == sealed.checksum
    }

    /// `seal` の逆。checksum が合わなければ Decrypt エラー
    pub fn open(&self, sealed: &SealedPayload) -> Result<BTreeMap<String, String>, CipherError> {
        if !self.verify(sealed) {
            return Err(CipherError::Decrypt("checksum mismatch".to_string()));
        }
        let mut out = BTreeMap::new();
        for (k, token) in &sealed.fields {
            let bytes = self.decrypt(token)?;
            let value =
                String::from_utf8(bytes).map_err(|e| CipherError::Decrypt(e.to_string()))?;
            out.insert(k.clone(), value);
        }
        Ok(out)
    }
}

/// 暗号化済みフィールド + checksum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedPayload {
    pub fields: BTreeMap<String, String>,
    pub checksum: String,
}

// BTreeMap なのでキー順が固定される
fn canonical_bytes(fields: &BTreeMap<String, String>) -> Vec<u8> {
    let mut out = Vec::new();
    for (k, v) in fields {
        out.extend_from_slice(k.as_bytes());
        out.push(b'=');
        out.extend_from_slice(v.as_bytes());
        out.push(b'\n');
    }
    out
}

impl Cipher for AesGcmCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| CipherError::Encrypt(e.to_string()))?;

        let mut framed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        framed.extend_from_slice(&nonce);
        framed.extend_from_slice(&ciphertext);
        Ok(URL_SAFE.encode(framed))
    }

    fn decrypt(&self, token: &str) -> Result<Vec<u8>, CipherError> {
        let framed = URL_SAFE
            .decode(token)
            .map_err(|e| CipherError::Decode(e.to_string()))?;
        if framed.len() < NONCE_LEN {
            return Err(CipherError::Decode("token shorter than nonce".to_string()));
        }
        let (nonce, ciphertext) = framed.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| CipherError::Decrypt(e.to_string()))
    }

    fn checksum(&self, bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }
}

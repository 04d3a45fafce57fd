use rand::RngCore;
use sha2::{Digest, Sha256};

/// Cookie half of the double-submit pair.
pub const CSRF_COOKIE_NAME: &str = "csrf-token";
/// Header half of the double-submit pair.
pub const CSRF_HEADER_NAME: &str = "x-csrf-token";
/// Session key under which the per-session secret is stored.
pub const CSRF_SECRET_SESSION_KEY: &str = "csrf_secret";

/// Generates a fresh per-session secret (32 random bytes, hex encoded).
pub fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_token(session_secret: &str, server_secret: &str, random: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(session_secret.as_bytes());
    hasher.update(b"!");
    hasher.update(server_secret.as_bytes());
    hasher.update(b"!");
    hasher.update(random.as_bytes());
    hex::encode(hasher.finalize())
}

/// Issues a token of the form `<random>.<hash>`, where the hash binds the
/// random part to the session secret and the server-wide session secret.
pub fn generate_token(session_secret: &str, server_secret: &str) -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    let random = hex::encode(bytes);
    let hash = hash_token(session_secret, server_secret, &random);
    format!("{}.{}", random, hash)
}

/// Validates a presented token against the session secret.
///
/// Accepts only tokens whose hash part matches a recomputation from the
/// random part, so a token minted under a different session (or forged
/// wholesale) never verifies.
pub fn validate_token(session_secret: &str, server_secret: &str, token: &str) -> bool {
    let Some((random, hash)) = token.split_once('.') else {
        return false;
    };

    if random.is_empty() || hash.is_empty() {
        return false;
    }

    let expected = hash_token(session_secret, server_secret, random);

    // Byte-wise comparison without early exit.
    if expected.len() != hash.len() {
        return false;
    }
    expected
        .bytes()
        .zip(hash.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_secret_is_random() {
        let a = generate_secret();
        let b = generate_secret();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_round_trip() {
        let secret = generate_secret();
        let token = generate_token(&secret, "server-secret");
        assert!(validate_token(&secret, "server-secret", &token));
    }

    #[test]
    fn test_token_rejected_for_other_session() {
        let token = generate_token(&generate_secret(), "server-secret");
        assert!(!validate_token(&generate_secret(), "server-secret", &token));
    }

    #[test]
    fn test_token_rejected_for_other_server_secret() {
        let secret = generate_secret();
        let token = generate_token(&secret, "server-secret");
        assert!(!validate_token(&secret, "otro", &token));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let secret = generate_secret();
        let token = generate_token(&secret, "server-secret");
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push('0');
        // Flipping the last hash character must not verify (unless it was
        // already '0', in which case flip to '1').
        if tampered == token {
            tampered.pop();
            tampered.push('1');
        }
        assert!(!validate_token(&secret, "server-secret", &tampered));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let secret = generate_secret();
        assert!(!validate_token(&secret, "server-secret", ""));
        assert!(!validate_token(&secret, "server-secret", "no-dot"));
        assert!(!validate_token(&secret, "server-secret", ".hashonly"));
        assert!(!validate_token(&secret, "server-secret", "randomonly."));
    }
}

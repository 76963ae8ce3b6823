use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine,
};
use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::Rng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const ITERATIONS: u32 = 260_000;
const KEY_LENGTH: usize = 32;
const SALT_LENGTH: usize = 16;

/// Hash un mot de passe au format Werkzeug: `pbkdf2:sha256:iterations$salt$hash`.
/// PBKDF2-HMAC-SHA256, 260000 itérations, salt aléatoire de 16 bytes.
/// Le mot de passe n'est jamais stocké en clair, uniquement ce hash salé.
pub fn hash_password(password: &str) -> Result<String, String> {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill(&mut salt);

    let mut key = [0u8; KEY_LENGTH];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, ITERATIONS, &mut key)
        .map_err(|e| format!("PBKDF2 failed: {}", e))?;

    let salt_b64 = URL_SAFE_NO_PAD.encode(salt);
    let hash_b64 = URL_SAFE_NO_PAD.encode(key);

    Ok(format!("pbkdf2:sha256:{}${}${}", ITERATIONS, salt_b64, hash_b64))
}

/// Vérifie un mot de passe contre un hash stocké.
/// Accepte aussi les salt/hash hex des anciennes lignes générées par Werkzeug.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, String> {
    let parts: Vec<&str> = stored_hash.split('$').collect();
    if parts.len() != 3 {
        return Err("Invalid hash format".to_string());
    }

    // En-tête: pbkdf2:sha256:<iterations>
    let header: Vec<&str> = parts[0].split(':').collect();
    if header.len() != 3 || header[0] != "pbkdf2" {
        return Err("Invalid hash header".to_string());
    }
    let iterations = header[2]
        .parse::<u32>()
        .map_err(|_| "Invalid iteration count".to_string())?;

    let salt = decode_salt_or_hash(parts[1])?;
    let expected = decode_salt_or_hash(parts[2])?;

    let mut computed = vec![0u8; expected.len()];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, iterations, &mut computed)
        .map_err(|e| format!("PBKDF2 failed: {}", e))?;

    Ok(computed == expected)
}

/// Décode un segment salt/hash: base64 URL-safe sans padding (notre format),
/// base64 standard, ou hex (lignes héritées de Werkzeug).
fn decode_salt_or_hash(input: &str) -> Result<Vec<u8>, String> {
    if let Ok(decoded) = URL_SAFE_NO_PAD.decode(input) {
        return Ok(decoded);
    }
    if let Ok(decoded) = STANDARD.decode(input) {
        return Ok(decoded);
    }
    if input.chars().all(|c| c.is_ascii_hexdigit()) && input.len() % 2 == 0 {
        return hex::decode(input).map_err(|e| format!("Hex decode failed: {}", e));
    }
    // Werkzeug peut émettre un salt en ASCII brut
    Ok(input.as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("vendeur123").unwrap();
        assert!(hash.starts_with("pbkdf2:sha256:260000$"));
        assert!(verify_password("vendeur123", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = hash_password("admin123").unwrap();
        assert!(!verify_password("admin124", &hash).unwrap());
    }

    #[test]
    fn test_salts_are_random() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same", &a).unwrap());
        assert!(verify_password("same", &b).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(verify_password("x", "not-a-hash").is_err());
        assert!(verify_password("x", "md5:foo$bar$baz").is_err());
    }
}

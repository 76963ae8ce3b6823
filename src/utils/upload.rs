use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::errors::ShopError;
use crate::models::dto::ImageAttachment;

/// Répertoire de destination des images uploadées, injecté dans les routes
/// via `web::Data` (équivalent du UPLOAD_FOLDER d'origine).
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
}

/// Écrit une pièce jointe sur disque et retourne le nom de fichier stocké.
/// Effet de bord best-effort exécuté AVANT l'écriture en base: le nom n'est
/// persisté que si l'écriture du fichier a réussi.
pub fn store_attachment(dir: &Path, attachment: &ImageAttachment) -> Result<String, ShopError> {
    let bytes = STANDARD
        .decode(attachment.content_base64.trim())
        .map_err(|e| ShopError::Validation(format!("Image invalide: {}", e)))?;

    let stored_name = format!(
        "{}_{}",
        Uuid::new_v4().simple(),
        sanitize_filename(&attachment.filename)
    );

    std::fs::create_dir_all(dir)
        .map_err(|e| ShopError::Internal(format!("Upload directory: {}", e)))?;
    std::fs::write(dir.join(&stored_name), bytes)
        .map_err(|e| ShopError::Internal(format!("Upload write: {}", e)))?;

    Ok(stored_name)
}

/// Même esprit que `secure_filename`: ne garde que [A-Za-z0-9._-],
/// et refuse de produire un nom vide ou un chemin relatif.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_').to_string();
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

//! Uploaded voice samples on local disk, one directory per user.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::config::VoiceConfig;

/// Filename used when the upload names none usable.
const DEFAULT_SAMPLE_NAME: &str = "sample.wav";

/// Recommended sample length range in seconds.
const RECOMMENDED_DURATION_SECS: (f64, f64) = (10.0, 120.0);

/// Recommended minimum sample rate in Hz.
const RECOMMENDED_SAMPLE_RATE: u32 = 16_000;

#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("Invalid audio file format")]
    Empty,

    #[error("Audio path is outside the caller's sample directory")]
    OutsideUserDir,

    #[error("Voice sample not found")]
    NotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A stored upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSample {
    pub audio_path: PathBuf,
    pub filename: String,
}

pub fn user_audio_dir(config: &VoiceConfig, user_id: &str) -> PathBuf {
    config.audio_dir.join(user_segment(user_id))
}

pub fn user_models_dir(config: &VoiceConfig, user_id: &str) -> PathBuf {
    config.models_dir.join(user_segment(user_id))
}

/// Longest user id kept verbatim as a directory name.
const MAX_PLAIN_USER_SEGMENT: usize = 128;

/// Directory name for a user id. Distinct ids always get distinct names.
///
/// Ids made only of `[A-Za-z0-9_-]` are used as-is. Anything else,
/// including the empty id, becomes `%` followed by the hex of its bytes;
/// `%` never appears in a verbatim name.
fn user_segment(user_id: &str) -> String {
    let plain = !user_id.is_empty()
        && user_id.len() <= MAX_PLAIN_USER_SEGMENT
        && user_id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_'));
    if plain {
        return user_id.to_string();
    }
    let mut segment = String::with_capacity(1 + user_id.len() * 2);
    segment.push('%');
    for byte in user_id.bytes() {
        segment.push_str(&format!("{byte:02x}"));
    }
    segment
}

/// Reduce a client-supplied filename to a single safe path segment.
fn safe_segment(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

/// The final component of an uploaded filename, stripped of anything that
/// could escape the user's directory.
pub fn sanitize_filename(raw: Option<&str>) -> String {
    let base = raw
        .map(|name| name.rsplit(['/', '\\']).next().unwrap_or_default())
        .map(safe_segment)
        .unwrap_or_default();
    if base.is_empty() {
        DEFAULT_SAMPLE_NAME.to_string()
    } else {
        base
    }
}

/// Write an uploaded sample to the user's directory.
pub async fn save_sample(
    config: &VoiceConfig,
    user_id: &str,
    filename: Option<&str>,
    data: &[u8],
) -> Result<SavedSample, SampleError> {
    if data.is_empty() {
        return Err(SampleError::Empty);
    }

    let dir = user_audio_dir(config, user_id);
    tokio::fs::create_dir_all(&dir).await?;

    let filename = sanitize_filename(filename);
    let audio_path = dir.join(&filename);
    tokio::fs::write(&audio_path, data).await?;

    inspect_wav(&filename, data);
    Ok(SavedSample {
        audio_path,
        filename,
    })
}

/// Log quality warnings for a WAV upload. Never rejects.
fn inspect_wav(filename: &str, data: &[u8]) {
    if data.len() < 44 || &data[0..4] != b"RIFF" || &data[8..12] != b"WAVE" {
        tracing::warn!(filename, "Voice sample has no WAV header; quality not checked");
        return;
    }

    let read_u32 = |at: usize| u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);
    let sample_rate = read_u32(24);
    let byte_rate = read_u32(28);

    if sample_rate < RECOMMENDED_SAMPLE_RATE {
        tracing::warn!(filename, sample_rate, "Sample rate is below recommended 16kHz");
    }
    if byte_rate > 0 {
        let duration = (data.len() - 44) as f64 / f64::from(byte_rate);
        let (min, max) = RECOMMENDED_DURATION_SECS;
        if duration < min || duration > max {
            tracing::warn!(
                filename,
                duration_secs = duration,
                "Audio duration is outside recommended range (10-120s)",
            );
        }
    }
}

/// Pick the sample to train on.
///
/// A requested path must lie inside the caller's sample directory and
/// exist. Without one, the most recently modified upload is used.
pub async fn resolve_sample(
    config: &VoiceConfig,
    user_id: &str,
    requested: Option<&str>,
) -> Result<PathBuf, SampleError> {
    let dir = user_audio_dir(config, user_id);

    if let Some(requested) = requested {
        let path = PathBuf::from(requested);
        let escapes = path.components().any(|c| matches!(c, Component::ParentDir));
        if escapes || !path.starts_with(&dir) {
            return Err(SampleError::OutsideUserDir);
        }
        return match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(SampleError::NotFound),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(SampleError::NotFound),
            Err(e) => Err(e.into()),
        };
    }

    latest_sample(&dir).await?.ok_or(SampleError::NotFound)
}

async fn latest_sample(dir: &Path) -> Result<Option<PathBuf>, SampleError> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut latest: Option<(std::time::SystemTime, PathBuf)> = None;
    while let Some(entry) = entries.next_entry().await? {
        let meta = entry.metadata().await?;
        if !meta.is_file() {
            continue;
        }
        let modified = meta.modified()?;
        if latest.as_ref().is_none_or(|(at, _)| modified >= *at) {
            latest = Some((modified, entry.path()));
        }
    }
    Ok(latest.map(|(_, path)| path))
}

/// Whether a stored sample path still exists on disk.
pub async fn sample_exists(path: &str) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file())
}

/// Remove the user's model and sample directories. Missing ones are fine.
pub async fn remove_user_files(config: &VoiceConfig, user_id: &str) -> Result<(), SampleError> {
    for dir in [
        user_models_dir(config, user_id),
        user_audio_dir(config, user_id),
    ] {
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn config(root: &Path) -> VoiceConfig {
        VoiceConfig {
            models_dir: root.join("models"),
            audio_dir: root.join("audio"),
            training_step_ms: 0,
        }
    }

    #[test]
    fn filenames_are_reduced_to_one_segment() {
        assert_eq!(sanitize_filename(Some("../../etc/passwd")), "passwd");
        assert_eq!(sanitize_filename(Some("C:\\clips\\me.wav")), "me.wav");
        assert_eq!(sanitize_filename(Some("..")), "sample.wav");
        assert_eq!(sanitize_filename(None), "sample.wav");
    }

    #[tokio::test]
    async fn empty_upload_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let result = save_sample(&config(root.path()), "u1", Some("a.wav"), b"").await;
        assert_matches!(result, Err(SampleError::Empty));
    }

    #[tokio::test]
    async fn saved_sample_resolves_by_path_and_as_latest() {
        let root = tempfile::tempdir().unwrap();
        let config = config(root.path());
        let saved = save_sample(&config, "u1", Some("me.wav"), b"not really audio")
            .await
            .unwrap();

        let path = saved.audio_path.to_string_lossy().to_string();
        assert_eq!(
            resolve_sample(&config, "u1", Some(&path)).await.unwrap(),
            saved.audio_path
        );
        assert_eq!(
            resolve_sample(&config, "u1", None).await.unwrap(),
            saved.audio_path
        );
        assert!(sample_exists(&path).await);
    }

    #[tokio::test]
    async fn other_users_samples_are_refused() {
        let root = tempfile::tempdir().unwrap();
        let config = config(root.path());
        let saved = save_sample(&config, "u1", Some("me.wav"), b"x").await.unwrap();
        let path = saved.audio_path.to_string_lossy().to_string();

        assert_matches!(
            resolve_sample(&config, "u2", Some(&path)).await,
            Err(SampleError::OutsideUserDir)
        );
        assert_matches!(
            resolve_sample(&config, "u2", None).await,
            Err(SampleError::NotFound)
        );
    }

    #[tokio::test]
    async fn remove_user_files_tolerates_missing_dirs() {
        let root = tempfile::tempdir().unwrap();
        let config = config(root.path());
        remove_user_files(&config, "nobody").await.unwrap();

        save_sample(&config, "u1", None, b"x").await.unwrap();
        remove_user_files(&config, "u1").await.unwrap();
        assert!(!user_audio_dir(&config, "u1").exists());
    }

    #[test]
    fn user_segments_never_collide_or_vanish() {
        assert_eq!(user_segment("alice"), "alice");
        assert_eq!(user_segment(""), "%");
        assert_eq!(user_segment("@@"), "%4040");
        assert_ne!(user_segment("a/b"), user_segment("ab"));
        assert_ne!(user_segment("a.b"), user_segment("ab"));
        assert_eq!(user_segment("../x"), "%2e2e2f78");
    }

    #[tokio::test]
    async fn unsafe_user_id_keeps_its_own_directory() {
        let root = tempfile::tempdir().unwrap();
        let config = config(root.path());
        let alice = save_sample(&config, "alice", Some("me.wav"), b"x").await.unwrap();

        for uid in ["@@", ""] {
            let dir = user_audio_dir(&config, uid);
            assert_ne!(dir, config.audio_dir);
            assert!(dir.starts_with(&config.audio_dir));

            let path = alice.audio_path.to_string_lossy().to_string();
            assert_matches!(
                resolve_sample(&config, uid, Some(&path)).await,
                Err(SampleError::OutsideUserDir)
            );

            remove_user_files(&config, uid).await.unwrap();
            assert!(alice.audio_path.exists());
        }
    }
}

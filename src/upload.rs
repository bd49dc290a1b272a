//! File selection helpers for the upload drop-zones.

use std::sync::Arc;

use web_sys::{Blob, File, FileList, Url};

/// The drop-zones accept audio only.
pub fn is_audio_mime(mime: &str) -> bool {
    mime.starts_with("audio/")
}

/// First file of a drop or picker selection, and only when it is audio.
/// Anything else is a silent no-op for the caller.
pub fn first_audio_file(list: Option<FileList>) -> Option<File> {
    let file = list?.get(0)?;
    if is_audio_mime(&file.type_()) {
        Some(file)
    } else {
        None
    }
}

/// A `blob:` URL whose lifetime is tied to this handle; replacing the handle
/// revokes the previous URL instead of leaking it.
#[derive(Debug)]
pub struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    pub fn for_blob(blob: &Blob) -> Result<Self, String> {
        let url = Url::create_object_url_with_blob(blob)
            .map_err(|e| format!("object URL: {e:?}"))?;
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let _ = Url::revoke_object_url(&self.url);
    }
}

/// A locally selected practice recording, playable through its object URL.
/// The shared handle keeps the URL alive until the last clone is gone.
#[derive(Clone, Debug)]
pub struct PracticeTake {
    pub file_name: String,
    pub url: Arc<ObjectUrl>,
}

impl PracticeTake {
    pub fn from_file(file: &File) -> Result<Self, String> {
        Ok(Self {
            file_name: file.name(),
            url: Arc::new(ObjectUrl::for_blob(file)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_mime_prefix_check() {
        assert!(is_audio_mime("audio/mpeg"));
        assert!(is_audio_mime("audio/wav"));
        assert!(!is_audio_mime("video/mp4"));
        assert!(!is_audio_mime("application/octet-stream"));
        assert!(!is_audio_mime(""));
    }
}

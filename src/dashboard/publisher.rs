use std::fmt;
use std::path::{Path, PathBuf};

use aws_sdk_s3::primitives::ByteStream;
use tokio::fs;
use tracing::info;

use crate::error::{Error, Result};

/// Where the rendered dashboard goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Write to a file, overwriting any previous run
    LocalPath(PathBuf),
    /// Upload to an object store bucket/key; overwrite semantics are the
    /// store's
    CloudObject { bucket: String, key: String },
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::LocalPath(path) => write!(f, "{}", path.display()),
            Destination::CloudObject { bucket, key } => write!(f, "s3://{}/{}", bucket, key),
        }
    }
}

/// Deliver the rendered document to its destination.
///
/// Fatal on failure; a failed publish leaves no partial artifact behind.
pub async fn publish(html: &str, destination: &Destination) -> Result<()> {
    match destination {
        Destination::LocalPath(path) => publish_local(html, path).await,
        Destination::CloudObject { bucket, key } => publish_cloud(html, bucket, key).await,
    }
}

async fn publish_local(html: &str, path: &Path) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::Write(format!("Invalid output path: {}", path.display())))?;

    // Stage next to the target, then rename: a failed run must not leave a
    // partial dashboard at the destination
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    if let Err(e) = fs::write(&tmp_path, html).await {
        return Err(Error::Write(format!(
            "Failed to write {}: {}",
            path.display(),
            e
        )));
    }

    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(Error::Write(format!(
            "Failed to move dashboard into place at {}: {}",
            path.display(),
            e
        )));
    }

    info!(path = %path.display(), bytes = html.len(), "Dashboard written");
    Ok(())
}

async fn publish_cloud(html: &str, bucket: &str, key: &str) -> Result<()> {
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_s3::Client::new(&config);

    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type("text/html; charset=utf-8")
        .body(ByteStream::from(html.as_bytes().to_vec()))
        .send()
        .await
        .map_err(|e| {
            Error::Upload(format!(
                "Failed to upload s3://{}/{}: {}",
                bucket,
                key,
                aws_sdk_s3::error::DisplayErrorContext(e)
            ))
        })?;

    info!(bucket = bucket, key = key, bytes = html.len(), "Dashboard uploaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_display() {
        let local = Destination::LocalPath(PathBuf::from("out/dash.html"));
        assert_eq!(local.to_string(), "out/dash.html");

        let cloud = Destination::CloudObject {
            bucket: "reports".to_string(),
            key: "us_banks.html".to_string(),
        };
        assert_eq!(cloud.to_string(), "s3://reports/us_banks.html");
    }

    #[tokio::test]
    async fn test_publish_local_writes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dash.html");
        let destination = Destination::LocalPath(path.clone());

        publish("<html>v1</html>", &destination).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html>v1</html>");

        publish("<html>v2</html>", &destination).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html>v2</html>");
    }

    #[tokio::test]
    async fn test_publish_local_failure_leaves_no_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("dash.html");
        let destination = Destination::LocalPath(path.clone());

        let result = publish("<html></html>", &destination).await;
        assert!(matches!(result, Err(Error::Write(_))));
        assert!(!path.exists());

        // The staging file must be gone too
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}

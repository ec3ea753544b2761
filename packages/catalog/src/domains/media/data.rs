use bytes::Bytes;

/// Raw avatar upload handed over by the request handler
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

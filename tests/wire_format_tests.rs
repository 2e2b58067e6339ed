/// Tests for the bearer credential and thumbnail reference wire formats
///
/// Note: These are self-contained format checks. The full upload/serve flow
/// is covered by the router tests inside the crate.

#[cfg(test)]
mod tests {
    #[test]
    fn test_authorization_header_parsing() {
        let auth_header = "Bearer abc123token";
        let token = auth_header.strip_prefix("Bearer ");
        assert_eq!(token, Some("abc123token"));

        let invalid_header = "abc123token";
        let token = invalid_header.strip_prefix("Bearer ");
        assert_eq!(token, None);

        // Scheme is case sensitive
        let lowercase_header = "bearer abc123token";
        let token = lowercase_header.strip_prefix("Bearer ");
        assert_eq!(token, None);
    }

    #[test]
    fn test_inline_reference_shape() {
        let reference = "data:image/png;base64,aGVsbG8=";

        assert!(reference.starts_with("data:"));

        let rest = reference.strip_prefix("data:").unwrap();
        let (media_type, payload) = rest.split_once(";base64,").unwrap();
        assert_eq!(media_type, "image/png");
        assert_eq!(payload, "aGVsbG8=");
    }

    #[test]
    fn test_file_reference_shape() {
        let reference = "/assets/6b2d9d2e-55b4-4a38-9c10-3a0d6f43f9dd.png";

        // Rooted path so it can be served as an absolute URL path
        assert!(reference.starts_with('/'));

        let name = reference.strip_prefix("/assets/").unwrap();
        let (stem, extension) = name.rsplit_once('.').unwrap();
        assert_eq!(extension, "png");
        assert_eq!(stem.len(), 36);
    }
}

//! Request preparation pipeline tests.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs::File;

    use http::Method;
    use s3prep::{
        AddressingStyle, AwsRegion, CONTENT_SHA256_HEADER, PrepConfig, RequestDescriptor,
        SignatureScheme, TREE_HASH_HEADER,
    };
    use s3prep_addressing::{is_valid_endpoint_url, percent_encode_sequence};

    use crate::{payload_file, preparer};

    #[test]
    fn test_should_prepare_upload_from_file() -> anyhow::Result<()> {
        let preparer = preparer(
            PrepConfig::builder()
                .region(AwsRegion::new("us-west-2"))
                .build(),
        )?;
        let file = payload_file(1024, b'a')?;
        let req = RequestDescriptor::from_url(
            Method::PUT,
            "https://s3-us-west-2.amazonaws.com/photos/2024/./cat.jpg",
        )?;

        let prepared = preparer.prepare(&req, File::open(file.path())?)?;

        assert_eq!(prepared.url(), "https://photos.s3.amazonaws.com/2024/cat.jpg");
        assert_eq!(prepared.effective_signing_path(), "/photos/2024/cat.jpg");
        assert_eq!(
            prepared.headers[CONTENT_SHA256_HEADER],
            "2edc986847e209b4016e141a6dc8716d3207350f416969382d431539bf292e4a"
        );
        Ok(())
    }

    #[test]
    fn test_should_attach_both_digests() -> anyhow::Result<()> {
        let preparer = preparer(PrepConfig::default())?;
        let file = payload_file(2 * 1024 * 1024, b'b')?;
        let mut req = RequestDescriptor::new(Method::POST, "glacier.us-east-1.amazonaws.com", "/");

        let sha = preparer.attach_content_sha256(&mut req, File::open(file.path())?)?;
        let tree = preparer.attach_tree_hash(&mut req, File::open(file.path())?)?;

        assert_eq!(req.headers[CONTENT_SHA256_HEADER], sha.to_hex().as_str());
        assert_eq!(req.headers[TREE_HASH_HEADER], tree.to_hex().as_str());
        assert_ne!(sha, tree);
        Ok(())
    }

    #[test]
    fn test_should_prepare_from_environment_lookup() -> anyhow::Result<()> {
        let vars = HashMap::from([
            ("DEFAULT_REGION", "eu-central-1"),
            ("S3_SIGNATURE_VERSION", "s3v4"),
            ("S3_ADDRESSING_STYLE", "virtual"),
            ("S3_ENDPOINT_OVERRIDE", "storage.example.net"),
        ]);
        let config = PrepConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_owned()))?;
        assert_eq!(config.signature_scheme, SignatureScheme::V4);
        assert_eq!(config.addressing_style, AddressingStyle::Virtual);

        let preparer = preparer(config)?;
        let mut req = RequestDescriptor::from_url(Method::GET, "https://10.0.0.5/logs/app.log")?;
        req.push_query_param("versionId", "v 1");

        let prepared = preparer.prepare(&req, std::io::empty())?;
        assert_eq!(
            prepared.url(),
            "https://logs.storage.example.net/app.log?versionId=v%201"
        );
        assert_eq!(prepared.effective_signing_path(), "/logs/app.log");
        Ok(())
    }

    #[test]
    fn test_should_keep_path_style_for_unsafe_buckets() -> anyhow::Result<()> {
        let preparer = preparer(PrepConfig::default())?;
        for url in [
            "https://s3.amazonaws.com/my.dotted.bucket/key",
            "https://s3.amazonaws.com/-leading-hyphen/key",
            "https://s3.amazonaws.com/ab/key",
        ] {
            let req = RequestDescriptor::from_url(Method::GET, url)?;
            let prepared = preparer.prepare(&req, std::io::empty())?;
            assert_eq!(prepared.url(), url);
            assert!(prepared.signing_path.is_none(), "{url}");
        }
        Ok(())
    }

    #[test]
    fn test_should_not_rewrite_bucket_location_or_service_root() -> anyhow::Result<()> {
        let preparer = preparer(PrepConfig::default())?;
        for url in [
            "https://s3.amazonaws.com/bucket?location",
            "https://s3.amazonaws.com/",
        ] {
            let req = RequestDescriptor::from_url(Method::GET, url)?;
            assert_eq!(preparer.apply_addressing(&req)?, req);
        }
        Ok(())
    }

    #[test]
    fn test_should_be_idempotent_across_repeated_preparation() -> anyhow::Result<()> {
        let preparer = preparer(PrepConfig::default())?;
        let req = RequestDescriptor::from_url(Method::PUT, "https://s3.amazonaws.com/bucket/key")?;
        let once = preparer.apply_addressing(&req)?;
        let twice = preparer.apply_addressing(&once)?;
        assert_eq!(once, twice);
        Ok(())
    }

    #[test]
    fn test_should_build_endpoint_and_query_helpers() {
        assert!(is_valid_endpoint_url("https://s3.us-west-2.amazonaws.com"));
        assert!(!is_valid_endpoint_url("s3.amazonaws.com"));
        assert_eq!(
            percent_encode_sequence([("prefix", "a b/"), ("max-keys", "10")]),
            "prefix=a%20b%2F&max-keys=10"
        );
    }

    #[tokio::test]
    async fn test_should_prepare_async_from_file() -> anyhow::Result<()> {
        let preparer = preparer(PrepConfig::default())?;
        let file = payload_file(11, b'x')?;
        let req = RequestDescriptor::from_url(Method::PUT, "https://s3.amazonaws.com/bucket/k")?;

        let prepared = preparer
            .prepare_async(&req, tokio::fs::File::open(file.path()).await?)
            .await?;
        let expected = s3prep::Sha256Digest::of(b"xxxxxxxxxxx");
        assert_eq!(prepared.headers[CONTENT_SHA256_HEADER], expected.to_hex().as_str());
        assert_eq!(prepared.url(), "https://bucket.s3.amazonaws.com/k");
        Ok(())
    }
}

//! File-backed payload hashing tests.

#[cfg(test)]
mod tests {
    use std::fs::File;

    use s3prep_checksums::{
        Sha256Digest, TREE_HASH_CHUNK_SIZE, calculate_sha256, calculate_sha256_async,
        calculate_tree_hash, calculate_tree_hash_async, calculate_tree_hash_with_buffer,
        tree_hash_parallel,
    };

    use crate::{init_tracing, payload_file};

    const MB: usize = TREE_HASH_CHUNK_SIZE;

    #[test]
    fn test_should_tree_hash_file_of_four_mb_plus_tail() -> anyhow::Result<()> {
        init_tracing();
        let file = payload_file(4 * MB + 20, b'a')?;
        let digest = calculate_tree_hash(File::open(file.path())?)?;
        assert_eq!(
            digest.to_hex(),
            "12f3cbd6101b981cde074039f6f728071da8879d6f632de8afc7cdf00661b08f"
        );
        Ok(())
    }

    #[test]
    fn test_should_not_depend_on_buffer_size_for_files() -> anyhow::Result<()> {
        init_tracing();
        let file = payload_file(2 * MB + 1, b'z')?;
        let data = std::fs::read(file.path())?;
        let reference = tree_hash_parallel(&data);
        for buffer in [1000, 4096, MB - 1, MB, 3 * MB] {
            let digest = calculate_tree_hash_with_buffer(File::open(file.path())?, buffer)?;
            assert_eq!(digest, reference, "buffer size {buffer}");
        }
        Ok(())
    }

    #[test]
    fn test_should_hash_empty_file() -> anyhow::Result<()> {
        init_tracing();
        let file = payload_file(0, 0)?;
        let empty = Sha256Digest::of(b"");
        assert_eq!(calculate_sha256(File::open(file.path())?)?, empty);
        assert_eq!(calculate_tree_hash(File::open(file.path())?)?, empty);
        Ok(())
    }

    #[tokio::test]
    async fn test_should_hash_file_async() -> anyhow::Result<()> {
        init_tracing();
        let file = payload_file(MB + 512, b'q')?;
        let data = std::fs::read(file.path())?;

        let sha = calculate_sha256_async(tokio::fs::File::open(file.path()).await?).await?;
        assert_eq!(sha, Sha256Digest::of(&data));

        let tree = calculate_tree_hash_async(tokio::fs::File::open(file.path()).await?).await?;
        assert_eq!(tree, tree_hash_parallel(&data));
        assert_ne!(tree, sha);
        Ok(())
    }
}

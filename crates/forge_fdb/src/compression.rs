//! Payload compression and decompression handling.

use std::io::{Read, Write};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use tracing::instrument;

use crate::error::{Error, Result};

/// Identifies whether data block payloads may be compressed when writing an FDB file
///
/// Selected for the whole save via [`crate::write::DbWriterOptions`]. The file itself
/// carries no method field: a block was compressed exactly when its stored size differs
/// from its uncompressed size.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CompressionMethod {
    /// Store every payload as it is
    None,

    /// Compress payloads using Zlib where it pays off
    #[default]
    Zlib,
}

/// Payloads at or below this size are stored raw; the compression header overhead
/// dominates any possible gain.
pub(crate) const MIN_COMPRESS_SIZE: usize = 20;

/// Compress a payload with Zlib.
///
/// The caller decides whether the result is worth keeping; the writer only stores the
/// compressed form when it is strictly smaller than the input.
#[instrument(skip(data), err)]
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress a stored payload back to its recorded uncompressed size.
#[instrument(skip(data), err)]
pub fn decompress(data: &[u8], uncompressed_size: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(uncompressed_size);
    ZlibDecoder::new(data).read_to_end(&mut out)?;

    if out.len() != uncompressed_size {
        return Err(Error::DecompressedSizeMismatch {
            expected: uncompressed_size,
            actual: out.len(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::compression::{compress, decompress};
    use crate::error::{Error, Result};

    #[test]
    fn round_trip_compressible() -> Result<()> {
        let input = vec![0x42u8; 4096];

        let packed = compress(&input)?;
        assert!(packed.len() < input.len());

        assert_eq!(decompress(&packed, input.len())?, input);

        Ok(())
    }

    #[test]
    fn round_trip_empty() -> Result<()> {
        let packed = compress(&[])?;
        assert_eq!(decompress(&packed, 0)?, Vec::<u8>::new());

        Ok(())
    }

    #[test]
    fn round_trip_incompressible() -> Result<()> {
        // A simple xorshift sequence; close enough to random that zlib cannot shrink it.
        let mut state = 0x2545_F491u32;
        let input: Vec<u8> = (0..256)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state as u8
            })
            .collect();

        let packed = compress(&input)?;
        assert_eq!(decompress(&packed, input.len())?, input);

        Ok(())
    }

    #[test]
    fn size_mismatch_is_rejected() -> Result<()> {
        let packed = compress(b"hello world")?;

        assert!(matches!(
            decompress(&packed, 5),
            Err(Error::DecompressedSizeMismatch {
                expected: 5,
                actual: 11
            })
        ));

        Ok(())
    }
}

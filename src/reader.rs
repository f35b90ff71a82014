//! Abstractions for loading image bytes and reading them with a given byte order.

use std::fmt::Debug;
use std::sync::Arc;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt};

use crate::error::GeotagResult;

/// The asynchronous interface used to load a whole image into memory before parsing.
///
/// EXIF offsets are relative to a header that can sit anywhere in the first segments of the
/// file, so the parser always works on the complete buffer.
///
/// Notes:
///
/// 1. [`ObjectReader`], available when the `object_store` crate feature
///    is enabled, implements this interface for [`ObjectStore`].
///
/// 2. You can use [`TokioReader`] to implement [`AsyncImageReader`] for types that implement
///    [`tokio::io::AsyncRead`] and [`tokio::io::AsyncSeek`], for example [`tokio::fs::File`].
///
/// [`ObjectStore`]: object_store::ObjectStore
///
/// [`tokio::fs::File`]: https://docs.rs/tokio/latest/tokio/fs/struct.File.html
pub trait AsyncImageReader: Debug + Send + Sync {
    /// Retrieve all bytes of the image.
    fn read_image(&self) -> BoxFuture<'_, GeotagResult<Bytes>>;
}

/// This allows Box<dyn AsyncImageReader + '_> to be used as an AsyncImageReader,
impl AsyncImageReader for Box<dyn AsyncImageReader + '_> {
    fn read_image(&self) -> BoxFuture<'_, GeotagResult<Bytes>> {
        self.as_ref().read_image()
    }
}

/// This allows Arc<dyn AsyncImageReader + '_> to be used as an AsyncImageReader,
impl AsyncImageReader for Arc<dyn AsyncImageReader + '_> {
    fn read_image(&self) -> BoxFuture<'_, GeotagResult<Bytes>> {
        self.as_ref().read_image()
    }
}

/// A wrapper for things that implement [AsyncRead] and [AsyncSeek] to also implement
/// [AsyncImageReader].
///
/// This wrapper is needed because `AsyncRead` and `AsyncSeek` require mutable access to seek and
/// read data, while the `AsyncImageReader` trait requires immutable access to read data.
///
/// This wrapper stores the inner reader in a `Mutex`.
///
/// [AsyncRead]: tokio::io::AsyncRead
/// [AsyncSeek]: tokio::io::AsyncSeek
#[cfg(feature = "tokio")]
#[derive(Debug)]
pub struct TokioReader<T: tokio::io::AsyncRead + tokio::io::AsyncSeek + Unpin + Send + Debug>(
    tokio::sync::Mutex<T>,
);

#[cfg(feature = "tokio")]
impl<T: tokio::io::AsyncRead + tokio::io::AsyncSeek + Unpin + Send + Debug> TokioReader<T> {
    /// Create a new TokioReader from a reader.
    pub fn new(inner: T) -> Self {
        Self(tokio::sync::Mutex::new(inner))
    }

    async fn read_to_end(&self) -> GeotagResult<Bytes> {
        use std::io::SeekFrom;
        use tokio::io::{AsyncReadExt, AsyncSeekExt};

        let mut file = self.0.lock().await;

        file.seek(SeekFrom::Start(0)).await?;

        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer).await?;

        Ok(buffer.into())
    }
}

#[cfg(feature = "tokio")]
impl<T: tokio::io::AsyncRead + tokio::io::AsyncSeek + Unpin + Send + Debug> AsyncImageReader
    for TokioReader<T>
{
    fn read_image(&self) -> BoxFuture<'_, GeotagResult<Bytes>> {
        self.read_to_end().boxed()
    }
}

/// An AsyncImageReader that reads from an [`ObjectStore`] instance.
///
/// [`ObjectStore`]: object_store::ObjectStore
#[cfg(feature = "object_store")]
#[derive(Clone, Debug)]
pub struct ObjectReader {
    store: Arc<dyn object_store::ObjectStore>,
    path: object_store::path::Path,
}

#[cfg(feature = "object_store")]
impl ObjectReader {
    /// Creates a new [`ObjectReader`] for the provided [`ObjectStore`] and path
    ///
    /// [`ObjectStore`]: object_store::ObjectStore
    pub fn new(store: Arc<dyn object_store::ObjectStore>, path: object_store::path::Path) -> Self {
        Self { store, path }
    }

    async fn make_request(&self) -> GeotagResult<Bytes> {
        let result = self.store.get(&self.path).await?;
        Ok(result.bytes().await?)
    }
}

#[cfg(feature = "object_store")]
impl AsyncImageReader for ObjectReader {
    fn read_image(&self) -> BoxFuture<'_, GeotagResult<Bytes>> {
        self.make_request().boxed()
    }
}

/// An AsyncImageReader that downloads an image from a URL using reqwest.
#[cfg(feature = "reqwest")]
#[derive(Debug, Clone)]
pub struct ReqwestReader {
    client: reqwest::Client,
    url: reqwest::Url,
}

#[cfg(feature = "reqwest")]
impl ReqwestReader {
    /// Construct a new ReqwestReader from a reqwest client and URL.
    pub fn new(client: reqwest::Client, url: reqwest::Url) -> Self {
        Self { client, url }
    }

    fn make_request(&self) -> BoxFuture<'_, GeotagResult<Bytes>> {
        let url = self.url.clone();
        let client = self.client.clone();
        async move {
            let response = client.get(url).send().await?.error_for_status()?;
            let bytes = response.bytes().await?;
            Ok(bytes)
        }
        .boxed()
    }
}

#[cfg(feature = "reqwest")]
impl AsyncImageReader for ReqwestReader {
    fn read_image(&self) -> BoxFuture<'_, GeotagResult<Bytes>> {
        self.make_request()
    }
}

/// Endianness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    /// Little Endian
    LittleEndian,
    /// Big Endian
    BigEndian,
}

/// A reader over a slice that has already been bounds-checked by the caller.
pub(crate) struct EndianAwareReader<'a> {
    reader: &'a [u8],
    endianness: Endianness,
}

impl<'a> EndianAwareReader<'a> {
    pub(crate) fn new(bytes: &'a [u8], endianness: Endianness) -> Self {
        Self {
            reader: bytes,
            endianness,
        }
    }

    /// Read a u8 from the cursor, advancing the internal state by 1 byte.
    pub(crate) fn read_u8(&mut self) -> GeotagResult<u8> {
        Ok(self.reader.read_u8()?)
    }

    pub(crate) fn read_u16(&mut self) -> GeotagResult<u16> {
        match self.endianness {
            Endianness::LittleEndian => Ok(self.reader.read_u16::<LittleEndian>()?),
            Endianness::BigEndian => Ok(self.reader.read_u16::<BigEndian>()?),
        }
    }

    pub(crate) fn read_u32(&mut self) -> GeotagResult<u32> {
        match self.endianness {
            Endianness::LittleEndian => Ok(self.reader.read_u32::<LittleEndian>()?),
            Endianness::BigEndian => Ok(self.reader.read_u32::<BigEndian>()?),
        }
    }
}

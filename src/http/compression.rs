//! Streaming gzip decoding of upstream bodies.
//!
//! # Design Decisions
//! - The body is never buffered; bytes are decoded as they arrive
//! - The first decoded chunk is pulled before the response is committed, so
//!   a body that is not gzip at all becomes a 502 instead of a truncated 200
//! - Corruption found after that point can only abort the body stream
//! - A gzip-labelled body with no bytes at all is passed on as an empty body

use std::io;

use async_compression::tokio::bufread::GzipDecoder;
use axum::body::{Body, HttpBody};
use axum::BoxError;
use bytes::Bytes;
use futures_util::{stream, StreamExt, TryStreamExt};
use http_body_util::BodyExt;
use tokio_util::io::{ReaderStream, StreamReader};

use crate::http::error::ProxyError;

/// Wrap `body` in a gzip decoder and return the decoded body.
pub async fn gunzip<B>(body: B) -> Result<Body, ProxyError>
where
    B: HttpBody<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    let mut coded = Box::pin(
        body.into_data_stream()
            .map_err(|e| io::Error::other(Into::<BoxError>::into(e))),
    );

    // The decoder rejects zero input, so look for the first non-empty chunk.
    let first_coded = loop {
        match coded.next().await {
            None => return Ok(Body::empty()),
            Some(Err(e)) => return Err(ProxyError::Decompression(e)),
            Some(Ok(chunk)) if chunk.is_empty() => continue,
            Some(Ok(chunk)) => break chunk,
        }
    };
    let coded = stream::once(async move { Ok::<_, io::Error>(first_coded) }).chain(coded);

    let mut decoded = Box::pin(ReaderStream::new(GzipDecoder::new(StreamReader::new(coded))));

    match decoded.next().await {
        None => Ok(Body::empty()),
        Some(Err(e)) => Err(ProxyError::Decompression(e)),
        Some(Ok(first)) => {
            let rest = decoded.inspect_err(|e| {
                tracing::warn!(error = %e, "gzip body aborted mid-stream");
            });
            let head = stream::once(async move { Ok::<_, io::Error>(first) });
            Ok(Body::from_stream(head.chain(rest)))
        }
    }
}

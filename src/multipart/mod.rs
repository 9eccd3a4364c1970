//! multipart/form-data encoding for file uploads.

use crate::errors::EncodingError;
use bytes::Bytes;
use rand::RngCore;
use std::io::Write;

/// Maximum boundary length allowed by RFC 2046.
pub const MAX_BOUNDARY_LEN: usize = 70;

/// Content type used for every file part.
const PART_CONTENT_TYPE: &str = "application/octet-stream";

/// A single file section of a form.
#[derive(Debug, Clone)]
struct FilePart {
    field_name: String,
    file_name: String,
    content: Bytes,
}

/// Builder for a multipart/form-data body.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<FilePart>,
}

impl MultipartForm {
    /// Creates an empty form with a random boundary.
    pub fn new() -> Self {
        Self {
            boundary: Self::generate_boundary(),
            parts: Vec::new(),
        }
    }

    /// Creates an empty form with a caller-chosen boundary.
    pub fn with_boundary(boundary: impl Into<String>) -> Result<Self, EncodingError> {
        let boundary = boundary.into();
        validate_boundary(&boundary)?;
        Ok(Self {
            boundary,
            parts: Vec::new(),
        })
    }

    fn generate_boundary() -> String {
        let mut raw = [0u8; 30];
        rand::thread_rng().fill_bytes(&mut raw);
        raw.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Gets the boundary.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Adds a file part.
    pub fn file_part(
        mut self,
        field_name: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        self.parts.push(FilePart {
            field_name: field_name.into(),
            file_name: file_name.into(),
            content: content.into(),
        });
        self
    }

    /// Writes the form into a single buffer.
    pub fn encode(&self) -> Result<EncodedMultipart, EncodingError> {
        let capacity = self
            .parts
            .iter()
            .map(|part| part.content.len() + 256)
            .sum::<usize>()
            + self.boundary.len()
            + 8;
        let mut body = Vec::with_capacity(capacity);
        self.write_to(&mut body)?;

        Ok(EncodedMultipart {
            body: Bytes::from(body),
            boundary: self.boundary.clone(),
        })
    }

    /// Writes the form into any writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), EncodingError> {
        for part in &self.parts {
            let field_name = escape_quotes(&part.field_name)?;
            let file_name = escape_quotes(&part.file_name)?;

            write!(writer, "--{}\r\n", self.boundary)?;
            write!(
                writer,
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field_name, file_name
            )?;
            write!(writer, "Content-Type: {}\r\n\r\n", PART_CONTENT_TYPE)?;
            writer.write_all(&part.content)?;
            writer.write_all(b"\r\n")?;
        }
        write!(writer, "--{}--\r\n", self.boundary)?;
        writer.flush()?;
        Ok(())
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully encoded multipart body.
#[derive(Debug, Clone)]
pub struct EncodedMultipart {
    /// Encoded body.
    pub body: Bytes,
    /// Boundary used in the body.
    pub boundary: String,
}

impl EncodedMultipart {
    /// Gets the content type header value.
    pub fn content_type(&self) -> String {
        format!("{}, boundary=\"{}\"", mime::MULTIPART_FORM_DATA, self.boundary)
    }

    /// Exact length of the body in bytes.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }
}

fn validate_boundary(boundary: &str) -> Result<(), EncodingError> {
    if boundary.is_empty() || boundary.len() > MAX_BOUNDARY_LEN {
        return Err(EncodingError::InvalidBoundary(format!(
            "length must be between 1 and {} characters, got {}",
            MAX_BOUNDARY_LEN,
            boundary.len()
        )));
    }

    if boundary.ends_with(' ') {
        return Err(EncodingError::InvalidBoundary(
            "must not end with a space".to_string(),
        ));
    }

    if let Some(c) = boundary.chars().find(|c| !is_boundary_char(*c)) {
        return Err(EncodingError::InvalidBoundary(format!(
            "character {:?} is not allowed",
            c
        )));
    }

    Ok(())
}

fn is_boundary_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "'()+_,-./:=? ".contains(c)
}

fn escape_quotes(value: &str) -> Result<String, EncodingError> {
    if value.contains(['\r', '\n']) {
        return Err(EncodingError::InvalidHeaderValue(format!(
            "{:?} contains a line break",
            value
        )));
    }
    Ok(value.replace('\\', "\\\\").replace('"', "\\\""))
}

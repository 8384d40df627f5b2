//! # Wire Codec
//!
//! Fixed-order binary layout for every stored record and argument blob:
//! little-endian fixed-width unsigned integers, one-byte booleans and status
//! tags, and u32-length-prefixed UTF-8 strings. No field names, no schema
//! version — any field-order or type change breaks previously stored records,
//! which is accepted.
//!
//! Id collections are a u32 count followed by that many u64 ids in insertion
//! order.
//!
//! Decoding never panics: every failure is a [`DecodeError`], the sole cause
//! of a full-call abort.

use crate::domain::entities::{
    Certificate, CertificateDraft, CreatorProfile, Pass, PassDraft, Subscription,
    SubscriptionStatus,
};
use crate::domain::value_objects::{Address, CertificateId, PassId, SubscriptionId};
use crate::errors::DecodeError;

// =============================================================================
// WRITER
// =============================================================================

/// Appends fixed-order fields to a byte buffer.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Appends a single raw byte.
    pub fn put_u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    /// Appends a little-endian u32.
    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Appends a little-endian u64.
    pub fn put_u64(&mut self, value: u64) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Appends a boolean as one byte (0x00 or 0x01).
    pub fn put_bool(&mut self, value: bool) -> &mut Self {
        self.buf.push(u8::from(value));
        self
    }

    /// Appends a u32-length-prefixed UTF-8 string.
    pub fn put_str(&mut self, value: &str) -> &mut Self {
        self.put_u32(value.len() as u32);
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    /// Finishes and returns the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

// =============================================================================
// READER
// =============================================================================

/// Reads fixed-order fields from a byte slice.
#[derive(Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Wraps a byte slice for reading.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, wanted: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < wanted {
            return Err(DecodeError::UnexpectedEof {
                wanted,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + wanted];
        self.pos += wanted;
        Ok(slice)
    }

    /// Reads a single raw byte.
    pub fn get_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    /// Reads a little-endian u32.
    pub fn get_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.take(4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(bytes);
        Ok(u32::from_le_bytes(raw))
    }

    /// Reads a little-endian u64.
    pub fn get_u64(&mut self) -> Result<u64, DecodeError> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }

    /// Reads a one-byte boolean; any byte other than 0 or 1 is an error.
    pub fn get_bool(&mut self) -> Result<bool, DecodeError> {
        match self.get_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::InvalidBool(other)),
        }
    }

    /// Reads a u32-length-prefixed UTF-8 string.
    pub fn get_str(&mut self) -> Result<String, DecodeError> {
        let len = self.get_u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8)
    }

    /// Reads a one-byte subscription status tag.
    pub fn get_status(&mut self) -> Result<SubscriptionStatus, DecodeError> {
        let tag = self.get_u8()?;
        SubscriptionStatus::from_u8(tag).ok_or(DecodeError::InvalidStatus(tag))
    }

    /// Asserts the input is fully consumed.
    pub fn finish(self) -> Result<(), DecodeError> {
        if self.remaining() == 0 {
            Ok(())
        } else {
            Err(DecodeError::TrailingBytes {
                remaining: self.remaining(),
            })
        }
    }
}

// =============================================================================
// RECORD CODEC
// =============================================================================

/// A record with a fixed-order wire form.
pub trait WireRecord: Sized {
    /// Encodes the record to its wire form.
    fn to_bytes(&self) -> Vec<u8>;

    /// Decodes a record from its wire form, consuming all input.
    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError>;
}

impl WireRecord for Pass {
    fn to_bytes(&self) -> Vec<u8> {
        let mut w = ByteWriter::with_capacity(96);
        w.put_u64(self.id.raw())
            .put_str(self.creator.as_str())
            .put_str(&self.name)
            .put_str(&self.description)
            .put_str(&self.category)
            .put_str(&self.pass_type)
            .put_u64(self.price)
            .put_str(&self.token_ref)
            .put_u64(self.duration_seconds)
            .put_bool(self.auto_renew_allowed)
            .put_u32(self.max_supply)
            .put_u32(self.sold)
            .put_str(&self.metadata_ref)
            .put_bool(self.active);
        w.into_bytes()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut r = ByteReader::new(bytes);
        let pass = Self {
            id: PassId::new(r.get_u64()?),
            creator: Address::from(r.get_str()?),
            name: r.get_str()?,
            description: r.get_str()?,
            category: r.get_str()?,
            pass_type: r.get_str()?,
            price: r.get_u64()?,
            token_ref: r.get_str()?,
            duration_seconds: r.get_u64()?,
            auto_renew_allowed: r.get_bool()?,
            max_supply: r.get_u32()?,
            sold: r.get_u32()?,
            metadata_ref: r.get_str()?,
            active: r.get_bool()?,
        };
        r.finish()?;
        Ok(pass)
    }
}

impl WireRecord for Subscription {
    fn to_bytes(&self) -> Vec<u8> {
        let mut w = ByteWriter::with_capacity(64);
        w.put_u64(self.id.raw())
            .put_u64(self.pass_id.raw())
            .put_str(self.user.as_str())
            .put_u64(self.start_time)
            .put_u64(self.expiry_time)
            .put_bool(self.auto_renew)
            .put_u8(self.status.as_u8());
        w.into_bytes()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut r = ByteReader::new(bytes);
        let sub = Self {
            id: SubscriptionId::new(r.get_u64()?),
            pass_id: PassId::new(r.get_u64()?),
            user: Address::from(r.get_str()?),
            start_time: r.get_u64()?,
            expiry_time: r.get_u64()?,
            auto_renew: r.get_bool()?,
            status: r.get_status()?,
        };
        r.finish()?;
        Ok(sub)
    }
}

impl WireRecord for Certificate {
    fn to_bytes(&self) -> Vec<u8> {
        let mut w = ByteWriter::with_capacity(128);
        w.put_u64(self.id.raw())
            .put_u64(self.pass_id.raw())
            .put_str(self.issuer.as_str())
            .put_str(&self.recipient_name)
            .put_str(&self.organization_name)
            .put_str(&self.course_name)
            .put_str(&self.issue_date)
            .put_str(&self.certificate_type)
            .put_str(&self.metadata_ref);
        w.into_bytes()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut r = ByteReader::new(bytes);
        let cert = Self {
            id: CertificateId::new(r.get_u64()?),
            pass_id: PassId::new(r.get_u64()?),
            issuer: Address::from(r.get_str()?),
            recipient_name: r.get_str()?,
            organization_name: r.get_str()?,
            course_name: r.get_str()?,
            issue_date: r.get_str()?,
            certificate_type: r.get_str()?,
            metadata_ref: r.get_str()?,
        };
        r.finish()?;
        Ok(cert)
    }
}

// The drafts double as the argument blobs of their entry points, so hosts
// decode them with the same codec (and the same hard-abort channel) as
// stored records.

impl WireRecord for PassDraft {
    fn to_bytes(&self) -> Vec<u8> {
        let mut w = ByteWriter::with_capacity(96);
        w.put_str(&self.name)
            .put_str(&self.description)
            .put_str(&self.category)
            .put_str(&self.pass_type)
            .put_u64(self.price)
            .put_str(&self.token_ref)
            .put_u64(self.duration_seconds)
            .put_bool(self.auto_renew_allowed)
            .put_u32(self.max_supply)
            .put_str(&self.metadata_ref);
        w.into_bytes()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut r = ByteReader::new(bytes);
        let draft = Self {
            name: r.get_str()?,
            description: r.get_str()?,
            category: r.get_str()?,
            pass_type: r.get_str()?,
            price: r.get_u64()?,
            token_ref: r.get_str()?,
            duration_seconds: r.get_u64()?,
            auto_renew_allowed: r.get_bool()?,
            max_supply: r.get_u32()?,
            metadata_ref: r.get_str()?,
        };
        r.finish()?;
        Ok(draft)
    }
}

impl WireRecord for CertificateDraft {
    fn to_bytes(&self) -> Vec<u8> {
        let mut w = ByteWriter::with_capacity(96);
        w.put_str(&self.recipient_name)
            .put_str(&self.organization_name)
            .put_str(&self.course_name)
            .put_str(&self.issue_date)
            .put_str(&self.certificate_type)
            .put_str(&self.metadata_ref);
        w.into_bytes()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut r = ByteReader::new(bytes);
        let draft = Self {
            recipient_name: r.get_str()?,
            organization_name: r.get_str()?,
            course_name: r.get_str()?,
            issue_date: r.get_str()?,
            certificate_type: r.get_str()?,
            metadata_ref: r.get_str()?,
        };
        r.finish()?;
        Ok(draft)
    }
}

impl WireRecord for CreatorProfile {
    fn to_bytes(&self) -> Vec<u8> {
        let mut w = ByteWriter::with_capacity(64);
        w.put_str(&self.name)
            .put_str(&self.description)
            .put_str(&self.logo_ref)
            .put_str(&self.social_links);
        w.into_bytes()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut r = ByteReader::new(bytes);
        let profile = Self {
            name: r.get_str()?,
            description: r.get_str()?,
            logo_ref: r.get_str()?,
            social_links: r.get_str()?,
        };
        r.finish()?;
        Ok(profile)
    }
}

// =============================================================================
// SCALARS AND ID LISTS
// =============================================================================

/// Encodes a bare u64 record (counters, earnings balances).
#[must_use]
pub fn encode_u64(value: u64) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

/// Decodes a bare u64 record.
pub fn decode_u64(bytes: &[u8]) -> Result<u64, DecodeError> {
    let mut r = ByteReader::new(bytes);
    let value = r.get_u64()?;
    r.finish()?;
    Ok(value)
}

/// Encodes an id sequence as a u32 count followed by u64 ids in order.
#[must_use]
pub fn encode_id_list<I: Copy + Into<u64>>(ids: &[I]) -> Vec<u8> {
    let mut w = ByteWriter::with_capacity(4 + ids.len() * 8);
    w.put_u32(ids.len() as u32);
    for id in ids {
        w.put_u64((*id).into());
    }
    w.into_bytes()
}

/// Decodes an id sequence, preserving insertion order.
pub fn decode_id_list<I: From<u64>>(bytes: &[u8]) -> Result<Vec<I>, DecodeError> {
    let mut r = ByteReader::new(bytes);
    let count = r.get_u32()? as usize;
    let mut ids = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        ids.push(I::from(r.get_u64()?));
    }
    r.finish()?;
    Ok(ids)
}

// =============================================================================
// TESTS
// =============================================================================

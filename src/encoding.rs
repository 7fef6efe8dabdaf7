//! Stable binary encoding (little-endian).
//!
//! Format (versioned):
//! - magic: 8 bytes (`DBITS001`)
//! - len: u64, the logical bit count
//! - word_count: u64, always `len.div_ceil(64)`, then `word_count` u64 words
//!
//! Words are MSB-first as in memory; bits past `len` are always zero.

use tracing::debug;

use crate::dynamic_bits::{tail_mask, DynamicBits, WORD_BITS};
use crate::error::{Error, Result};

const MAGIC: &[u8; 8] = b"DBITS001";

struct Reader<'a> {
    bytes: &'a [u8],
    off: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self
            .bytes
            .get(self.off..)
            .and_then(|rest| rest.get(..N))
            .ok_or_else(|| Error::InvalidEncoding("unexpected end of input".to_string()))?;
        self.off += N;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.take::<8>()?))
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.off
    }
}

impl<const WORDS: usize> DynamicBits<WORDS> {
    /// Serialize to the versioned byte format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(24 + self.words.len() * 8);
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&(self.len as u64).to_le_bytes());
        out.extend_from_slice(&(self.words.len() as u64).to_le_bytes());
        for i in 0..self.words.len() {
            out.extend_from_slice(&self.logical_word(i).to_le_bytes());
        }
        out
    }

    /// Deserialize from [`to_bytes`](Self::to_bytes) output.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode(bytes).inspect_err(|err| {
            debug!(error = %err, input_len = bytes.len(), "rejected dynamic bits encoding");
        })
    }
}

fn decode<const WORDS: usize>(bytes: &[u8]) -> Result<DynamicBits<WORDS>> {
    let mut reader = Reader { bytes, off: 0 };

    if &reader.take::<8>()? != MAGIC {
        return Err(Error::InvalidEncoding("bad magic for DynamicBits".to_string()));
    }

    let len = usize::try_from(reader.read_u64()?)
        .map_err(|_| Error::InvalidEncoding("bit length overflows usize".to_string()))?;
    let word_count = reader.read_u64()?;
    if word_count != len.div_ceil(WORD_BITS) as u64 {
        return Err(Error::InvalidEncoding(format!(
            "word count {word_count} does not match bit length {len}"
        )));
    }
    // Checked above against len, so this fits in usize.
    let word_count = word_count as usize;
    if reader.remaining() < word_count.saturating_mul(8) {
        return Err(Error::InvalidEncoding("unexpected end of input".to_string()));
    }

    let mut bits = DynamicBits::with_capacity(len);
    for _ in 0..word_count {
        let word = reader.read_u64()?;
        bits.words.push(word);
    }
    bits.len = len;

    if let (Some(mask), Some(&last)) = (tail_mask(len), bits.words.last()) {
        if last & !mask != 0 {
            return Err(Error::InvalidEncoding("nonzero bits beyond length".to_string()));
        }
    }

    if reader.remaining() != 0 {
        return Err(Error::InvalidEncoding("trailing bytes after DynamicBits".to_string()));
    }

    Ok(bits)
}

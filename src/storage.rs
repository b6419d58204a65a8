//! Binary encoding of curated batches, for on-disk caching between
//! sessions. Scalars are big endian; strings are length-prefixed UTF-8;
//! timestamps are 16-byte TAI nanosecond counts, the only lossless
//! [Epoch] representation. A truncated or corrupt stream fails decoding
//! as a whole, it never yields a partially-populated list.
use hifitime::{Duration, Epoch, TimeScale};
use std::path::Path;

use crate::coord::{GeoCircle, GeoCoordinate};
use crate::notam::{list::NotamList, Notam};
use crate::Error;

/// Buffered reading cursor. All take attempts past the end of the
/// buffer fail with [Error::NotEnoughBytes].
struct Reader<'a> {
    buf: &'a [u8],
    ptr: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, ptr: 0 }
    }
    fn take(&mut self, size: usize) -> Result<&'a [u8], Error> {
        if size > self.buf.len() - self.ptr {
            return Err(Error::NotEnoughBytes);
        }
        let bytes = &self.buf[self.ptr..self.ptr + size];
        self.ptr += size;
        Ok(bytes)
    }
    fn take_u8(&mut self) -> Result<u8, Error> {
        Ok(self.take(1)?[0])
    }
    fn take_u32(&mut self) -> Result<u32, Error> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
    fn take_f64(&mut self) -> Result<f64, Error> {
        let bytes = self.take(8)?;
        Ok(f64::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }
    fn take_string(&mut self) -> Result<String, Error> {
        let size = self.take_u32()? as usize;
        let bytes = self.take(size)?;
        let content = std::str::from_utf8(bytes).map_err(|_| Error::Utf8Error)?;
        Ok(content.to_string())
    }
    fn take_epoch(&mut self) -> Result<Epoch, Error> {
        let bytes = self.take(16)?;
        let mut nanos = [0_u8; 16];
        nanos.copy_from_slice(bytes);
        let duration = Duration::from_total_nanoseconds(i128::from_be_bytes(nanos));
        Ok(Epoch::from_tai_duration(duration).to_time_scale(TimeScale::UTC))
    }
}

fn push_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

fn push_f64(buf: &mut Vec<u8>, value: f64) {
    buf.extend_from_slice(&value.to_be_bytes());
}

fn push_string(buf: &mut Vec<u8>, content: &str) {
    push_u32(buf, content.len() as u32);
    buf.extend_from_slice(content.as_bytes());
}

fn push_epoch(buf: &mut Vec<u8>, epoch: Epoch) {
    let nanos = epoch.to_tai_duration().total_nanoseconds();
    buf.extend_from_slice(&nanos.to_be_bytes());
}

impl GeoCircle {
    fn encode(&self, buf: &mut Vec<u8>) {
        push_f64(buf, self.center.latitude);
        push_f64(buf, self.center.longitude);
        push_f64(buf, self.radius_m);
    }
    fn decode(r: &mut Reader) -> Result<Self, Error> {
        let latitude = r.take_f64()?;
        let longitude = r.take_f64()?;
        let radius_m = r.take_f64()?;
        Ok(Self::new(GeoCoordinate::new(latitude, longitude), radius_m))
    }
}

impl Notam {
    fn encode(&self, buf: &mut Vec<u8>) {
        push_string(buf, &self.number);
        push_string(buf, &self.cancels);
        push_string(buf, &self.traffic);
        push_f64(buf, self.coordinate.latitude);
        push_f64(buf, self.coordinate.longitude);
        push_f64(buf, self.radius_m);
        push_epoch(buf, self.effective_start);
        push_epoch(buf, self.effective_end);
        push_string(buf, &self.text);
    }
    fn decode(r: &mut Reader) -> Result<Self, Error> {
        let number = r.take_string()?;
        let cancels = r.take_string()?;
        let traffic = r.take_string()?;
        let latitude = r.take_f64()?;
        let longitude = r.take_f64()?;
        let radius_m = r.take_f64()?;
        let effective_start = r.take_epoch()?;
        let effective_end = r.take_epoch()?;
        let text = r.take_string()?;
        Ok(Self {
            number,
            cancels,
            traffic,
            coordinate: GeoCoordinate::new(latitude, longitude),
            radius_m,
            effective_start,
            effective_end,
            text,
        })
    }
}

impl NotamList {
    /// Encodes this list: notices, then region, then retrieval time.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        push_u32(&mut buf, self.notams.len() as u32);
        for notam in &self.notams {
            notam.encode(&mut buf);
        }

        self.region.encode(&mut buf);

        match self.retrieved {
            Some(retrieved) => {
                buf.push(1);
                push_epoch(&mut buf, retrieved);
            },
            None => {
                buf.push(0);
            },
        }

        buf
    }

    /// [NotamList] decoding attempt, the exact [Self::to_bytes] mirror
    /// operation.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, Error> {
        let mut r = Reader::new(buf);

        let count = r.take_u32()?;
        let mut notams = Vec::new();
        for _ in 0..count {
            notams.push(Notam::decode(&mut r)?);
        }

        let region = GeoCircle::decode(&mut r)?;

        let retrieved = match r.take_u8()? {
            0 => None,
            _ => Some(r.take_epoch()?),
        };

        Ok(Self {
            notams,
            region,
            retrieved,
        })
    }

    /// Caches this list on disk.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        std::fs::write(path, self.to_bytes())?;
        Ok(())
    }

    /// Restores a cached list from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

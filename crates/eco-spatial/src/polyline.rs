//! HERE flexible-polyline codec.
//!
//! # Format
//!
//! ```text
//! polyline := uvarint(version = 1) uvarint(header) point*
//! header   := precision | third_dim << 4 | third_dim_precision << 7
//! point    := svarint(Δlat) svarint(Δlon) [svarint(Δz)]
//! ```
//!
//! Coordinates are scaled by `10^precision`, rounded to integers, and
//! delta-coded against the previous point.  Signed deltas are zig-zag
//! mapped to unsigned; unsigned values are written as little-endian 5-bit
//! groups, each group carrying a `0x20` continuation flag, over the URL-safe
//! alphabet `A–Z a–z 0–9 - _`.
//!
//! Routing responses encode their paths this way; the planner decodes them
//! to test whether a candidate route enters an avoided area.

use eco_core::GeoPoint;

use crate::PolylineError;

/// The only format version in use.
pub const FORMAT_VERSION: u64 = 1;

/// Highest precision the 4-bit header field can carry.
pub const MAX_PRECISION: u8 = 15;

const ENCODING_TABLE: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

// ── Header ────────────────────────────────────────────────────────────────────

/// Meaning of the optional third coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThirdDimension {
    #[default]
    Absent,
    Level,
    Altitude,
    Elevation,
    Custom1,
    Custom2,
}

impl ThirdDimension {
    fn code(self) -> u64 {
        match self {
            ThirdDimension::Absent    => 0,
            ThirdDimension::Level     => 1,
            ThirdDimension::Altitude  => 2,
            ThirdDimension::Elevation => 3,
            ThirdDimension::Custom1   => 6,
            ThirdDimension::Custom2   => 7,
        }
    }

    fn from_code(code: u64) -> Result<Self, PolylineError> {
        match code {
            0 => Ok(ThirdDimension::Absent),
            1 => Ok(ThirdDimension::Level),
            2 => Ok(ThirdDimension::Altitude),
            3 => Ok(ThirdDimension::Elevation),
            6 => Ok(ThirdDimension::Custom1),
            7 => Ok(ThirdDimension::Custom2),
            other => Err(PolylineError::ReservedThirdDimension(other)),
        }
    }

    #[inline]
    pub fn is_present(self) -> bool {
        self != ThirdDimension::Absent
    }
}

/// Precision and third-dimension layout of an encoded polyline.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolylineHeader {
    /// Decimal digits kept for lat/lon.
    pub precision: u8,
    pub third_dim: ThirdDimension,
    /// Decimal digits kept for the third dimension.
    pub third_dim_precision: u8,
}

impl PolylineHeader {
    /// A 2-D header with the given lat/lon precision.
    pub fn new(precision: u8) -> Self {
        Self { precision, third_dim: ThirdDimension::Absent, third_dim_precision: 0 }
    }

    fn validate(&self) -> Result<(), PolylineError> {
        for p in [self.precision, self.third_dim_precision] {
            if p > MAX_PRECISION {
                return Err(PolylineError::PrecisionOutOfRange(p as u64));
            }
        }
        Ok(())
    }

    fn pack(&self) -> u64 {
        self.precision as u64
            | self.third_dim.code() << 4
            | (self.third_dim_precision as u64) << 7
    }

    fn unpack(bits: u64) -> Result<Self, PolylineError> {
        let third_dim_precision = bits >> 7;
        if third_dim_precision > MAX_PRECISION as u64 {
            return Err(PolylineError::PrecisionOutOfRange(third_dim_precision));
        }
        Ok(Self {
            precision:           (bits & 0x0f) as u8,
            third_dim:           ThirdDimension::from_code((bits >> 4) & 0x07)?,
            third_dim_precision: third_dim_precision as u8,
        })
    }
}

impl Default for PolylineHeader {
    /// Precision 5, the routing API's default.
    fn default() -> Self {
        Self::new(5)
    }
}

// ── Polyline ──────────────────────────────────────────────────────────────────

/// A decoded polyline.
///
/// `third` is empty when `header.third_dim` is `Absent`, otherwise it has
/// one value per point.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub header: PolylineHeader,
    pub points: Vec<GeoPoint>,
    pub third:  Vec<f64>,
}

impl Polyline {
    /// A 2-D polyline.
    pub fn new(points: Vec<GeoPoint>, precision: u8) -> Self {
        Self { header: PolylineHeader::new(precision), points, third: Vec::new() }
    }

    /// Encode to the flexible-polyline string form.
    pub fn encode(&self) -> Result<String, PolylineError> {
        self.header.validate()?;
        let with_z = self.header.third_dim.is_present();
        let expected_third = if with_z { self.points.len() } else { 0 };
        if self.third.len() != expected_third {
            return Err(PolylineError::ThirdDimensionMismatch {
                points: self.points.len(),
                values: self.third.len(),
            });
        }

        let mut out = String::with_capacity(4 + self.points.len() * 8);
        encode_unsigned(FORMAT_VERSION, &mut out);
        encode_unsigned(self.header.pack(), &mut out);

        let mut lat = DeltaEncoder::new(self.header.precision);
        let mut lon = DeltaEncoder::new(self.header.precision);
        let mut z   = DeltaEncoder::new(self.header.third_dim_precision);

        for (i, p) in self.points.iter().enumerate() {
            lat.push(p.lat, &mut out)?;
            lon.push(p.lon, &mut out)?;
            if with_z {
                z.push(self.third[i], &mut out)?;
            }
        }
        Ok(out)
    }
}

/// Encode a 2-D path at `precision` decimal digits.
pub fn encode(points: &[GeoPoint], precision: u8) -> Result<String, PolylineError> {
    Polyline::new(points.to_vec(), precision).encode()
}

/// Decode a flexible-polyline string.
pub fn decode(encoded: &str) -> Result<Polyline, PolylineError> {
    let mut reader = Reader { bytes: encoded.as_bytes(), pos: 0 };

    let version = reader.unsigned()?;
    if version != FORMAT_VERSION {
        return Err(PolylineError::UnsupportedVersion(version));
    }
    let header = PolylineHeader::unpack(reader.unsigned()?)?;
    let with_z = header.third_dim.is_present();

    let lat_scale = 10f64.powi(header.precision as i32);
    let z_scale   = 10f64.powi(header.third_dim_precision as i32);

    let mut points = Vec::new();
    let mut third  = Vec::new();
    let (mut lat, mut lon, mut z) = (0i64, 0i64, 0i64);

    while !reader.at_end() {
        lat = lat.wrapping_add(reader.signed()?);
        lon = lon.wrapping_add(reader.signed()?);
        points.push(GeoPoint::new(lat as f64 / lat_scale, lon as f64 / lat_scale));
        if with_z {
            z = z.wrapping_add(reader.signed()?);
            third.push(z as f64 / z_scale);
        }
    }

    Ok(Polyline { header, points, third })
}

/// Decode only the lat/lon path, discarding any third dimension.
pub fn decode_points(encoded: &str) -> Result<Vec<GeoPoint>, PolylineError> {
    decode(encoded).map(|p| p.points)
}

// ── Internals ─────────────────────────────────────────────────────────────────

struct DeltaEncoder {
    scale: f64,
    last:  i64,
}

impl DeltaEncoder {
    fn new(precision: u8) -> Self {
        Self { scale: 10f64.powi(precision as i32), last: 0 }
    }

    fn push(&mut self, value: f64, out: &mut String) -> Result<(), PolylineError> {
        if !value.is_finite() {
            return Err(PolylineError::NonFinite(value));
        }
        let scaled = (value * self.scale).round() as i64;
        encode_signed(scaled - self.last, out);
        self.last = scaled;
        Ok(())
    }
}

fn encode_unsigned(mut value: u64, out: &mut String) {
    while value > 0x1f {
        let chunk = (value & 0x1f) | 0x20;
        out.push(ENCODING_TABLE[chunk as usize] as char);
        value >>= 5;
    }
    out.push(ENCODING_TABLE[value as usize] as char);
}

fn encode_signed(value: i64, out: &mut String) {
    // Zig-zag: the sign moves to the lowest bit.
    let zigzag = if value < 0 { !(value << 1) } else { value << 1 };
    encode_unsigned(zigzag as u64, out);
}

fn decode_char(byte: u8) -> Option<u64> {
    let v = match byte {
        b'A'..=b'Z' => byte - b'A',
        b'a'..=b'z' => byte - b'a' + 26,
        b'0'..=b'9' => byte - b'0' + 52,
        b'-'        => 62,
        b'_'        => 63,
        _           => return None,
    };
    Some(v as u64)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos:   usize,
}

impl Reader<'_> {
    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn unsigned(&mut self) -> Result<u64, PolylineError> {
        let mut result = 0u64;
        let mut shift  = 0u32;
        loop {
            let Some(&byte) = self.bytes.get(self.pos) else {
                return Err(PolylineError::Truncated);
            };
            let value = decode_char(byte).ok_or(PolylineError::InvalidCharacter {
                ch:     byte as char,
                offset: self.pos,
            })?;
            self.pos += 1;

            if shift >= 64 {
                return Err(PolylineError::Overflow);
            }
            result |= (value & 0x1f) << shift;
            if value < 0x20 {
                return Ok(result);
            }
            shift += 5;
        }
    }

    fn signed(&mut self) -> Result<i64, PolylineError> {
        let raw = self.unsigned()?;
        let magnitude = (raw >> 1) as i64;
        Ok(if raw & 1 == 1 { !magnitude } else { magnitude })
    }
}

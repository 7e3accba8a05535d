//! Geometry values: GeoJSON parsing and WKB encoding/decoding.
//!
//! Geo quads are set from GeoJSON text and travel on the wire as WKB bytes;
//! query responses return the same WKB form, decoded back here. Encoding is
//! always little-endian, decoding accepts both byte orders. Round trips are
//! bit-exact.

use std::fmt;

use serde::Deserialize;

use crate::client::ClientError;

const WKB_POINT: u32 = 1;
const WKB_LINE_STRING: u32 = 2;
const WKB_POLYGON: u32 = 3;

/// A geometry carried by a geo-typed quad value.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point { x: f64, y: f64 },
    LineString(Vec<[f64; 2]>),
    Polygon(Vec<Vec<[f64; 2]>>),
}

/// GeoJSON geometry object, as accepted by [`Geometry::from_geojson`].
#[derive(Deserialize)]
#[serde(tag = "type")]
enum GeoJson {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

impl Geometry {
    /// Parse a GeoJSON geometry object.
    pub fn from_geojson(text: &str) -> Result<Geometry, ClientError> {
        let parsed: GeoJson = serde_json::from_str(text)
            .map_err(|e| ClientError::Geo(format!("invalid GeoJSON: {e}")))?;
        Ok(match parsed {
            GeoJson::Point {
                coordinates: [x, y],
            } => Geometry::Point { x, y },
            GeoJson::LineString { coordinates } => Geometry::LineString(coordinates),
            GeoJson::Polygon { coordinates } => Geometry::Polygon(coordinates),
        })
    }

    /// Encode to little-endian WKB.
    pub fn to_wkb(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(21);
        buf.push(1); // little-endian marker
        match self {
            Geometry::Point { x, y } => {
                buf.extend_from_slice(&WKB_POINT.to_le_bytes());
                write_coord(&mut buf, *x, *y);
            }
            Geometry::LineString(points) => {
                buf.extend_from_slice(&WKB_LINE_STRING.to_le_bytes());
                buf.extend_from_slice(&(points.len() as u32).to_le_bytes());
                for [x, y] in points {
                    write_coord(&mut buf, *x, *y);
                }
            }
            Geometry::Polygon(rings) => {
                buf.extend_from_slice(&WKB_POLYGON.to_le_bytes());
                buf.extend_from_slice(&(rings.len() as u32).to_le_bytes());
                for ring in rings {
                    buf.extend_from_slice(&(ring.len() as u32).to_le_bytes());
                    for [x, y] in ring {
                        write_coord(&mut buf, *x, *y);
                    }
                }
            }
        }
        buf
    }

    /// Decode a WKB buffer in either byte order.
    pub fn from_wkb(buf: &[u8]) -> Result<Geometry, ClientError> {
        let mut cursor = WkbCursor::new(buf)?;
        let geometry_type = cursor.read_u32()?;
        match geometry_type {
            WKB_POINT => {
                let (x, y) = cursor.read_coord()?;
                Ok(Geometry::Point { x, y })
            }
            WKB_LINE_STRING => {
                let points = cursor.read_ring()?;
                Ok(Geometry::LineString(points))
            }
            WKB_POLYGON => {
                let ring_count = cursor.read_u32()? as usize;
                let mut rings = Vec::with_capacity(ring_count);
                for _ in 0..ring_count {
                    rings.push(cursor.read_ring()?);
                }
                Ok(Geometry::Polygon(rings))
            }
            other => Err(ClientError::Geo(format!(
                "unsupported WKB geometry type {other}"
            ))),
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point { x, y } => write!(f, "Point({x}, {y})"),
            Geometry::LineString(points) => write!(f, "LineString({} points)", points.len()),
            Geometry::Polygon(rings) => write!(f, "Polygon({} rings)", rings.len()),
        }
    }
}

fn write_coord(buf: &mut Vec<u8>, x: f64, y: f64) {
    buf.extend_from_slice(&x.to_le_bytes());
    buf.extend_from_slice(&y.to_le_bytes());
}

/// Bounds-checked reader over a WKB buffer.
struct WkbCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    little_endian: bool,
}

impl<'a> WkbCursor<'a> {
    fn new(buf: &'a [u8]) -> Result<Self, ClientError> {
        let little_endian = match buf.first() {
            Some(0) => false,
            Some(1) => true,
            Some(other) => {
                return Err(ClientError::Geo(format!("invalid WKB byte order {other}")))
            }
            None => return Err(ClientError::Geo("empty WKB buffer".to_string())),
        };
        Ok(Self {
            buf,
            pos: 1,
            little_endian,
        })
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ClientError> {
        let end = self.pos + len;
        if end > self.buf.len() {
            return Err(ClientError::Geo(format!(
                "truncated WKB buffer: need {end} bytes, have {}",
                self.buf.len()
            )));
        }
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32, ClientError> {
        let bytes: [u8; 4] = self.take(4)?.try_into().expect("slice length checked");
        Ok(if self.little_endian {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        })
    }

    fn read_f64(&mut self) -> Result<f64, ClientError> {
        let bytes: [u8; 8] = self.take(8)?.try_into().expect("slice length checked");
        Ok(if self.little_endian {
            f64::from_le_bytes(bytes)
        } else {
            f64::from_be_bytes(bytes)
        })
    }

    fn read_coord(&mut self) -> Result<(f64, f64), ClientError> {
        Ok((self.read_f64()?, self.read_f64()?))
    }

    fn read_ring(&mut self) -> Result<Vec<[f64; 2]>, ClientError> {
        let count = self.read_u32()? as usize;
        let mut points = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            let (x, y) = self.read_coord()?;
            points.push([x, y]);
        }
        Ok(points)
    }
}

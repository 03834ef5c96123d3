//! Encoded polyline codec
//!
//! Implements the standard polyline algorithm: per-coordinate deltas packed
//! into base-32 variable-length chunks at a 1e-5 scale factor. Decoding is
//! deliberately forgiving: empty or corrupt input yields an empty sequence,
//! since consumers treat "no route" as a valid state.

use tracing::warn;

const PRECISION: f64 = 1e5;

/// Decode an encoded polyline into (lat, lon) pairs
///
/// Malformed input (a byte outside the printable chunk range, or a dangling
/// continuation chunk) is recovered locally by returning an empty sequence.
#[must_use]
pub fn decode(encoded: &str) -> Vec<(f64, f64)> {
    match try_decode(encoded) {
        Some(points) => points,
        None => {
            warn!("Malformed polyline input ({} bytes), treating as no route", encoded.len());
            Vec::new()
        }
    }
}

fn try_decode(encoded: &str) -> Option<Vec<(f64, f64)>> {
    let mut points = Vec::new();
    let mut bytes = encoded.bytes();
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    loop {
        let dlat = match next_delta(&mut bytes) {
            Delta::Value(v) => v,
            Delta::End => break,
            Delta::Malformed => return None,
        };
        // A latitude without a matching longitude is corrupt input
        let dlon = match next_delta(&mut bytes) {
            Delta::Value(v) => v,
            Delta::End | Delta::Malformed => return None,
        };

        lat += dlat;
        lon += dlon;
        points.push((lat as f64 / PRECISION, lon as f64 / PRECISION));
    }

    Some(points)
}

enum Delta {
    Value(i64),
    End,
    Malformed,
}

fn next_delta(bytes: &mut impl Iterator<Item = u8>) -> Delta {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;
    let mut read_any = false;

    loop {
        let Some(byte) = bytes.next() else {
            return if read_any { Delta::Malformed } else { Delta::End };
        };
        if !(63..=126).contains(&byte) {
            return Delta::Malformed;
        }
        read_any = true;

        // A well-formed delta never needs more than seven chunks
        if shift > 35 {
            return Delta::Malformed;
        }

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    let delta = if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    };
    Delta::Value(delta)
}

/// Encode (lat, lon) pairs into a polyline string
#[must_use]
pub fn encode(points: &[(f64, f64)]) -> String {
    let mut encoded = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for &(lat, lon) in points {
        let lat_e5 = (lat * PRECISION).round() as i64;
        let lon_e5 = (lon * PRECISION).round() as i64;

        encode_delta(lat_e5 - prev_lat, &mut encoded);
        encode_delta(lon_e5 - prev_lon, &mut encoded);

        prev_lat = lat_e5;
        prev_lon = lon_e5;
    }

    encoded
}

fn encode_delta(delta: i64, out: &mut String) {
    let mut value = delta << 1;
    if delta < 0 {
        value = !value;
    }

    while value >= 0x20 {
        out.push((((0x20 | (value & 0x1f)) + 63) as u8) as char);
        value >>= 5;
    }
    out.push(((value + 63) as u8) as char);
}

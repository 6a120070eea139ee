/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use base64::{
    Engine as _,
    engine::general_purpose::STANDARD
};
use num_bigint::BigUint;
use serde::Serialize;
use serde_json::{Map, Value};

pub use crate::errors::SerializationError;
use crate::errors::SignatureError;
use crate::curve::{Curve, Point};
use crate::hashes::HashConfig;

///Implements conversion to and from the JSON wire format,
///as UTF-8 bytes (`to_bytes`/`from_bytes`) or as base64 text (`to_base64`/`from_base64`),
///for the signature types in this crate.
pub trait ToBytes: Sized {
    fn to_json(&self) -> Result<String, SerializationError>;

    ///Parse and validate JSON.
    ///
    ///Fails with the first problem found, checking the message, then the scalars,
    ///then the curve and the ring points, then the hash selection.
    fn from_json(json: &str) -> Result<Self, SignatureError>;

    fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        return Ok(self.to_json()?.into_bytes())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        return match std::str::from_utf8(bytes) {
            Ok(json) => Self::from_json(json),
            Err(_) => Err(SignatureError::InvalidJson("not valid UTF-8".to_owned()))
        }
    }

    fn to_base64(&self) -> Result<String, SerializationError> {
        return Ok(STANDARD.encode(self.to_json()?))
    }

    fn from_base64(encoded: &str) -> Result<Self, SignatureError> {
        return match STANDARD.decode(encoded) {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(_) => Err(SignatureError::InvalidJson("not valid base64".to_owned()))
        }
    }
}

#[derive(Serialize)]
struct GeneratorJson {
    x: String,
    y: String
}

///Wire form of a curve: its name and public parameters as decimal strings.
#[derive(Serialize)]
pub(crate) struct CurveJson {
    name: &'static str,
    #[serde(rename = "G")]
    g: GeneratorJson,
    #[serde(rename = "N")]
    n: String,
    #[serde(rename = "P")]
    p: String

} impl CurveJson {
    pub fn new(curve: Curve) -> Self {
        let g = curve.g();
        return Self{
            name: curve.name(),
            g: GeneratorJson{x: g.x().to_string(), y: g.y().to_string()},
            n: curve.n().to_string(),
            p: curve.p().to_string()
        }
    }
}

#[derive(Serialize)]
pub(crate) struct ConfigJson {
    hash: &'static str

} impl ConfigJson {
    pub fn new(hash_config: HashConfig) -> Self {
        return Self{hash: hash_config.name()}
    }
}

pub(crate) fn encode_message(message: &[u8]) -> Result<&str, SerializationError> {
    return std::str::from_utf8(message)
        .map_err(|_| SerializationError::EncodingError)
}

///Hex of each compressed point.
pub(crate) fn encode_points(points: &[Point]) -> Vec<String> {
    return points.iter()
        .map(|point| hex::encode(point.to_compressed_bytes()))
        .collect()
}

///Decimal string of each scalar.
pub(crate) fn encode_scalars(scalars: &[BigUint]) -> Vec<String> {
    return scalars.iter()
        .map(|scalar| scalar.to_string())
        .collect()
}

pub(crate) fn to_json_string<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    return serde_json::to_string(value)
        .map_err(|_| SerializationError::EncodingError)
}

fn invalid(msg: &str) -> SignatureError {
    return SignatureError::InvalidJson(msg.to_owned())
}

///Parse JSON text into a top-level object.
pub(crate) fn parse_object(json: &str) -> Result<Map<String, Value>, SignatureError> {
    return match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(invalid("expected an object")),
        Err(err) => Err(SignatureError::InvalidJson(err.to_string()))
    }
}

pub(crate) fn parse_message(object: &Map<String, Value>) -> Result<Vec<u8>, SignatureError> {
    return match object.get("message") {
        Some(Value::String(message)) => Ok(message.as_bytes().to_vec()),
        _ => Err(invalid("message must be a string"))
    }
}

///A scalar written as a decimal string or as a non-negative integer.
fn parse_scalar_value(value: &Value, field: &str) -> Result<BigUint, SignatureError> {
    let scalar = match value {
        Value::String(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
            BigUint::parse_bytes(digits.as_bytes(), 10),
        Value::Number(number) => number.as_u64().map(BigUint::from),
        _ => None
    };
    return scalar.ok_or_else(|| SignatureError::InvalidJson(format!("{field} must be a string or a number")))
}

pub(crate) fn parse_scalar(object: &Map<String, Value>, field: &str) -> Result<BigUint, SignatureError> {
    return match object.get(field) {
        Some(value) => parse_scalar_value(value, field),
        None => Err(SignatureError::InvalidJson(format!("{field} must be a string or a number")))
    }
}

pub(crate) fn parse_scalars(object: &Map<String, Value>, field: &str) -> Result<Vec<BigUint>, SignatureError> {
    return match object.get(field) {
        Some(Value::Array(values)) => values.iter()
            .map(|value| parse_scalar_value(value, field))
            .collect(),
        _ => Err(SignatureError::InvalidJson(format!("{field} must be an array")))
    }
}

///A ring position; negative values are reported as a parameter error.
pub(crate) fn parse_index(object: &Map<String, Value>, field: &str) -> Result<usize, SignatureError> {
    let number = match object.get(field) {
        Some(Value::Number(number)) => number,
        _ => return Err(SignatureError::InvalidJson(format!("{field} must be an integer")))
    };
    if let Some(index) = number.as_u64() {
        return usize::try_from(index)
            .map_err(|_| SignatureError::InvalidParams(format!("{field} must be < ring.length")))
    }
    return match number.as_i64() {
        Some(_) => Err(SignatureError::InvalidParams(format!("{field} must be >= 0"))),
        None => Err(SignatureError::InvalidJson(format!("{field} must be an integer")))
    }
}

///Look up the named curve and check any parameters supplied alongside its name.
pub(crate) fn parse_curve(object: &Map<String, Value>) -> Result<Curve, SignatureError> {
    let curve_object = match object.get("curve") {
        Some(Value::Object(curve_object)) => curve_object,
        _ => return Err(invalid("curve must be an object"))
    };
    let curve = match curve_object.get("name") {
        Some(Value::String(name)) => Curve::from_name(name)?,
        _ => return Err(invalid("curve name must be a string"))
    };

    let mismatch = || SignatureError::InvalidJson(format!("curve parameters do not match {curve}"));
    if let Some(n) = curve_object.get("N") {
        if &parse_scalar_value(n, "N")? != curve.n() {
            return Err(mismatch())
        }
    }
    if let Some(p) = curve_object.get("P") {
        if &parse_scalar_value(p, "P")? != curve.p() {
            return Err(mismatch())
        }
    }
    if let Some(g) = curve_object.get("G") {
        let (x, y) = match g {
            Value::Object(g) => match (g.get("x"), g.get("y")) {
                (Some(x), Some(y)) => (parse_scalar_value(x, "G.x")?, parse_scalar_value(y, "G.y")?),
                _ => return Err(invalid("G must have x and y"))
            },
            _ => return Err(invalid("G must be an object"))
        };
        if &x != curve.g().x() || &y != curve.g().y() {
            return Err(mismatch())
        }
    }
    return Ok(curve)
}

///Decode every ring point, reporting the index of the first invalid one.
pub(crate) fn parse_ring(object: &Map<String, Value>, curve: Curve) -> Result<Vec<Point>, SignatureError> {
    let values = match object.get("ring") {
        Some(Value::Array(values)) => values,
        _ => return Err(invalid("ring must be an array"))
    };

    let mut ring: Vec<Point> = Vec::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        let bytes = match value {
            Value::String(encoded) => hex::decode(encoded)
                .map_err(|_| SignatureError::InvalidPoint(Some(i)))?,
            _ => return Err(SignatureError::InvalidPoint(Some(i)))
        };
        ring.push(Point::from_bytes(curve, &bytes)
            .map_err(|_| SignatureError::InvalidPoint(Some(i)))?);
    }
    return Ok(ring)
}

///The hash selection; SHA-256 when absent.
pub(crate) fn parse_hash_config(object: &Map<String, Value>) -> Result<HashConfig, SignatureError> {
    let config = match object.get("config") {
        None | Some(Value::Null) => return Ok(HashConfig::default()),
        Some(Value::Object(config)) => config,
        _ => return Err(invalid("config must be an object"))
    };
    return match config.get("hash") {
        None => Ok(HashConfig::default()),
        Some(Value::String(name)) => HashConfig::from_name(name),
        _ => Err(invalid("config hash must be a string"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_accept_strings_and_numbers() {
        let object = parse_object(r#"{"a": "12345", "b": 7, "c": -1, "d": "1_0", "e": 1.5}"#).unwrap();
        assert_eq!(parse_scalar(&object, "a").unwrap(), BigUint::from(12345u32));
        assert_eq!(parse_scalar(&object, "b").unwrap(), BigUint::from(7u32));
        assert!(parse_scalar(&object, "c").is_err());
        assert!(parse_scalar(&object, "d").is_err());
        assert!(parse_scalar(&object, "e").is_err());
        assert!(parse_scalar(&object, "missing").is_err());
    }

    #[test]
    fn negative_index() {
        let object = parse_object(r#"{"pi": -2, "x": 3}"#).unwrap();
        assert_eq!(
            parse_index(&object, "pi"),
            Err(SignatureError::InvalidParams("pi must be >= 0".to_owned()))
        );
        assert_eq!(parse_index(&object, "x"), Ok(3));
    }

    #[test]
    fn curve_parameters_must_match() {
        let object = parse_object(r#"{"curve": {"name": "secp256k1", "N": "5"}}"#).unwrap();
        assert!(matches!(parse_curve(&object), Err(SignatureError::InvalidJson(_))));

        let object = parse_object(r#"{"curve": {"name": "p256"}}"#).unwrap();
        assert_eq!(parse_curve(&object), Err(SignatureError::UnknownCurve("p256".to_owned())));
    }
}

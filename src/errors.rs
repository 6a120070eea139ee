/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    error::Error,
    fmt::Display
};

///Encoding/serialization errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializationError {
    ///Failure to serialize.
    EncodingError,
    ///Failure to deserialize.
    DecodingError,

} impl Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self{
            Self::EncodingError => "Encoding error.",
            Self::DecodingError => "Decoding error."
        })
    }

} impl Error for SerializationError {}

///Elliptic curve errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    ///The coordinates are out of range or do not satisfy the curve equation.
    InvalidPoint,
    ///A scalar is not in the range [1, N-1].
    InvalidScalar,
    ///The operation produced the neutral element, which has no affine form.
    PointAtInfinity,
    ///The byte encoding of a point is malformed.
    InvalidEncoding,
    ///No curve is known by this name.
    UnknownCurve(String)

} impl Display for CurveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPoint => write!(f, "Point is not on the curve."),
            Self::InvalidScalar => write!(f, "Scalar is not in the range [1, N-1]."),
            Self::PointAtInfinity => write!(f, "Point at infinity."),
            Self::InvalidEncoding => write!(f, "Malformed point encoding."),
            Self::UnknownCurve(name) => write!(f, "Unknown curve: {name}")
        }
    }

} impl Error for CurveError {}

///Ring signature errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    ///Serialized input is malformed or semantically wrong.
    InvalidJson(String),
    ///No curve is known by this name.
    UnknownCurve(String),
    ///A point is off the curve or out of range.
    ///Carries the ring index when the point is a ring member.
    InvalidPoint(Option<usize>),
    ///The ring has no members.
    EmptyRing,
    ///Two ring members are the same point.
    DuplicateRingMember,
    ///The ring and the responses have different lengths.
    RingResponseLengthMismatch,
    ///A response is zero or out of range.
    InvalidResponses,
    ///A parameter is out of its required range.
    InvalidParams(String),
    ///The message must not be empty.
    NoEmptyMessage,
    ///Two fields which must have matching lengths do not.
    LengthMismatch(&'static str, &'static str),
    ///A scalar is not in the range [1, N-1].
    InvalidScalar,
    ///A ciphertext could not be authenticated or decrypted.
    DecryptionFailed

} impl Display for SignatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(msg) => write!(f, "Invalid JSON: {msg}"),
            Self::UnknownCurve(name) => write!(f, "Unknown curve: {name}"),
            Self::InvalidPoint(Some(index)) => write!(f, "Invalid point at ring index {index}."),
            Self::InvalidPoint(None) => write!(f, "Invalid point."),
            Self::EmptyRing => write!(f, "The ring is empty."),
            Self::DuplicateRingMember => write!(f, "The ring contains duplicate members."),
            Self::RingResponseLengthMismatch => write!(f, "Ring and responses have different lengths."),
            Self::InvalidResponses => write!(f, "Invalid responses."),
            Self::InvalidParams(msg) => write!(f, "Invalid parameters: {msg}"),
            Self::NoEmptyMessage => write!(f, "The message cannot be empty."),
            Self::LengthMismatch(a, b) => write!(f, "Length mismatch between '{a}' and '{b}'."),
            Self::InvalidScalar => write!(f, "Scalar is not in the range [1, N-1]."),
            Self::DecryptionFailed => write!(f, "Decryption failed.")
        }
    }

} impl Error for SignatureError {}

impl From<CurveError> for SignatureError {
    fn from(err: CurveError) -> Self {
        return match err {
            CurveError::InvalidPoint
            | CurveError::PointAtInfinity
            | CurveError::InvalidEncoding => Self::InvalidPoint(None),
            CurveError::InvalidScalar => Self::InvalidScalar,
            CurveError::UnknownCurve(name) => Self::UnknownCurve(name)
        }
    }
}

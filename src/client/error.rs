//! Error types for the FatSecret client.
//!
//! Every failure the client can report is a variant of [`FatSecretError`]. Callers that
//! need to branch on the broad category use [`FatSecretError::kind`]; callers that want
//! the FatSecret numeric code use [`FatSecretError::code`].

use std::fmt;
use thiserror::Error;

/// Error codes documented by the FatSecret Platform API.
///
/// The API reports these inside an `{"error": {"code": .., "message": ..}}` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    MissingOAuthParameter,
    UnsupportedOAuthParameter,
    InvalidSignatureMethod,
    InvalidConsumerKey,
    InvalidTimestamp,
    InvalidNonce,
    InvalidSignature,
    InvalidAccessToken,
    InvalidOAuth2Token,
    MissingOAuth2Scope,
    ParameterOutOfRange,
    Other(i64),
}

impl ApiErrorCode {
    pub fn from_code(code: i64) -> Self {
        match code {
            2 => Self::MissingOAuthParameter,
            3 => Self::UnsupportedOAuthParameter,
            4 => Self::InvalidSignatureMethod,
            5 => Self::InvalidConsumerKey,
            6 => Self::InvalidTimestamp,
            7 => Self::InvalidNonce,
            8 => Self::InvalidSignature,
            9 => Self::InvalidAccessToken,
            13 => Self::InvalidOAuth2Token,
            14 => Self::MissingOAuth2Scope,
            107 => Self::ParameterOutOfRange,
            other => Self::Other(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::MissingOAuthParameter => 2,
            Self::UnsupportedOAuthParameter => 3,
            Self::InvalidSignatureMethod => 4,
            Self::InvalidConsumerKey => 5,
            Self::InvalidTimestamp => 6,
            Self::InvalidNonce => 7,
            Self::InvalidSignature => 8,
            Self::InvalidAccessToken => 9,
            Self::InvalidOAuth2Token => 13,
            Self::MissingOAuth2Scope => 14,
            Self::ParameterOutOfRange => 107,
            Self::Other(code) => *code,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::MissingOAuthParameter => "Missing required OAuth parameter",
            Self::UnsupportedOAuthParameter => "Unsupported OAuth parameter",
            Self::InvalidSignatureMethod => "Invalid signature method",
            Self::InvalidConsumerKey => "Invalid consumer key",
            Self::InvalidTimestamp => "Invalid/expired timestamp",
            Self::InvalidNonce => "Invalid/used nonce",
            Self::InvalidSignature => "Invalid signature",
            Self::InvalidAccessToken => "Invalid access token",
            Self::InvalidOAuth2Token => "Invalid/expired OAuth 2.0 token",
            Self::MissingOAuth2Scope => "Missing OAuth 2.0 scope",
            Self::ParameterOutOfRange => "Parameter value out of range",
            Self::Other(_) => "Unknown error",
        }
    }

    /// Whether the code means the credentials or token were rejected.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingOAuthParameter
                | Self::UnsupportedOAuthParameter
                | Self::InvalidSignatureMethod
                | Self::InvalidConsumerKey
                | Self::InvalidTimestamp
                | Self::InvalidNonce
                | Self::InvalidSignature
                | Self::InvalidAccessToken
                | Self::InvalidOAuth2Token
                | Self::MissingOAuth2Scope
        )
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.description(), self.code())
    }
}

/// Broad category of a [`FatSecretError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Parameter,
    Authentication,
    Api,
    MalformedResponse,
}

#[derive(Debug, Error)]
pub enum FatSecretError {
    /// Required credentials are missing or empty.
    #[error("Missing API credentials: {0}")]
    Configuration(String),

    /// A caller-supplied argument violates a documented bound.
    #[error("Parameter value out of range: {0}")]
    ParameterOutOfRange(String),

    /// The token exchange failed.
    #[error("Invalid/expired OAuth 2.0 token: {0}")]
    Authentication(String),

    /// The search call failed at the transport, status or decoding level.
    #[error("API request failed: {0}")]
    Api(String),

    /// The API answered with an error payload.
    #[error("{code}: {message}")]
    Provider { code: ApiErrorCode, message: String },

    /// A mandatory key was missing from the response.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl FatSecretError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::ParameterOutOfRange(_) => ErrorKind::Parameter,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Api(_) => ErrorKind::Api,
            Self::Provider { code, .. } if code.is_auth_failure() => ErrorKind::Authentication,
            Self::Provider { code: ApiErrorCode::ParameterOutOfRange, .. } => ErrorKind::Parameter,
            Self::Provider { .. } => ErrorKind::Api,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }

    /// FatSecret numeric code associated with this error, if there is one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::ParameterOutOfRange(_) => Some(ApiErrorCode::ParameterOutOfRange.code()),
            Self::Authentication(_) => Some(ApiErrorCode::InvalidOAuth2Token.code()),
            Self::Provider { code, .. } => Some(code.code()),
            _ => None,
        }
    }
}

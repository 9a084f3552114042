//! Closed vocabularies
//!
//! Media types, header names and status codes that documents commonly use.
//! The model itself accepts any string for these; this module only names
//! the well-known values.

use std::fmt;
use std::str::FromStr;

/// Well-known media types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownMediaType {
    Any,
    TextPlain,
    TextHtml,
    TextCss,
    ImageJpeg,
    ImagePng,
    ImageSvg,
    ImageGif,
    AudioMpeg,
    AudioOgg,
    AudioAny,
    VideoMp4,
    ApplicationAny,
    ApplicationXml,
    ApplicationJson,
    ApplicationJavascript,
    ApplicationEcmascript,
    ApplicationOctetStream,
    MultipartFormData,
    MultipartByteranges,
    ApplicationFormUrlencoded,
}

impl KnownMediaType {
    pub const ALL: [KnownMediaType; 21] = [
        Self::Any,
        Self::TextPlain,
        Self::TextHtml,
        Self::TextCss,
        Self::ImageJpeg,
        Self::ImagePng,
        Self::ImageSvg,
        Self::ImageGif,
        Self::AudioMpeg,
        Self::AudioOgg,
        Self::AudioAny,
        Self::VideoMp4,
        Self::ApplicationAny,
        Self::ApplicationXml,
        Self::ApplicationJson,
        Self::ApplicationJavascript,
        Self::ApplicationEcmascript,
        Self::ApplicationOctetStream,
        Self::MultipartFormData,
        Self::MultipartByteranges,
        Self::ApplicationFormUrlencoded,
    ];

    /// Media type string, as used for content map keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "*/*",
            Self::TextPlain => "text/plain",
            Self::TextHtml => "text/html",
            Self::TextCss => "text/css",
            Self::ImageJpeg => "image/jpeg",
            Self::ImagePng => "image/png",
            Self::ImageSvg => "image/svg+xml",
            Self::ImageGif => "image/gif",
            Self::AudioMpeg => "audio/mpeg",
            Self::AudioOgg => "audio/ogg",
            Self::AudioAny => "audio/*",
            Self::VideoMp4 => "video/mp4",
            Self::ApplicationAny => "application/*",
            Self::ApplicationXml => "application/xml",
            Self::ApplicationJson => "application/json",
            Self::ApplicationJavascript => "application/javascript",
            Self::ApplicationEcmascript => "application/ecmascript",
            Self::ApplicationOctetStream => "application/octet-stream",
            Self::MultipartFormData => "multipart/form-data",
            Self::MultipartByteranges => "multipart/byteranges",
            Self::ApplicationFormUrlencoded => "application/x-www-form-urlencoded",
        }
    }

    /// Media type range such as `audio/*`
    pub fn is_range(&self) -> bool {
        self.as_str().ends_with("/*")
    }

    /// Whether this type or range covers a concrete media type
    ///
    /// Parameters after `;` are ignored.
    pub fn matches(&self, media_type: &str) -> bool {
        let essence = media_type.split(';').next().unwrap_or_default().trim();
        match self.as_str() {
            "*/*" => true,
            range if self.is_range() => {
                let prefix = &range[..range.len() - 1];
                essence.len() > prefix.len()
                    && essence
                        .get(..prefix.len())
                        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
            }
            exact => essence.eq_ignore_ascii_case(exact),
        }
    }
}

impl fmt::Display for KnownMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a media type outside [`KnownMediaType::ALL`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMediaType(pub String);

impl fmt::Display for UnknownMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown media type: {}", self.0)
    }
}

impl std::error::Error for UnknownMediaType {}

impl FromStr for KnownMediaType {
    type Err = UnknownMediaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMediaType(s.to_string()))
    }
}

/// Well-known HTTP header names
pub const KNOWN_HEADERS: &[&str] = &[
    "Accept",
    "Accept-CH",
    "Accept-Charset",
    "Accept-Features",
    "Accept-Encoding",
    "Accept-Language",
    "Accept-Ranges",
    "Access-Control-Allow-Credentials",
    "Access-Control-Allow-Origin",
    "Access-Control-Allow-Methods",
    "Access-Control-Allow-Headers",
    "Access-Control-Max-Age",
    "Access-Control-Expose-Headers",
    "Access-Control-Request-Method",
    "Access-Control-Request-Headers",
    "Age",
    "Allow",
    "Alternates",
    "Authorization",
    "Cache-Control",
    "Connection",
    "Content-Encoding",
    "Content-Language",
    "Content-Length",
    "Content-Location",
    "Content-MD5",
    "Content-Range",
    "Content-Security-Policy",
    "Content-Type",
    "Cookie",
    "DNT",
    "Date",
    "ETag",
    "Expect",
    "Expires",
    "From",
    "Host",
    "If-Match",
    "If-Modified-Since",
    "If-None-Match",
    "If-Range",
    "If-Unmodified-Since",
    "Last-Event-ID",
    "Last-Modified",
    "Link",
    "Location",
    "Max-Forwards",
    "Negotiate",
    "Origin",
    "Pragma",
    "Proxy-Authenticate",
    "Proxy-Authorization",
    "Range",
    "Referer",
    "Retry-After",
    "Sec-Websocket-Extensions",
    "Sec-Websocket-Key",
    "Sec-Websocket-Origin",
    "Sec-Websocket-Protocol",
    "Sec-Websocket-Version",
    "Server",
    "Set-Cookie",
    "Set-Cookie2",
    "Strict-Transport-Security",
    "TCN",
    "TE",
    "Trailer",
    "Transfer-Encoding",
    "Upgrade",
    "User-Agent",
    "Variant-Vary",
    "Vary",
    "Via",
    "Warning",
    "WWW-Authenticate",
    "X-Content-Duration",
    "X-Content-Security-Policy",
    "X-DNSPrefetch-Control",
    "X-Frame-Options",
    "X-Requested-With",
];

/// Header parameters with these names are ignored by OpenAPI tooling
pub const IGNORED_PARAMETER_HEADERS: [&str; 3] = ["Accept", "Content-Type", "Authorization"];

/// Whether a header name is in [`KNOWN_HEADERS`] (case-insensitive)
pub fn is_known_header(name: &str) -> bool {
    KNOWN_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name))
}

/// Whether a header parameter of this name is ignored
pub fn is_ignored_parameter_header(name: &str) -> bool {
    IGNORED_PARAMETER_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(name))
}

/// Status codes commonly documented in `responses`
pub const DOCUMENTED_STATUS_CODES: [u16; 13] =
    [100, 200, 201, 204, 206, 301, 302, 304, 400, 401, 403, 404, 500];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_parse() {
        for media in KnownMediaType::ALL {
            assert_eq!(media.as_str().parse::<KnownMediaType>(), Ok(media));
        }
        assert_eq!("Application/JSON".parse(), Ok(KnownMediaType::ApplicationJson));
        assert!("application/vnd.api+json".parse::<KnownMediaType>().is_err());
    }

    #[test]
    fn test_media_type_matches() {
        assert!(KnownMediaType::Any.matches("application/json"));
        assert!(KnownMediaType::AudioAny.matches("audio/flac"));
        assert!(!KnownMediaType::AudioAny.matches("video/mp4"));
        assert!(!KnownMediaType::ApplicationAny.matches("application/"));
        assert!(KnownMediaType::ApplicationJson.matches("application/json; charset=utf-8"));
        assert!(!KnownMediaType::ApplicationJson.matches("application/xml"));
        assert!(KnownMediaType::ApplicationAny.is_range());
        assert!(!KnownMediaType::TextPlain.is_range());
    }

    #[test]
    fn test_known_headers() {
        assert!(is_known_header("content-type"));
        assert!(is_known_header("X-Requested-With"));
        assert!(!is_known_header("X-Rate-Limit"));
        assert!(is_ignored_parameter_header("authorization"));
        assert!(!is_ignored_parameter_header("X-Request-Id"));
    }

    #[test]
    fn test_documented_status_codes_are_valid() {
        for code in DOCUMENTED_STATUS_CODES {
            assert!(http::StatusCode::from_u16(code).is_ok());
        }
    }
}

//! Wire and message types
//!
//! Request/response bodies of the Guggy API and the Matrix message payloads
//! returned to the host.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Matrix `msgtype` for image messages.
pub const MSGTYPE_IMAGE: &str = "m.image";
/// Matrix `msgtype` for notices.
pub const MSGTYPE_NOTICE: &str = "m.notice";
/// MIME type attached to every GIF message.
pub const GIF_MIMETYPE: &str = "image/gif";

/// Output format supported by the Guggy API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GifFormat {
    /// Animated GIF.
    #[default]
    Gif,
    /// MP4 video.
    Mp4,
}

impl fmt::Display for GifFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Gif => "gif",
            Self::Mp4 => "mp4",
        };
        write!(f, "{}", s)
    }
}

/// Request envelope posted to the Guggy API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuggyQuery {
    /// Requested output format.
    pub format: GifFormat,
    /// Sentence to turn into a GIF.
    pub sentence: String,
}

impl GuggyQuery {
    /// Builds a GIF query for `sentence`.
    pub fn gif(sentence: impl Into<String>) -> Self {
        Self {
            format: GifFormat::Gif,
            sentence: sentence.into(),
        }
    }
}

/// Response body returned by the Guggy API.
///
/// Every field defaults when absent or `null`, so `{}` and `{"gif": null}`
/// both read as "no result".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuggyGifResult {
    /// Request identifier assigned by Guggy.
    #[serde(rename = "reqId", deserialize_with = "null_as_default")]
    pub req_id: String,
    /// URL of the generated GIF; empty when nothing matched.
    #[serde(deserialize_with = "null_as_default")]
    pub gif: String,
    /// Width in pixels.
    #[serde(deserialize_with = "null_as_default")]
    pub width: f64,
    /// Height in pixels.
    #[serde(deserialize_with = "null_as_default")]
    pub height: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl GuggyGifResult {
    /// Returns `true` if the API produced a GIF.
    pub fn has_gif(&self) -> bool {
        !self.gif.is_empty()
    }

    /// Width floored to whole pixels.
    pub fn pixel_width(&self) -> u32 {
        floor_pixels(self.width)
    }

    /// Height floored to whole pixels.
    pub fn pixel_height(&self) -> u32 {
        floor_pixels(self.height)
    }
}

// `as` saturates: negatives clamp to 0 and NaN maps to 0.
fn floor_pixels(value: f64) -> u32 {
    value.floor() as u32
}

/// Plain text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMessage {
    /// Matrix message type.
    pub msgtype: String,
    /// Message text.
    pub body: String,
}

impl TextMessage {
    /// Builds an `m.notice` message.
    ///
    /// go-neb based bots sent notices as `m.text.notice`, which Matrix clients do
    /// not recognise; this always uses the standard `m.notice` type.
    pub fn notice(body: impl Into<String>) -> Self {
        Self {
            msgtype: MSGTYPE_NOTICE.to_string(),
            body: body.into(),
        }
    }
}

/// Metadata attached to an image message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Height in pixels.
    #[serde(rename = "h")]
    pub height: u32,
    /// Width in pixels.
    #[serde(rename = "w")]
    pub width: u32,
    /// MIME type of the media.
    pub mimetype: String,
}

/// Image message referencing uploaded media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMessage {
    /// Matrix message type (`m.image`).
    pub msgtype: String,
    /// Alt text; the search phrase for GIFs.
    pub body: String,
    /// Content reference returned by the upload (`mxc://...`).
    pub url: String,
    /// Image metadata.
    pub info: ImageInfo,
}

impl ImageMessage {
    /// Builds an `m.image` message for an uploaded GIF.
    pub fn gif(body: impl Into<String>, url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            msgtype: MSGTYPE_IMAGE.to_string(),
            body: body.into(),
            url: url.into(),
            info: ImageInfo {
                height,
                width,
                mimetype: GIF_MIMETYPE.to_string(),
            },
        }
    }
}

/// Message content handed back to the host for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatMessage {
    /// Image message.
    Image(ImageMessage),
    /// Text or notice message.
    Text(TextMessage),
}

impl ChatMessage {
    /// The `msgtype` of the wrapped message.
    pub fn msgtype(&self) -> &str {
        match self {
            Self::Image(m) => &m.msgtype,
            Self::Text(m) => &m.msgtype,
        }
    }

    /// The `body` of the wrapped message.
    pub fn body(&self) -> &str {
        match self {
            Self::Image(m) => &m.body,
            Self::Text(m) => &m.body,
        }
    }
}

impl From<TextMessage> for ChatMessage {
    fn from(message: TextMessage) -> Self {
        Self::Text(message)
    }
}

impl From<ImageMessage> for ChatMessage {
    fn from(message: ImageMessage) -> Self {
        Self::Image(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_query_envelope() {
        let query = GuggyQuery::gif("dancing cat");
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"format": "gif", "sentence": "dancing cat"})
        );
    }

    #[test]
    fn test_format_display() {
        assert_eq!(GifFormat::Gif.to_string(), "gif");
        assert_eq!(GifFormat::Mp4.to_string(), "mp4");
    }

    #[test]
    fn test_result_missing_fields() {
        let result: GuggyGifResult = serde_json::from_str(r#"{"reqId": "r1"}"#).unwrap();
        assert_eq!(result.req_id, "r1");
        assert!(!result.has_gif());
        assert_eq!(result.pixel_width(), 0);
    }

    #[test]
    fn test_result_null_fields() {
        let result: GuggyGifResult = serde_json::from_str(
            r#"{"reqId": null, "gif": null, "width": null, "height": null}"#,
        )
        .unwrap();
        assert_eq!(result, GuggyGifResult::default());
        assert!(!result.has_gif());
    }

    #[test]
    fn test_pixel_dimensions_floor() {
        let result = GuggyGifResult {
            req_id: "r".to_string(),
            gif: "https://example.com/a.gif".to_string(),
            width: 480.9,
            height: 269.5,
        };
        assert_eq!(result.pixel_width(), 480);
        assert_eq!(result.pixel_height(), 269);

        let odd = GuggyGifResult {
            width: -3.0,
            height: f64::NAN,
            ..Default::default()
        };
        assert_eq!(odd.pixel_width(), 0);
        assert_eq!(odd.pixel_height(), 0);
    }

    #[test]
    fn test_image_message_json() {
        let message: ChatMessage = ImageMessage::gif("hi", "mxc://server/abc", 200, 100).into();
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "msgtype": "m.image",
                "body": "hi",
                "url": "mxc://server/abc",
                "info": {"h": 100, "w": 200, "mimetype": "image/gif"}
            })
        );
    }

    #[test]
    fn test_notice_message_json() {
        let message: ChatMessage = TextMessage::notice("No GIF found!").into();
        assert_eq!(message.msgtype(), "m.notice");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"msgtype": "m.notice", "body": "No GIF found!"})
        );
    }
}

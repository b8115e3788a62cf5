//! URL-encoded form encoder.

use http::{header, HeaderMap, HeaderValue};
use mime::Mime;

use crate::converter::{is_form_urlencoded, BodyConverter, EncodeContext};
use crate::encoded::EncodedBody;
use crate::error::{EncodeError, ValueShape};
use crate::value::Value;

/// Encoder for `application/x-www-form-urlencoded` bodies.
///
/// Accepts a multimap whose values are all scalar text. Emits `key=value`
/// pairs joined with `&`: keys in first-insertion order, duplicate keys
/// appended in original order without deduplication, each key and value
/// percent-encoded per the form alphabet (space as `+`, unreserved
/// characters passed through, everything else escaped byte-wise).
///
/// No attempt is made to detect already-encoded input: a literal `%XX`
/// sequence in a value is re-escaped, so `%25` goes out as `%2525`.
#[derive(Debug, Clone, Copy)]
pub struct FormConverter;

impl BodyConverter for FormConverter {
    fn supports(&self, shape: ValueShape, media_type: &Mime) -> bool {
        shape == ValueShape::Multimap && is_form_urlencoded(media_type)
    }

    fn encode(
        &self,
        value: &Value,
        media_type: &Mime,
        _cx: &EncodeContext<'_>,
    ) -> Result<EncodedBody, EncodeError> {
        let Value::Multimap(map) = value else {
            return Err(EncodeError::no_converter(value.shape(), Some(media_type)));
        };

        let mut pairs: Vec<(&str, &str)> = Vec::new();
        for (name, field) in map.iter() {
            match field {
                Value::Text(text) => pairs.push((name, text)),
                other => {
                    return Err(EncodeError::no_converter(other.shape(), Some(media_type)));
                }
            }
        }

        let body = serde_urlencoded::to_string(&pairs)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(media_type.as_ref())?,
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));

        Ok(EncodedBody::new(headers, body.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConverterRegistry;
    use crate::resource::Resource;
    use crate::value::MultiMap;
    use proptest::prelude::*;

    fn encode(map: MultiMap) -> Result<EncodedBody, EncodeError> {
        let registry = ConverterRegistry::new();
        let cx = EncodeContext::root(&registry);
        FormConverter.encode(
            &Value::from(map),
            &mime::APPLICATION_WWW_FORM_URLENCODED,
            &cx,
        )
    }

    fn body_string(map: MultiMap) -> String {
        String::from_utf8(encode(map).unwrap().bytes().to_vec()).unwrap()
    }

    #[test]
    fn test_single_pair() {
        let mut map = MultiMap::new();
        map.add("name", "Jack");

        let body = encode(map).unwrap();
        assert_eq!(&body.bytes()[..], b"name=Jack");
        assert_eq!(
            body.content_type(),
            Some(mime::APPLICATION_WWW_FORM_URLENCODED)
        );
    }

    #[test]
    fn test_space_encodes_as_plus() {
        let mut map = MultiMap::new();
        map.add("name", "Jack Tang");

        assert_eq!(body_string(map), "name=Jack+Tang");
    }

    #[test]
    fn test_reserved_characters_are_escaped() {
        let mut map = MultiMap::new();
        map.add("name hello %", "Jack%&Tang");

        assert_eq!(body_string(map), "name+hello+%25=Jack%25%26Tang");
    }

    #[test]
    fn test_already_encoded_input_is_double_encoded() {
        // A caller supplying pre-encoded text gets it re-escaped; %25
        // becomes %2525 on the wire.
        let mut map = MultiMap::new();
        map.add("name+hello+%25", "Jack%25%26Tang");

        assert_eq!(
            body_string(map),
            "name%2Bhello%2B%2525=Jack%2525%2526Tang"
        );
    }

    #[test]
    fn test_duplicate_keys_keep_order() {
        let mut map = MultiMap::new();
        map.add("name", "Jack");
        map.add("name", "Jack");

        assert_eq!(body_string(map), "name=Jack&name=Jack");
    }

    #[test]
    fn test_non_text_value_is_rejected() {
        let mut map = MultiMap::new();
        map.add("file", Resource::from_bytes(b"data".as_slice()));

        let err = encode(map).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::NoConverter {
                shape: ValueShape::Resource,
                ..
            }
        ));
    }

    #[test]
    fn test_decodes_back_with_plus_normalization() {
        let mut map = MultiMap::new();
        map.add("query", "hello world");
        map.add("query", "second value");

        let body = body_string(map);
        let decoded: Vec<(String, String)> = serde_urlencoded::from_str(&body).unwrap();

        assert_eq!(
            decoded,
            vec![
                ("query".to_string(), "hello world".to_string()),
                ("query".to_string(), "second value".to_string()),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_form_round_trips(
            pairs in proptest::collection::vec(
                ("[a-zA-Z0-9 ]{1,12}", "[a-zA-Z0-9 ]{0,20}"),
                0..8,
            )
        ) {
            let mut map = MultiMap::new();
            for (name, value) in &pairs {
                map.add(name.clone(), value.as_str());
            }

            let body = body_string(map);
            let decoded: Vec<(String, String)> =
                serde_urlencoded::from_str(&body).unwrap();

            // The multimap groups duplicate names, so compare against the
            // same grouping of the input pairs.
            let mut grouped: Vec<(String, String)> = Vec::new();
            let mut names: Vec<&String> = Vec::new();
            for (name, _) in &pairs {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
            for name in names {
                for (candidate, value) in &pairs {
                    if candidate == name {
                        grouped.push((name.clone(), value.clone()));
                    }
                }
            }

            prop_assert_eq!(decoded, grouped);
        }
    }
}
